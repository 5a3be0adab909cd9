use anyhow::Result;

use crate::config::GenerationRequest;

/// Boundary to the generation engine proper: load weights from
/// `checkpoint_path`, a tokenizer from `tokenizer_path`, then run the
/// completion or chat loop with the sampling parameters in the request.
/// Everything past this trait is the engine's business; the request it
/// receives is already normalized.
pub trait GenerationEngine {
    fn run(&self, req: &GenerationRequest) -> Result<()>;
}

/// Stand-in engine used until a real backend is wired up. Logs the request
/// it was handed and returns.
pub struct NullEngine;

impl GenerationEngine for NullEngine {
    fn run(&self, req: &GenerationRequest) -> Result<()> {
        tracing::info!(
            checkpoint = %req.checkpoint_path,
            tokenizer = %req.tokenizer_path,
            temperature = req.temperature,
            top_p = req.top_p,
            steps = req.steps,
            seed = req.seed,
            mode = ?req.mode,
            "generation request ready"
        );
        Ok(())
    }
}
