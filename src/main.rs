use tracing_subscriber::{fmt, EnvFilter};

use llama_run::config::{GenerationRequest, WallClock};
use llama_run::engine::{GenerationEngine, NullEngine};
use llama_run::usage::USAGE;

fn main() -> anyhow::Result<()> {
    // logs
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let req = match GenerationRequest::from_args(&args, &WallClock) {
        Ok(req) => req,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    NullEngine.run(&req)?;
    Ok(())
}
