use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Where the RNG seed comes from when `-s` is absent or non-positive.
/// Injected so tests can pin a fixed seed.
pub trait SeedSource {
    fn seed(&self) -> u64;
}

/// Seconds since the Unix epoch, read once per invocation.
pub struct WallClock;

impl SeedSource for WallClock {
    fn seed(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(1)
            .max(1)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing checkpoint path")]
    MissingCheckpoint,
    #[error("malformed flag: {0:?}")]
    MalformedFlag(String),
    #[error("unknown flag: {0:?}")]
    UnknownFlag(String),
    #[error("unknown mode: {0:?}, expected generate|chat")]
    UnknownMode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Generate,
    Chat,
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generate" => Ok(Mode::Generate),
            "chat" => Ok(Mode::Chat),
            other => Err(ParseError::UnknownMode(other.to_string())),
        }
    }
}

/// Everything the generation engine needs for one run, parsed from argv and
/// normalized. Built once, then read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub checkpoint_path: String,
    pub tokenizer_path: String,
    pub temperature: f32,
    pub top_p: f32,
    /// 0 means "run to the model's max sequence length".
    pub steps: i32,
    pub prompt: Option<String>,
    pub seed: u64,
    pub mode: Mode,
    pub system_prompt: Option<String>,
}

impl GenerationRequest {
    /// Parse `argv[1..]`: first token is the checkpoint path, the rest are
    /// consumed as `(-x, value)` pairs. Flags are exactly one dash and one
    /// letter; a flag without a trailing value is malformed.
    ///
    /// Numeric values that fail to parse degrade to zero rather than error;
    /// the normalization pass then maps zero to the field's default where
    /// zero is out of range.
    pub fn from_args(args: &[String], seeds: &dyn SeedSource) -> Result<Self, ParseError> {
        let Some(checkpoint_path) = args.first().filter(|p| !p.is_empty()) else {
            return Err(ParseError::MissingCheckpoint);
        };

        let mut req = GenerationRequest {
            checkpoint_path: checkpoint_path.clone(),
            tokenizer_path: "tokenizer.bin".to_string(),
            temperature: 1.0,
            top_p: 0.9,
            steps: 256,
            prompt: None,
            seed: 0,
            mode: Mode::Generate,
            system_prompt: None,
        };

        for pair in args[1..].chunks(2) {
            let flag = &pair[0];
            let [_, value] = pair else {
                return Err(ParseError::MalformedFlag(flag.clone()));
            };
            if !flag.starts_with('-') || flag.len() != 2 {
                return Err(ParseError::MalformedFlag(flag.clone()));
            }
            match flag.as_bytes()[1] {
                b't' => req.temperature = value.parse().unwrap_or(0.0),
                b'p' => req.top_p = value.parse().unwrap_or(0.0),
                b's' => req.seed = value.parse::<i64>().unwrap_or(0).max(0) as u64,
                b'n' => req.steps = value.parse().unwrap_or(0),
                b'i' => req.prompt = Some(value.clone()),
                b'z' => req.tokenizer_path = value.clone(),
                b'm' => req.mode = value.parse()?,
                b'y' => req.system_prompt = Some(value.clone()),
                _ => return Err(ParseError::UnknownFlag(flag.clone())),
            }
        }

        Ok(req.normalize(seeds))
    }

    /// Defaulting rules, applied after parsing. Stable: a second pass over an
    /// already-normalized request changes nothing.
    pub fn normalize(mut self, seeds: &dyn SeedSource) -> Self {
        if self.seed == 0 {
            self.seed = seeds.seed();
        }
        if self.temperature < 0.0 {
            self.temperature = 0.0;
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            self.top_p = 0.9;
        }
        if self.steps < 0 {
            self.steps = 0;
        }
        self
    }
}
