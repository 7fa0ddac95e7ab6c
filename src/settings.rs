use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_OUT_DIR: &str = "public/data";
const ENV_PREFIX: &str = "AZINDEX";

/// Runtime settings. `AZINDEX_OUT_DIR` overrides the default output location;
/// the `--out` flag overrides both.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub out_dir: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("out_dir", DEFAULT_OUT_DIR)?
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

// ── Tests ──
