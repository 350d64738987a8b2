use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::defaults;

pub const RUN_MODE_VAR: &str = "RUN_MODE";

/// `RUN_MODE`, falling back to development when unset or blank.
pub fn run_mode() -> String {
    std::env::var(RUN_MODE_VAR)
        .ok()
        .map(|mode| mode.trim().to_ascii_lowercase())
        .filter(|mode| !mode.is_empty())
        .unwrap_or_else(|| defaults::DEFAULT_RUN_MODE.to_string())
}

#[derive(Debug, PartialEq, Eq)]
pub enum DotenvOutcome {
    Loaded,
    Missing,
    Invalid,
}

/// Loads one `.env` file. A missing file is quiet; a malformed one is
/// logged and the variables read before the bad line stay set.
pub fn load_env_file(path: &Path) -> DotenvOutcome {
    match dotenvy::from_filename(path) {
        Ok(_) => DotenvOutcome::Loaded,
        Err(err) if err.not_found() => {
            tracing::debug!(path = %path.display(), "no .env file");
            DotenvOutcome::Missing
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load .env file");
            DotenvOutcome::Invalid
        }
    }
}

fn report_dotenv_error(err: &dotenvy::Error) {
    if err.not_found() {
        tracing::debug!("no .env file found in the working directory");
    } else {
        tracing::warn!(error = %err, "failed to load .env file");
    }
}

pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    /// Only development reads a `.env` file; other modes rely on the real
    /// environment.
    fn load_dotenv() {
        if run_mode() != defaults::DEFAULT_RUN_MODE {
            return;
        }
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        if let DotenvOutcome::Missing = load_env_file(&manifest_dir.join(".env")) {
            if let Err(err) = dotenvy::dotenv() {
                report_dotenv_error(&err);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();

        let settings = config_rs::Config::builder()
            .add_source(
                config_rs::Environment::with_prefix(Self::PREFIX)
                    .prefix_separator("_")
                    .separator(Self::SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("failed to read environment variables for config")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
