//! Configuration loading.
//!
//! `VOCAB_REVIEW_CONFIG` (from the environment or `.env`) names a JSON file.
//! Without it, `vocab-review.json` in the working directory is used when
//! present, and built-in defaults otherwise.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use vocab_core::ReviewConfig;

pub const CONFIG_ENV: &str = "VOCAB_REVIEW_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "vocab-review.json";

pub fn load_config() -> Result<ReviewConfig> {
    dotenvy::dotenv().ok();
    let explicit = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
    load_config_from(explicit.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
}

pub fn load_config_from(explicit: Option<&Path>, fallback: &Path) -> Result<ReviewConfig> {
    let path = match explicit {
        Some(path) => path,
        None if fallback.exists() => fallback,
        None => {
            tracing::debug!("No config file, using defaults");
            return Ok(ReviewConfig::default());
        }
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
    let config = ReviewConfig::from_json(&content)
        .with_context(|| format!("Invalid config in '{}'", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
