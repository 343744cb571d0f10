mod config;

pub use config::{Config, OutputConfig, ProfileConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/chronogate[-dev]/` based on CHRONOGATE_ENV.
///
/// Set CHRONOGATE_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CHRONOGATE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("chronogate-dev")
    } else {
        base_dir.join("chronogate")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
