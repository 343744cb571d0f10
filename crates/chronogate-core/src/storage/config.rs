//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The default chronotype profile used when none is given on the command line
//! - The fragility level applied when displaying windows
//! - Output preferences (JSON, structural explanations)
//!
//! Configuration is stored at `~/.config/chronogate/config.toml`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::fragility::FragilityLevel;
use crate::profile::{Chronotype, ChronotypeProfile, ConfidenceLevel};

/// Stored chronotype profile. Both `chronotype` and `confidence` must be set
/// for the profile to be used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub chronotype: Option<Chronotype>,
    #[serde(default)]
    pub confidence: Option<ConfidenceLevel>,
    #[serde(default)]
    pub computed_at: Option<DateTime<Utc>>,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub explain: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/chronogate/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Applied to displayed windows only; never to governance.
    #[serde(default)]
    pub fragility: FragilityLevel,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::MissingKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown().into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let invalid = |message: String| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message,
                };
                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)?
                    }
                    _ if value.eq_ignore_ascii_case("none") => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown().into())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()).into())
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type (including unknown chronotype or confidence names).
    pub fn assign(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.assign(key, value)?;
        self.save()
    }

    /// The stored profile, if both chronotype and confidence are set.
    pub fn profile(&self) -> Option<ChronotypeProfile> {
        let ProfileConfig {
            chronotype: Some(chronotype),
            confidence: Some(confidence),
            computed_at,
        } = self.profile
        else {
            return None;
        };
        Some(ChronotypeProfile {
            chronotype,
            confidence,
            computed_at: computed_at.unwrap_or_else(Utc::now),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
