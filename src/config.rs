// ⚙️ Configuration - optional TOML file, defaults when absent
//
// Example:
//
//     timestamp_format = "%d-%m-%Y %H:%M"
//     log_file = "expense-tracker.log"

use crate::transaction::TimestampFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "expense-tracker.toml";
pub const DEFAULT_LOG_FILE: &str = "expense-tracker.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// strftime pattern for the date column
    pub timestamp_format: TimestampFormat,

    /// Where tracing output goes; the terminal belongs to the UI
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timestamp_format: TimestampFormat::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parse {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize config")
    }
}
