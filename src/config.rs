// src/config.rs

//! Configuration for the `runescan` command-line driver.
//!
//! Settings are deserialized from a JSON file. Every field has a default, so
//! a partial file (or no file at all) is valid. The scanner itself takes no
//! configuration; these settings only shape how the driver reports tokens.

use anyhow::Context;
use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable naming the config file read by [`Config::load_or_default`].
pub const CONFIG_ENV_VAR: &str = "RUNESCAN_CONFIG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// How tokens are printed.
    pub output: OutputConfig,
    /// Scan policy.
    pub scan: ScanConfig,
    /// Logger defaults.
    pub logging: LoggingConfig,
}

impl Config {
    /// Reads and parses the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Config> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads from the file named by `RUNESCAN_CONFIG`, falling back to defaults.
    ///
    /// An unreadable or malformed file is logged and ignored.
    pub fn load_or_default() -> Config {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Config::default();
        };
        Config::load(&path).unwrap_or_else(|e| {
            warn!("{:#}; using default configuration", e);
            Config::default()
        })
    }
}

// --- Output ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `"KIND" -> lexeme`, one token per line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow::anyhow!(
                "unknown output format '{}' (expected 'text' or 'json')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print the terminating `EOF` token too.
    pub include_eof: bool,
}

// --- Scan ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Exit with a failure status if any `ILLEGAL` token was produced.
    pub fail_on_illegal: bool,
}

// --- Logging ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            default_filter: "warn".to_string(),
        }
    }
}
