//! Configuration file parser for ~/.config/sieve-export/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Command-line flags override anything set here. Unknown keys are accepted
//! but logged, since they are usually typos.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::util::DEFAULT_SUMMARY_LENGTH;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Exporter configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the Sieve SQLite database.
    pub sieve_db: PathBuf,

    /// Output root; `content/` and `data/` are created beneath it.
    pub output: PathBuf,

    /// Maximum digest summary length in characters, ellipsis included.
    pub summary_max_length: usize,

    /// Characters of each digest printed in dry-run mode.
    pub preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sieve_db: home_dir()
                .map(|home| home.join("data").join("sieve.db"))
                .unwrap_or_else(|| PathBuf::from("sieve.db")),
            output: PathBuf::from("."),
            summary_max_length: DEFAULT_SUMMARY_LENGTH,
            preview_chars: 500,
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Keys recognised in the config file
    const KNOWN_KEYS: [&'static str; 4] =
        ["sieve_db", "output", "summary_max_length", "preview_chars"];

    /// Default config file location (`~/.config/sieve-export/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        home_dir().map(|home| {
            home.join(".config")
                .join("sieve-export")
                .join("config.toml")
        })
    }

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.iter().any(|known| *known == key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
