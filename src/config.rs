//! Runtime configuration.
//!
//! Layering, lowest to highest precedence: built-in defaults, an optional TOML
//! file, `POOP_*` environment variables (a `.env` file is honoured by the
//! binary), then command-line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Typing delay range is empty: {min_ms}ms..{max_ms}ms")]
    EmptyTypingRange { min_ms: u64, max_ms: u64 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub faucet: FaucetConfig,
    pub terminal: TerminalConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FaucetConfig {
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub stats_interval_secs: u64,
    pub tick_interval_ms: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TerminalConfig {
    pub typing_min_ms: u64,
    pub typing_max_ms: u64,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 30,
            stats_interval_secs: 30,
            tick_interval_ms: 1000,
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            typing_min_ms: 500,
            typing_max_ms: 1500,
        }
    }
}

impl FaucetConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Config {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Applies `POOP_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("POOP_API_BASE") {
            self.faucet.api_base = base;
        }
        if let Some(secs) = parse_var(&lookup, "POOP_REQUEST_TIMEOUT_SECS")? {
            self.faucet.request_timeout_secs = secs;
        }
        if let Some(secs) = parse_var(&lookup, "POOP_STATS_INTERVAL_SECS")? {
            self.faucet.stats_interval_secs = secs;
        }
        if let Some(ms) = parse_var(&lookup, "POOP_TYPING_MIN_MS")? {
            self.terminal.typing_min_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "POOP_TYPING_MAX_MS")? {
            self.terminal.typing_max_ms = ms;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let TerminalConfig {
            typing_min_ms,
            typing_max_ms,
        } = self.terminal;
        if typing_max_ms <= typing_min_ms {
            return Err(ConfigError::EmptyTypingRange {
                min_ms: typing_min_ms,
                max_ms: typing_max_ms,
            });
        }
        if self.faucet.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "faucet.tick_interval_ms".to_string(),
                value: "0".to_string(),
            });
        }
        if self.faucet.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "faucet.request_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        if self.faucet.stats_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "faucet.stats_interval_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
    }
}
