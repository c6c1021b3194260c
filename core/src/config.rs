//! Configuration for discovery and termination.
//!
//! Stores configuration in JSON format at `~/.portctl/config.json`.
//! Every key is optional; a missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Default wait between the graceful signal and the liveness probe.
pub const DEFAULT_GRACE_PERIOD_MS: u64 = 500;

/// Upper bound accepted for `gracePeriodMs`.
pub const MAX_GRACE_PERIOD_MS: u64 = 60_000;

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Milliseconds to wait after the graceful signal before probing.
    #[serde(default = "default_grace_period_ms", rename = "gracePeriodMs")]
    pub grace_period_ms: u64,

    /// Diagnostic tool executables.
    #[serde(default)]
    pub tools: ToolPaths,
}

fn default_grace_period_ms() -> u64 {
    DEFAULT_GRACE_PERIOD_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grace_period_ms: default_grace_period_ms(),
            tools: ToolPaths::default(),
        }
    }
}

impl Config {
    /// Grace period as a `Duration`.
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.grace_period_ms > MAX_GRACE_PERIOD_MS {
            return Err(Error::Config(format!(
                "gracePeriodMs must be at most {}, got {}",
                MAX_GRACE_PERIOD_MS, self.grace_period_ms
            )));
        }

        for (key, value) in [
            ("tools.lsof", &self.tools.lsof),
            ("tools.ss", &self.tools.ss),
            ("tools.powershell", &self.tools.powershell),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", key)));
            }
        }

        Ok(())
    }
}

/// Executable names or paths of the diagnostic tools.
///
/// Bare names are resolved through `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    #[serde(default = "default_lsof")]
    pub lsof: String,
    #[serde(default = "default_ss")]
    pub ss: String,
    #[serde(default = "default_powershell")]
    pub powershell: String,
}

fn default_lsof() -> String {
    "lsof".to_string()
}

fn default_ss() -> String {
    "ss".to_string()
}

fn default_powershell() -> String {
    "powershell".to_string()
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            lsof: default_lsof(),
            ss: default_ss(),
            powershell: default_powershell(),
        }
    }
}

/// Configuration store for reading and writing [`Config`].
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.portctl/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            config_path: home.join(".portctl").join("config.json"),
        })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load and validate configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !fs::try_exists(&self.config_path).await.unwrap_or(false) {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;

        if let Some(config_dir) = self.config_path.parent() {
            fs::create_dir_all(config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(config)?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }
}
