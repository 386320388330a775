//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/upeye/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/upeye/` (~/.config/upeye/)
//! - Data: `$XDG_DATA_HOME/upeye/` (~/.local/share/upeye/)
//! - State/Logs: `$XDG_STATE_HOME/upeye/` (~/.local/state/upeye/)

use crate::error::{Error, Result};
use crate::types::PatternLength;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Pattern analysis defaults
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Snapshot location and health synthesis
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Export destination
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pattern analysis configuration
#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    /// Default pattern length (1 = frequency, 2-4 = sequence window)
    #[serde(default = "default_pattern_length")]
    pub pattern_length: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pattern_length: default_pattern_length(),
        }
    }
}

impl AnalysisConfig {
    pub fn pattern_length(&self) -> Result<PatternLength> {
        PatternLength::new(self.pattern_length)
    }
}

fn default_pattern_length() -> u8 {
    2
}

/// Ingestion configuration
#[derive(Debug, Deserialize)]
pub struct IngestConfig {
    /// Snapshot file; defaults to `$XDG_DATA_HOME/upeye/snapshot.json`
    pub snapshot_path: Option<PathBuf>,

    /// Fill in health metrics for activities stored without them.
    ///
    /// The analyzers expect every activity to carry metrics. With this off,
    /// unfilled activities are left out of health statistics, patterns made
    /// only of them score the default 50, and collection logs a warning
    /// with the count.
    #[serde(default = "default_synthesize")]
    pub synthesize_missing_health: bool,

    /// Seed for synthesized metrics; unset draws from entropy
    pub seed: Option<u64>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            synthesize_missing_health: default_synthesize(),
            seed: None,
        }
    }
}

fn default_synthesize() -> bool {
    true
}

/// Export configuration
#[derive(Debug, Deserialize, Default)]
pub struct ExportConfig {
    /// Directory export files are written to; defaults to the working directory
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    pub fn directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.pattern_length().is_err() {
            return Err(Error::Config(format!(
                "analysis.pattern_length must be between 1 and 4, got {}",
                self.analysis.pattern_length
            )));
        }
        if self.logging.max_files == 0 {
            return Err(Error::Config(
                "logging.max_files must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Snapshot file to read, honoring `ingest.snapshot_path`.
    pub fn snapshot_path(&self) -> PathBuf {
        self.ingest
            .snapshot_path
            .clone()
            .unwrap_or_else(Self::default_snapshot_path)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/upeye/config.toml` (~/.config/upeye/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("upeye").join("config.toml")
    }

    /// Returns the data directory path (for the snapshot)
    ///
    /// `$XDG_DATA_HOME/upeye/` (~/.local/share/upeye/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("upeye")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/upeye/` (~/.local/state/upeye/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("upeye")
    }

    /// `$XDG_DATA_HOME/upeye/snapshot.json`
    pub fn default_snapshot_path() -> PathBuf {
        Self::data_dir().join("snapshot.json")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/upeye/upeye.log` (~/.local/state/upeye/upeye.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("upeye.log")
    }
}
