//! Configuration loading traits and types.
//!
//! This module provides the application configuration (`srm.toml`) and a
//! standardized way to load any TOML configuration file.
//!
//! # Usage
//!
//! ```rust,no_run
//! use srm_common::config::{ConfigLoader, SimConfig, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = SimConfig::load(Path::new("srm.toml"))?;
//!     config.validate()?;
//!     println!("Motor: {} coils, {} poles", config.motor.coil_count, config.motor.pole_count);
//!     Ok(())
//! }
//! ```

use crate::consts::{DEFAULT_SWEEP_MAX, MAX_COILS, MAX_POLES};
use crate::motor::MotorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error type for configuration loading operations.
///
/// This enum represents all possible errors that can occur when loading
/// or validating configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, per-coil alignment tracing.
    Trace,
    /// Per-step information.
    Debug,
    /// Run and sweep summaries.
    #[default]
    Info,
    /// Promoted warnings and recoverable persistence problems.
    Warn,
    /// Errors only.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn default_sweep_max() -> usize {
    DEFAULT_SWEEP_MAX
}

fn default_true() -> bool {
    true
}

/// Sweep settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Upper bound (inclusive) for both coil and pole counts.
    #[serde(default = "default_sweep_max")]
    pub max_count: usize,

    /// Rank results before display.
    #[serde(default = "default_true")]
    pub sorted: bool,

    /// Worker threads, 0 = available parallelism.
    #[serde(default)]
    pub threads: usize,
}

impl SweepConfig {
    /// Validate the sweep bounds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `max_count` is 0 or exceeds
    /// the coil/pole capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cap = MAX_COILS.min(MAX_POLES);
        if self.max_count == 0 || self.max_count > cap {
            return Err(ConfigError::ValidationError(format!(
                "sweep.max_count must be in 1..={}, got {}",
                cap, self.max_count
            )));
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_SWEEP_MAX,
            sorted: true,
            threads: 0,
        }
    }
}

/// Application configuration loaded from `srm.toml`.
///
/// # TOML Example
///
/// ```toml
/// log_level = "debug"
/// session_file = "/tmp/srm_session"
///
/// [motor]
/// outer_diameter = 30.0
/// coil_diameter = 6.0
/// coil_count = 3
/// pole_count = 4
///
/// [sweep]
/// max_count = 20
/// sorted = true
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Motor evaluated by `run` and `step`; diameters also seed the sweep.
    #[serde(default)]
    pub motor: MotorConfig,

    /// Sweep settings.
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Where last-used input values are remembered between sessions.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl SimConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - the motor configuration is invalid
    /// - `sweep.max_count` is 0 or exceeds the coil/pole capacity
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.motor.validate()?;
        self.sweep.validate()
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::FileNotFound) => {
                debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Trait for loading configuration from TOML files.
///
/// This trait provides a default implementation that works with any type
/// implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
