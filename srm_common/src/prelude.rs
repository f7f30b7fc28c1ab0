//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types
//! so that consumers can do `use srm_common::prelude::*;` and get
//! the most important types without listing individual paths.
//!
//! # Usage
//!
//! ```rust
//! use srm_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SimConfig, SweepConfig};
pub use crate::motor::MotorConfig;

// ─── Diagnostics ────────────────────────────────────────────────────
pub use crate::error::SimError;

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{EPSILON, FULL_REVOLUTION_DEG, MAX_COILS, MAX_POLES, MIN_COMPONENTS};
