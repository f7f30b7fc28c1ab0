//! SRM Common Library
//!
//! This crate provides shared constants, configuration loading utilities and
//! the diagnostic error taxonomy for all SRM workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Tolerances, capacity limits and defaults
//! - [`motor`] - Motor configuration value and its validation
//! - [`config`] - Application configuration and the TOML loader trait
//! - [`error`] - Configuration-level simulation diagnostics
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use srm_common::prelude::*;
//!
//! let motor = MotorConfig::default();
//! assert!(motor.validate().is_ok());
//! assert!(motor.coil_count <= MAX_COILS);
//! ```

pub mod config;
pub mod consts;
pub mod error;
pub mod motor;
pub mod prelude;
