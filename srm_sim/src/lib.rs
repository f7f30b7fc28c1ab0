//! # SRM Simulator Library
//!
//! Kinematic simulation of a switched-reluctance motor: a rotor with evenly
//! spaced poles inside a stator with evenly spaced coils. Coils are energized
//! one at a time and the rotor advances until the nearest approaching pole is
//! aligned. The simulation is purely geometric; no torque, current or
//! inductance is modeled.
//!
//! # Module Structure
//!
//! - [`model`] - `MotorModel`: configuration, derived geometry, state
//! - [`alignment`] - Nearest pole and signed angle for each coil
//! - [`step`] - Step engine: coil selection, validation, rotor advance
//! - [`overlap`] - Coil/pole footprint intersection
//! - [`run`] - Full-revolution run and `RunResult`
//! - [`sweep`] - All count combinations and their ranking
//! - [`session`] - Last-used input persistence
//! - [`report`] - Plain-text rendering
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │    sweep     │   │  CLI: step   │
//! └──────┬───────┘   └──────┬───────┘
//!        ▼                  │
//! ┌──────────────┐          │
//! │     run      │          │
//! └──────┬───────┘          │
//!        ▼                  ▼
//! ┌─────────────────────────────────┐
//! │         step (MotorModel)       │──► overlap
//! └───────────────┬─────────────────┘
//!                 ▼
//!         ┌──────────────┐
//!         │  alignment   │
//!         └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use srm_common::motor::MotorConfig;
//! use srm_sim::run::run;
//!
//! let result = run(&MotorConfig::new(30.0, 6.0, 3, 4)).unwrap();
//! assert!(result.error.is_none());
//! assert_eq!(result.steps_taken, 12);
//! assert_eq!(result.step_angle, 30.0);
//! ```

#![warn(missing_docs)]

pub mod alignment;
pub mod model;
pub mod overlap;
pub mod report;
pub mod run;
pub mod session;
pub mod step;
pub mod sweep;

// Re-export key types for convenience
pub use crate::alignment::Alignment;
pub use crate::model::{MotorModel, MotorState, StepPhase};
pub use crate::run::{RunResult, run};
pub use crate::session::{SessionRecord, SessionStore};
pub use crate::step::StepOutcome;
pub use crate::sweep::{rank, sweep};
