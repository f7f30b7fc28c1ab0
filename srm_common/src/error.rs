//! Simulation diagnostics.
//!
//! Every variant describes a property of the motor configuration, not a
//! fault of the program. All kinds are terminal for the run that raised them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a step or a full-revolution run could not complete.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimError {
    /// Fewer than three coils and poles in total.
    #[error("Not enough coils/poles")]
    InsufficientComponents,

    /// Every coil already holds an aligned pole; the motor has stalled.
    #[error("No movement")]
    NoMovement,

    /// Two poles are equidistant in opposite directions.
    #[error("Chaotic")]
    Chaotic,

    /// No approaching pole and no more specific diagnosis.
    #[error("Invalid motor configuration")]
    InvalidConfiguration,

    /// Nearest approaching pole is half a turn away or more.
    #[error("Angle too big: {angle:.3}° >= 180°")]
    StepTooLarge {
        /// Absolute angle to the candidate pole (degrees).
        angle: f64,
    },

    /// Adjacent rotor poles collide.
    #[error("Poles are overlapping ({integrity:.0}% integrity)")]
    PolesOverlapping {
        /// Rotor integrity percentage (negative).
        integrity: f64,
    },

    /// The revolution did not converge within `coil_count * pole_count` steps.
    #[error("More than expected amount of steps: {steps} > {limit}")]
    TooManySteps {
        /// Steps committed when the run was stopped.
        steps: usize,
        /// Step bound for this configuration.
        limit: usize,
    },

    /// The rotor advanced by more than one distinct step angle.
    #[error("Inconsistent angle: {}", join_angles(.angles))]
    InconsistentStepAngle {
        /// Distinct rounded step angles, ascending.
        angles: Vec<f64>,
    },

    /// A step interfered with the trailing pole.
    #[error("Negative overlap {percent:.1}%")]
    NegativeOverlap {
        /// Worst interference observed, in percent of one coil area.
        percent: f64,
    },
}

impl SimError {
    /// Short machine-friendly name of the variant.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InsufficientComponents => "insufficient_components",
            Self::NoMovement => "no_movement",
            Self::Chaotic => "chaotic",
            Self::InvalidConfiguration => "invalid_configuration",
            Self::StepTooLarge { .. } => "step_too_large",
            Self::PolesOverlapping { .. } => "poles_overlapping",
            Self::TooManySteps { .. } => "too_many_steps",
            Self::InconsistentStepAngle { .. } => "inconsistent_step_angle",
            Self::NegativeOverlap { .. } => "negative_overlap",
        }
    }
}

fn join_angles(angles: &[f64]) -> String {
    angles
        .iter()
        .map(|a| format!("{a:.3}"))
        .collect::<Vec<_>>()
        .join(", ")
}
