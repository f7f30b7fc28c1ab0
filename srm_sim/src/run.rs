//! Run aggregator.
//!
//! Drives the step engine for one full revolution and condenses the outcome
//! into a [`RunResult`]. The first error wins; the numeric snapshot is filled
//! in even for failed runs so they can still be ranked in a sweep.

use crate::model::MotorModel;
use crate::step::StepOutcome;
use serde::{Deserialize, Serialize};
use srm_common::config::ConfigError;
use srm_common::consts::STEP_ANGLE_DECIMALS;
use srm_common::error::SimError;
use srm_common::motor::MotorConfig;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Summary of one simulated configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Number of stator coils.
    pub coil_count: usize,
    /// Number of rotor poles.
    pub pole_count: usize,
    /// `coil_count + pole_count`.
    pub component_count: usize,
    /// Committed steps.
    pub steps_taken: usize,
    /// Last step angle, rounded to 3 decimals (0 if no step was taken).
    pub step_angle: f64,
    /// Coil/pole overlap at the last step angle (%).
    pub overlap_percent: f64,
    /// Worst trailing-pole interference (%).
    pub negative_overlap_percent: f64,
    /// Adjacent pole clearance (%).
    pub rotor_integrity_percent: f64,
    /// First diagnostic raised, if any.
    pub error: Option<SimError>,
}

impl RunResult {
    /// Revolution completed without any diagnostic.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Round a step angle for comparison and reporting.
#[inline]
pub fn round_step_angle(angle: f64) -> f64 {
    let scale = 10f64.powi(STEP_ANGLE_DECIMALS);
    (angle * scale).round() / scale
}

/// Per-run bookkeeping: step count, distinct step angles, step bound.
#[derive(Debug, Clone)]
pub struct RunTally {
    limit: usize,
    steps: usize,
    // Rounded step angles in units of 10^-STEP_ANGLE_DECIMALS degrees.
    angles: BTreeSet<i64>,
}

impl RunTally {
    /// Tally allowing at most `limit` steps before the revolution completes.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            steps: 0,
            angles: BTreeSet::new(),
        }
    }

    /// Committed steps so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Distinct rounded step angles, ascending.
    pub fn distinct_angles(&self) -> Vec<f64> {
        let scale = 10f64.powi(STEP_ANGLE_DECIMALS);
        self.angles.iter().map(|&k| k as f64 / scale).collect()
    }

    /// Record a committed step.
    ///
    /// Returns `Ok(true)` once the revolution is complete, `Ok(false)` to keep
    /// stepping, or the aggregator's own diagnostic.
    pub fn record(&mut self, outcome: &StepOutcome) -> Result<bool, SimError> {
        self.steps += 1;
        let scale = 10f64.powi(STEP_ANGLE_DECIMALS);
        self.angles.insert((outcome.step_angle * scale).round() as i64);

        if outcome.revolution_complete {
            if self.angles.len() > 1 {
                return Err(SimError::InconsistentStepAngle {
                    angles: self.distinct_angles(),
                });
            }
            return Ok(true);
        }

        if self.steps > self.limit {
            return Err(SimError::TooManySteps {
                steps: self.steps,
                limit: self.limit,
            });
        }
        Ok(false)
    }
}

/// Simulate a full revolution on a fresh model.
///
/// # Errors
/// `ConfigError` if the configuration cannot build a model. Simulation
/// diagnostics are reported in [`RunResult::error`], not here.
pub fn run(config: &MotorConfig) -> Result<RunResult, ConfigError> {
    let mut model = MotorModel::new(*config)?;
    Ok(run_model(&mut model))
}

/// Drive `model` until it completes a revolution or fails.
pub fn run_model(model: &mut MotorModel) -> RunResult {
    let mut tally = RunTally::new(model.coil_count() * model.pole_count());

    let mut error = loop {
        match model.step() {
            Ok(outcome) => match tally.record(&outcome) {
                Ok(true) => break None,
                Ok(false) => {}
                Err(e) => break Some(e),
            },
            Err(e) => break Some(e),
        }
    };

    let state = model.state();
    if error.is_none() && state.negative_overlap > 0.0 {
        let percent = 100.0 * state.negative_overlap;
        warn!(
            "{} coils / {} poles: negative overlap {:.1}%",
            model.coil_count(),
            model.pole_count(),
            percent
        );
        error = Some(SimError::NegativeOverlap { percent });
    }

    let result = RunResult {
        coil_count: model.coil_count(),
        pole_count: model.pole_count(),
        component_count: model.config().component_count(),
        steps_taken: tally.steps(),
        step_angle: round_step_angle(state.last_step_angle),
        overlap_percent: 100.0 * model.overlap(state.last_step_angle),
        negative_overlap_percent: 100.0 * state.negative_overlap,
        rotor_integrity_percent: state.rotor_integrity,
        error,
    };

    match &result.error {
        None => debug!(
            "{} coils / {} poles: {} steps of {:.3}°",
            result.coil_count, result.pole_count, result.steps_taken, result.step_angle
        ),
        Some(e) => debug!(
            "{} coils / {} poles: failed after {} steps: {}",
            result.coil_count, result.pole_count, result.steps_taken, e
        ),
    }

    result
}
