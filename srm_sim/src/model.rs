//! Motor model.
//!
//! `MotorModel` owns a validated [`MotorConfig`], the derived geometry
//! (evenly spaced coil and pole angles, fixed for the model's lifetime) and
//! the mutable [`MotorState`] advanced by the step engine.
//!
//! Geometry is kept in fixed-capacity `heapless` storage; after construction
//! a model never touches the heap.

use serde::{Deserialize, Serialize};
use srm_common::config::ConfigError;
use srm_common::consts::{FULL_REVOLUTION_DEG, MAX_COILS, MAX_POLES};
use srm_common::error::SimError;
use srm_common::motor::MotorConfig;
use std::f64::consts::PI;
use tracing::debug;

/// Fixed stator coil angles (degrees).
pub type CoilAngles = heapless::Vec<f64, MAX_COILS>;

/// Rotor pole angles at zero rotation (degrees).
pub type PoleAngles = heapless::Vec<f64, MAX_POLES>;

/// Mutable simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotorState {
    /// Accumulated rotor rotation (degrees). Never wraps during a run.
    pub rotor_angle: f64,
    /// Worst trailing-pole interference seen so far (fraction of one coil area).
    pub negative_overlap: f64,
    /// Size of the most recent step (degrees), 0 before the first step.
    pub last_step_angle: f64,
    /// Clearance between adjacent poles relative to coil diameter (%).
    pub rotor_integrity: f64,
}

/// Step engine phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StepPhase {
    /// Next call to `step` evaluates the geometry.
    #[default]
    Ready,
    /// A step was rejected; the model stays here.
    Failed(SimError),
}

/// Switched-reluctance motor: configuration, geometry and state.
#[derive(Debug, Clone)]
pub struct MotorModel {
    config: MotorConfig,
    coil_angles: CoilAngles,
    pole_base_angles: PoleAngles,
    pub(crate) state: MotorState,
    pub(crate) phase: StepPhase,
}

impl MotorModel {
    /// Build a model from a configuration.
    ///
    /// # Errors
    /// `ConfigError::ValidationError` if the configuration is rejected by
    /// [`MotorConfig::validate`] (zero counts included).
    pub fn new(config: MotorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let coil_angles = evenly_spaced::<MAX_COILS>(config.coil_count)?;
        let pole_base_angles = evenly_spaced::<MAX_POLES>(config.pole_count)?;
        let state = MotorState {
            rotor_integrity: rotor_integrity(&config),
            ..MotorState::default()
        };

        debug!(
            "Motor model: {} coils, {} poles, rim radius {:.3}, integrity {:.1}%",
            config.coil_count,
            config.pole_count,
            config.coil_rim_radius(),
            state.rotor_integrity
        );

        Ok(Self {
            config,
            coil_angles,
            pole_base_angles,
            state,
            phase: StepPhase::Ready,
        })
    }

    /// Configuration the model was built from.
    #[inline]
    pub const fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Current state snapshot.
    #[inline]
    pub const fn state(&self) -> MotorState {
        self.state
    }

    /// Current step engine phase.
    #[inline]
    pub const fn phase(&self) -> &StepPhase {
        &self.phase
    }

    /// Number of stator coils.
    #[inline]
    pub const fn coil_count(&self) -> usize {
        self.config.coil_count
    }

    /// Number of rotor poles.
    #[inline]
    pub const fn pole_count(&self) -> usize {
        self.config.pole_count
    }

    /// Fixed coil angles.
    #[inline]
    pub fn coil_angles(&self) -> &[f64] {
        &self.coil_angles
    }

    /// Pole angles at zero rotation.
    #[inline]
    pub fn pole_base_angles(&self) -> &[f64] {
        &self.pole_base_angles
    }

    /// Current angle of pole `index` (rotor angle + base angle).
    ///
    /// # Panics
    /// If `index >= pole_count`.
    #[inline]
    pub(crate) fn pole_angle(&self, index: usize) -> f64 {
        self.state.rotor_angle + self.pole_base_angles[index]
    }
}

/// `count` angles spaced `360 / count` apart starting at 0.
fn evenly_spaced<const N: usize>(count: usize) -> Result<heapless::Vec<f64, N>, ConfigError> {
    let mut angles = heapless::Vec::new();
    for i in 0..count {
        angles
            .push(i as f64 * FULL_REVOLUTION_DEG / count as f64)
            .map_err(|_| {
                ConfigError::ValidationError(format!("{count} elements exceed capacity {N}"))
            })?;
    }
    Ok(angles)
}

/// Percentage clearance between adjacent rotor poles relative to the coil
/// diameter. Negative when adjacent poles collide; 100 with a single pole.
pub fn rotor_integrity(config: &MotorConfig) -> f64 {
    if config.pole_count <= 1 {
        return 100.0;
    }
    let a = config.coil_rim_radius();
    let pole_distance =
        (2.0 * a * a - 2.0 * a * a * (2.0 * PI / config.pole_count as f64).cos()).sqrt();
    100.0 * (pole_distance / config.coil_diameter - 1.0)
}
