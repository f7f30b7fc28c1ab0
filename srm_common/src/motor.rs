//! Motor configuration.
//!
//! `MotorConfig` is the immutable input of every simulation: envelope and
//! coil diameters plus coil and pole counts. Derived geometry lives with the
//! model in `srm_sim`.

use crate::config::ConfigError;
use crate::consts::{
    DEFAULT_COIL_COUNT, DEFAULT_COIL_DIAMETER, DEFAULT_OUTER_DIAMETER, DEFAULT_POLE_COUNT,
    MAX_COILS, MAX_POLES,
};
use serde::{Deserialize, Serialize};

fn default_outer_diameter() -> f64 {
    DEFAULT_OUTER_DIAMETER
}

fn default_coil_diameter() -> f64 {
    DEFAULT_COIL_DIAMETER
}

fn default_coil_count() -> usize {
    DEFAULT_COIL_COUNT
}

fn default_pole_count() -> usize {
    DEFAULT_POLE_COUNT
}

/// Switched-reluctance motor configuration.
///
/// # TOML Example
///
/// ```toml
/// [motor]
/// outer_diameter = 30.0
/// coil_diameter = 6.0
/// coil_count = 3
/// pole_count = 4
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotorConfig {
    /// Overall rotor + stator envelope diameter.
    #[serde(default = "default_outer_diameter")]
    pub outer_diameter: f64,

    /// Diameter of one coil (poles share it).
    #[serde(default = "default_coil_diameter")]
    pub coil_diameter: f64,

    /// Number of stator coils.
    #[serde(default = "default_coil_count")]
    pub coil_count: usize,

    /// Number of rotor poles.
    #[serde(default = "default_pole_count")]
    pub pole_count: usize,
}

impl MotorConfig {
    /// Create a configuration from its four inputs.
    pub const fn new(
        outer_diameter: f64,
        coil_diameter: f64,
        coil_count: usize,
        pole_count: usize,
    ) -> Self {
        Self {
            outer_diameter,
            coil_diameter,
            coil_count,
            pole_count,
        }
    }

    /// Same diameters, different counts.
    pub const fn with_counts(&self, coil_count: usize, pole_count: usize) -> Self {
        Self {
            coil_count,
            pole_count,
            ..*self
        }
    }

    /// Radius of the circle on which coil and pole centers sit.
    #[inline]
    pub fn coil_rim_radius(&self) -> f64 {
        (self.outer_diameter - self.coil_diameter) / 2.0
    }

    /// Total number of coils and poles.
    #[inline]
    pub const fn component_count(&self) -> usize {
        self.coil_count + self.pole_count
    }

    /// Validate the configuration.
    ///
    /// # Validation Rules
    /// 1. Both diameters finite and > 0
    /// 2. `coil_diameter` < `outer_diameter`
    /// 3. 1 <= `coil_count` <= MAX_COILS
    /// 4. 1 <= `pole_count` <= MAX_POLES
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.outer_diameter.is_finite() || self.outer_diameter <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "outer_diameter must be a positive number, got {}",
                self.outer_diameter
            )));
        }

        if !self.coil_diameter.is_finite() || self.coil_diameter <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "coil_diameter must be a positive number, got {}",
                self.coil_diameter
            )));
        }

        if self.coil_diameter >= self.outer_diameter {
            return Err(ConfigError::ValidationError(format!(
                "coil_diameter ({}) must be smaller than outer_diameter ({})",
                self.coil_diameter, self.outer_diameter
            )));
        }

        if self.coil_count == 0 || self.coil_count > MAX_COILS {
            return Err(ConfigError::ValidationError(format!(
                "coil_count must be in 1..={}, got {}",
                MAX_COILS, self.coil_count
            )));
        }

        if self.pole_count == 0 || self.pole_count > MAX_POLES {
            return Err(ConfigError::ValidationError(format!(
                "pole_count must be in 1..={}, got {}",
                MAX_POLES, self.pole_count
            )));
        }

        Ok(())
    }
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_OUTER_DIAMETER,
            DEFAULT_COIL_DIAMETER,
            DEFAULT_COIL_COUNT,
            DEFAULT_POLE_COUNT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classic_three_four() {
        let m = MotorConfig::default();
        assert_eq!(m.coil_count, 3);
        assert_eq!(m.pole_count, 4);
        assert_eq!(m.component_count(), 7);
        assert!((m.coil_rim_radius() - 12.0).abs() < 1e-12);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn rejects_zero_counts() {
        assert!(matches!(
            MotorConfig::default().with_counts(0, 4).validate(),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(matches!(
            MotorConfig::default().with_counts(3, 0).validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_counts_over_capacity() {
        assert!(MotorConfig::default().with_counts(MAX_COILS + 1, 4).validate().is_err());
        assert!(MotorConfig::default().with_counts(3, MAX_POLES + 1).validate().is_err());
        assert!(MotorConfig::default().with_counts(MAX_COILS, MAX_POLES).validate().is_ok());
    }

    #[test]
    fn rejects_bad_diameters() {
        assert!(MotorConfig::new(30.0, 30.0, 3, 4).validate().is_err());
        assert!(MotorConfig::new(30.0, 31.0, 3, 4).validate().is_err());
        assert!(MotorConfig::new(0.0, 6.0, 3, 4).validate().is_err());
        assert!(MotorConfig::new(30.0, -1.0, 3, 4).validate().is_err());
        assert!(MotorConfig::new(f64::NAN, 6.0, 3, 4).validate().is_err());
        assert!(MotorConfig::new(f64::INFINITY, 6.0, 3, 4).validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let m: MotorConfig = toml::from_str("pole_count = 8").unwrap();
        assert_eq!(m.pole_count, 8);
        assert_eq!(m.coil_count, DEFAULT_COIL_COUNT);
        assert_eq!(m.outer_diameter, DEFAULT_OUTER_DIAMETER);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<MotorConfig>("rotor_count = 8").is_err());
    }
}
