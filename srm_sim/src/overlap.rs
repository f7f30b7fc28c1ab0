//! Coil/pole footprint overlap.
//!
//! Coil and pole are circles of radius `coil_diameter / 2` on the coil rim.
//! For an angular separation the centers are a chord apart; the overlap is
//! the lens-shaped intersection area divided by one circle's area.

use crate::model::MotorModel;
use srm_common::motor::MotorConfig;
use std::f64::consts::PI;

/// Fraction in `[0, 1]` of a coil covered by a pole `angle_deg` away.
pub fn overlap(config: &MotorConfig, angle_deg: f64) -> f64 {
    let r = config.coil_diameter / 2.0;
    let x = (2.0 * config.coil_rim_radius() * (angle_deg.to_radians() / 2.0).sin()).abs();
    if x >= 2.0 * r {
        return 0.0;
    }
    let lens = 2.0 * r * r * (x / (2.0 * r)).acos() - (x / 2.0) * (4.0 * r * r - x * x).sqrt();
    (lens / (PI * r * r)).clamp(0.0, 1.0)
}

impl MotorModel {
    /// [`overlap`] for this model's geometry.
    #[inline]
    pub fn overlap(&self, angle_deg: f64) -> f64 {
        overlap(self.config(), angle_deg)
    }
}
