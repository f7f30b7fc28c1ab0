//! Coil-to-pole alignment.
//!
//! For one coil, find the nearest pole under the current rotor angle and the
//! signed angular distance to it. Angles are measured clockwise from the
//! reference axis; a negative signed angle means the pole still has to
//! advance (rotor angle increasing) to reach the coil.

use crate::model::MotorModel;
use serde::{Deserialize, Serialize};
use srm_common::consts::{EPSILON, MAX_COILS};
use tracing::trace;

/// Nearest pole of one coil.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Coil this alignment belongs to.
    pub coil_index: usize,
    /// Nearest pole (first in index order on ties).
    pub pole_index: usize,
    /// Signed angle from coil to pole, degrees in (-180, 180].
    pub signed_angle: f64,
    /// `|signed_angle|`.
    pub absolute_angle: f64,
    /// Two non-aligned poles are equidistant from the coil.
    pub is_ambiguous: bool,
}

impl Alignment {
    /// Pole is approaching the coil in the direction of rotation.
    #[inline]
    pub fn is_approaching(&self) -> bool {
        self.signed_angle < -EPSILON
    }

    /// Pole sits on the coil within tolerance.
    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.absolute_angle <= EPSILON
    }
}

/// Alignments of every coil, in coil order.
pub type Alignments = heapless::Vec<Alignment, MAX_COILS>;

/// Point on the unit circle for an angle measured clockwise from the
/// reference axis.
#[inline]
fn unit_vector(angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (rad.sin(), rad.cos())
}

/// Signed angle (degrees) rotating vector `from` onto vector `to`, in
/// (-180, 180]. Positive when `to` lies clockwise of `from`.
pub fn signed_angle_deg(from_deg: f64, to_deg: f64) -> f64 {
    let (x1, y1) = unit_vector(from_deg);
    let (x2, y2) = unit_vector(to_deg);
    let sin = y1 * x2 - x1 * y2;
    let cos = x1 * x2 + y1 * y2;
    let angle = sin.atan2(cos).to_degrees();
    if angle <= -180.0 { angle + 360.0 } else { angle }
}

impl MotorModel {
    /// Nearest pole to coil `coil_index` under the current rotor angle.
    ///
    /// # Panics
    /// If `coil_index >= coil_count`.
    pub(crate) fn nearest_pole(&self, coil_index: usize) -> Alignment {
        let coil_angle = self.coil_angles()[coil_index];

        let mut pole_index = 0;
        let mut signed_angle = signed_angle_deg(coil_angle, self.pole_angle(0));
        // Two smallest non-aligned distances, for the tie check.
        let mut closest = f64::INFINITY;
        let mut second = f64::INFINITY;

        for pole in 0..self.pole_count() {
            let d = signed_angle_deg(coil_angle, self.pole_angle(pole));
            let abs = d.abs();
            // Poles within EPSILON of the best keep the lower index.
            if abs < signed_angle.abs() - EPSILON {
                signed_angle = d;
                pole_index = pole;
            }
            if abs > EPSILON {
                if abs < closest {
                    second = closest;
                    closest = abs;
                } else if abs < second {
                    second = abs;
                }
            }
        }

        let is_ambiguous = second.is_finite() && (second - closest).abs() < EPSILON;

        Alignment {
            coil_index,
            pole_index,
            signed_angle,
            absolute_angle: signed_angle.abs(),
            is_ambiguous,
        }
    }

    /// Alignment of every coil under the current rotor angle.
    pub fn alignments(&self) -> Alignments {
        let mut all = Alignments::new();
        for coil in 0..self.coil_count() {
            let a = self.nearest_pole(coil);
            trace!(
                "L{} -> P{}: {:.3}°{}",
                a.coil_index,
                a.pole_index,
                a.signed_angle,
                if a.is_ambiguous { " (ambiguous)" } else { "" }
            );
            // coil_count <= MAX_COILS is enforced at construction.
            let _ = all.push(a);
        }
        all
    }
}
