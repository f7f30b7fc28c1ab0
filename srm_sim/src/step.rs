//! Step engine.
//!
//! `Ready → {Advanced, Failed}`. Each call evaluates every coil's alignment,
//! picks the coil whose pole is nearest while approaching, validates the
//! configuration and, only if nothing is wrong, advances the rotor.
//! `Failed` is terminal: later calls return the same error.
//!
//! Validation order (first match wins):
//!
//! | # | Condition                                   | Error                     |
//! |---|---------------------------------------------|---------------------------|
//! | 1 | no approaching pole, < 3 components         | `InsufficientComponents`  |
//! | 1 | no approaching pole, every coil aligned     | `NoMovement`              |
//! | 1 | no approaching pole, nearest tie            | `Chaotic`                 |
//! | 1 | no approaching pole, otherwise              | `InvalidConfiguration`    |
//! | 2 | candidate ≥ 180° away                       | `StepTooLarge`            |
//! | 3 | candidate ambiguous                         | `Chaotic`                 |
//! | 4 | rotor integrity < 0                         | `PolesOverlapping`        |

use crate::alignment::Alignment;
use crate::model::{MotorModel, MotorState, StepPhase, rotor_integrity};
use serde::Serialize;
use srm_common::consts::{EPSILON, FULL_REVOLUTION_DEG, MIN_COMPONENTS};
use srm_common::error::SimError;
use tracing::debug;

/// A committed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepOutcome {
    /// Coil that was energized.
    pub coil_index: usize,
    /// Pole it pulled in.
    pub pole_index: usize,
    /// Rotor advance of this step (degrees, positive).
    pub step_angle: f64,
    /// State after the step.
    pub state: MotorState,
    /// Rotor has turned a full revolution.
    pub revolution_complete: bool,
}

impl MotorModel {
    /// Energize the next coil and advance the rotor.
    ///
    /// On error the motor state is left untouched and the model moves to
    /// [`StepPhase::Failed`].
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        if let StepPhase::Failed(e) = &self.phase {
            return Err(e.clone());
        }

        self.state.rotor_integrity = rotor_integrity(self.config());
        let alignments = self.alignments();

        match select_candidate(
            &alignments,
            self.config().component_count(),
            self.state.rotor_integrity,
        ) {
            Ok(candidate) => Ok(self.commit(&candidate)),
            Err(e) => {
                debug!(
                    "Step rejected at rotor angle {:.3}°: {}",
                    self.state.rotor_angle, e
                );
                self.phase = StepPhase::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Apply a validated candidate to the state.
    fn commit(&mut self, candidate: &Alignment) -> StepOutcome {
        if self.pole_count() > 1 {
            // Interference with the pole trailing the one being pulled in.
            let trailing = (candidate.pole_index + 1) % self.pole_count();
            let gap = self.pole_angle(trailing) - self.coil_angles()[candidate.coil_index];
            let interference = self.overlap(gap);
            let tracked = self.state.negative_overlap;
            if interference > 0.0 && (interference > tracked || tracked == 0.0) {
                debug!(
                    "Trailing pole P{} overlaps coil L{} by {:.1}%",
                    trailing,
                    candidate.coil_index,
                    100.0 * interference
                );
                self.state.negative_overlap = interference;
            }
        }

        let step_angle = -candidate.signed_angle;
        self.state.last_step_angle = step_angle;
        self.state.rotor_angle += step_angle;

        debug!(
            "L{} pulls P{}: step {:.3}°, rotor at {:.3}°",
            candidate.coil_index, candidate.pole_index, step_angle, self.state.rotor_angle
        );

        StepOutcome {
            coil_index: candidate.coil_index,
            pole_index: candidate.pole_index,
            step_angle,
            state: self.state,
            revolution_complete: self.state.rotor_angle >= FULL_REVOLUTION_DEG - EPSILON,
        }
    }
}

/// Pick the coil to energize, or diagnose why none can be.
///
/// Pure function of the current alignments; see the module table for the
/// validation order.
pub fn select_candidate(
    alignments: &[Alignment],
    component_count: usize,
    rotor_integrity: f64,
) -> Result<Alignment, SimError> {
    let candidate = alignments
        .iter()
        .filter(|a| a.is_approaching())
        .min_by(|a, b| a.absolute_angle.total_cmp(&b.absolute_angle))
        .copied();

    let Some(candidate) = candidate else {
        return Err(diagnose_stall(alignments, component_count));
    };

    if candidate.absolute_angle >= 180.0 - EPSILON {
        return Err(SimError::StepTooLarge {
            angle: candidate.absolute_angle,
        });
    }
    if candidate.is_ambiguous {
        return Err(SimError::Chaotic);
    }
    if rotor_integrity < 0.0 {
        return Err(SimError::PolesOverlapping {
            integrity: rotor_integrity,
        });
    }
    Ok(candidate)
}

/// No pole is approaching any coil.
fn diagnose_stall(alignments: &[Alignment], component_count: usize) -> SimError {
    if component_count < MIN_COMPONENTS {
        return SimError::InsufficientComponents;
    }
    if alignments.iter().all(Alignment::is_aligned) {
        return SimError::NoMovement;
    }
    let nearest = alignments
        .iter()
        .filter(|a| !a.is_aligned())
        .min_by(|a, b| a.absolute_angle.total_cmp(&b.absolute_angle));
    match nearest {
        Some(a) if a.is_ambiguous => SimError::Chaotic,
        _ => SimError::InvalidConfiguration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srm_common::motor::MotorConfig;

    fn align(coil: usize, signed: f64, ambiguous: bool) -> Alignment {
        Alignment {
            coil_index: coil,
            pole_index: coil,
            signed_angle: signed,
            absolute_angle: signed.abs(),
            is_ambiguous: ambiguous,
        }
    }

    fn model(coils: usize, poles: usize) -> MotorModel {
        MotorModel::new(MotorConfig::new(30.0, 6.0, coils, poles)).unwrap()
    }

    #[test]
    fn picks_nearest_approaching_pole() {
        let all = [
            align(0, 0.0, false),
            align(1, -40.0, false),
            align(2, -20.0, false),
            align(3, 5.0, false),
        ];
        let c = select_candidate(&all, 8, 50.0).unwrap();
        assert_eq!(c.coil_index, 2);
    }

    #[test]
    fn first_coil_wins_equal_candidates() {
        let all = [align(0, -20.0, false), align(1, -20.0, false)];
        assert_eq!(select_candidate(&all, 4, 50.0).unwrap().coil_index, 0);
    }

    #[test]
    fn insufficient_components_checked_first() {
        let all = [align(0, 0.0, false)];
        assert_eq!(
            select_candidate(&all, 2, 100.0),
            Err(SimError::InsufficientComponents)
        );
    }

    #[test]
    fn all_aligned_is_no_movement() {
        let all = [align(0, 0.0, false), align(1, 1e-7, false)];
        assert_eq!(select_candidate(&all, 4, 100.0), Err(SimError::NoMovement));
    }

    #[test]
    fn stalled_tie_is_chaotic() {
        let all = [align(0, 0.0, false), align(1, 60.0, true), align(2, 90.0, false)];
        assert_eq!(select_candidate(&all, 5, 100.0), Err(SimError::Chaotic));
    }

    #[test]
    fn stalled_without_tie_is_invalid() {
        let all = [align(0, 0.0, false), align(1, 180.0, false)];
        assert_eq!(
            select_candidate(&all, 3, 100.0),
            Err(SimError::InvalidConfiguration)
        );
    }

    #[test]
    fn half_turn_candidate_is_too_large() {
        let all = [align(0, -179.9999995, true)];
        assert!(matches!(
            select_candidate(&all, 4, -10.0),
            Err(SimError::StepTooLarge { .. })
        ));
    }

    #[test]
    fn ambiguous_candidate_beats_overlapping_poles() {
        let all = [align(0, -30.0, true)];
        assert_eq!(select_candidate(&all, 4, -10.0), Err(SimError::Chaotic));
    }

    #[test]
    fn negative_integrity_fails_last() {
        let all = [align(0, -30.0, false)];
        assert_eq!(
            select_candidate(&all, 4, -10.0),
            Err(SimError::PolesOverlapping { integrity: -10.0 })
        );
    }

    #[test]
    fn classic_motor_first_step() {
        let mut m = model(3, 4);
        let outcome = m.step().unwrap();
        assert_eq!(outcome.coil_index, 1);
        assert_eq!(outcome.pole_index, 1);
        assert!((outcome.step_angle - 30.0).abs() < 1e-9);
        assert!((m.state().rotor_angle - 30.0).abs() < 1e-9);
        assert!(!outcome.revolution_complete);
        assert_eq!(m.state().negative_overlap, 0.0);
    }

    #[test]
    fn classic_motor_completes_in_twelve_steps() {
        let mut m = model(3, 4);
        let mut steps = 0;
        loop {
            let outcome = m.step().unwrap();
            steps += 1;
            if outcome.revolution_complete {
                break;
            }
            assert!(steps < 12);
        }
        assert_eq!(steps, 12);
        assert!((m.state().rotor_angle - 360.0).abs() < 1e-6);
    }

    #[test]
    fn failure_leaves_state_untouched_and_sticks() {
        let mut m = model(1, 2);
        let before = m.state();
        assert_eq!(m.step(), Err(SimError::NoMovement));
        assert_eq!(m.state(), before);
        assert_eq!(m.phase(), &StepPhase::Failed(SimError::NoMovement));
        assert_eq!(m.step(), Err(SimError::NoMovement));
    }

    #[test]
    fn crowded_rotor_overlaps() {
        let mut m = model(3, 20);
        assert!(matches!(m.step(), Err(SimError::PolesOverlapping { integrity }) if integrity < 0.0));
    }

    #[test]
    fn trailing_pole_interference_is_tracked() {
        // 3 coils / 10 poles on a 30/6 motor: trailing pole clips the coil.
        let mut m = model(3, 10);
        m.step().unwrap();
        assert!(m.state().negative_overlap > 0.0);
    }
}
