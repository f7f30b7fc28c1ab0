//! Sweep and ranking tests.

use proptest::prelude::*;
use srm_common::error::SimError;
use srm_common::motor::MotorConfig;
use srm_sim::run::{RunResult, run};
use srm_sim::sweep::{compare, rank, score, sweep};
use std::cmp::Ordering;

#[test]
fn sweep_matches_individual_runs() {
    let base = MotorConfig::new(40.0, 8.0, 1, 1);
    let results = sweep(&base, 5, 3).unwrap();

    for r in &results {
        let single = run(&base.with_counts(r.coil_count, r.pole_count)).unwrap();
        assert_eq!(r, &single);
    }
}

#[test]
fn ranking_puts_smallest_successful_step_first() {
    let mut results = sweep(&MotorConfig::default(), 12, 0).unwrap();
    rank(&mut results);

    let first = &results[0];
    assert!(first.is_success());
    let smallest = results
        .iter()
        .filter(|r| r.is_success())
        .map(|r| r.step_angle)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(first.step_angle, smallest);

    // Successes first, then interfering failures, then the rest.
    let scores: Vec<f64> = results.iter().map(score).collect();
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(score(results.last().unwrap()), 1.0);
}

fn arbitrary_result() -> impl Strategy<Value = RunResult> {
    (
        1usize..6,
        1usize..6,
        prop::sample::select(vec![0.0, 12.0, 15.0, 30.0, 60.0]),
        prop::sample::select(vec![0.0, 8.0]),
        prop::option::of(Just(SimError::Chaotic)),
    )
        .prop_map(|(coils, poles, step_angle, negative, error)| RunResult {
            coil_count: coils,
            pole_count: poles,
            component_count: coils + poles,
            steps_taken: 0,
            step_angle,
            overlap_percent: 0.0,
            negative_overlap_percent: negative,
            rotor_integrity_percent: 100.0,
            error,
        })
}

proptest! {
    #[test]
    fn compare_is_antisymmetric(a in arbitrary_result(), b in arbitrary_result()) {
        prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
    }

    #[test]
    fn compare_is_transitive(
        a in arbitrary_result(),
        b in arbitrary_result(),
        c in arbitrary_result(),
    ) {
        if compare(&a, &b) != Ordering::Greater && compare(&b, &c) != Ordering::Greater {
            prop_assert_ne!(compare(&a, &c), Ordering::Greater);
        }
    }

    #[test]
    fn rank_is_stable_under_reordering(mut results in prop::collection::vec(arbitrary_result(), 0..20)) {
        let mut forward = results.clone();
        rank(&mut forward);
        results.reverse();
        rank(&mut results);

        let key = |r: &RunResult| (score(r).to_bits(), r.step_angle.to_bits(), r.coil_count, r.pole_count);
        prop_assert_eq!(
            forward.iter().map(key).collect::<Vec<_>>(),
            results.iter().map(key).collect::<Vec<_>>()
        );
    }
}
