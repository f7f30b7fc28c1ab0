//! Configuration sweep.
//!
//! Runs every `(coil_count, pole_count)` pair in `1..=max_count` on a fresh
//! model and ranks the results for comparison. Runs share no state, so the
//! pairs are split across scoped worker threads; output order is the
//! enumeration order (coils outer, poles inner) regardless of scheduling.

use crate::run::{RunResult, run};
use parking_lot::Mutex;
use srm_common::config::ConfigError;
use srm_common::consts::{MAX_COILS, MAX_POLES};
use srm_common::motor::MotorConfig;
use std::cmp::Ordering;
use std::num::NonZeroUsize;
use std::time::Instant;
use tracing::{debug, info};

/// Run all count combinations with the diameters of `base`.
///
/// `threads == 0` uses the available parallelism.
///
/// # Errors
/// `ConfigError::ValidationError` if the diameters are invalid or
/// `max_count` is outside `1..=min(MAX_COILS, MAX_POLES)`.
pub fn sweep(
    base: &MotorConfig,
    max_count: usize,
    threads: usize,
) -> Result<Vec<RunResult>, ConfigError> {
    let cap = MAX_COILS.min(MAX_POLES);
    if max_count == 0 || max_count > cap {
        return Err(ConfigError::ValidationError(format!(
            "sweep size must be in 1..={cap}, got {max_count}"
        )));
    }
    base.with_counts(1, 1).validate()?;

    let pairs: Vec<(usize, usize)> = (1..=max_count)
        .flat_map(|c| (1..=max_count).map(move |p| (c, p)))
        .collect();

    let workers = resolve_threads(threads).min(pairs.len());
    let chunk_size = pairs.len().div_ceil(workers);
    let started = Instant::now();
    debug!(
        "Sweeping {} configurations on {} workers",
        pairs.len(),
        workers
    );

    let collected: Mutex<Vec<(usize, Result<RunResult, ConfigError>)>> =
        Mutex::new(Vec::with_capacity(pairs.len()));

    std::thread::scope(|s| {
        for (chunk_index, chunk) in pairs.chunks(chunk_size).enumerate() {
            let collected = &collected;
            s.spawn(move || {
                let offset = chunk_index * chunk_size;
                let local: Vec<_> = chunk
                    .iter()
                    .enumerate()
                    .map(|(i, &(c, p))| (offset + i, run(&base.with_counts(c, p))))
                    .collect();
                collected.lock().extend(local);
            });
        }
    });

    let mut collected = collected.into_inner();
    collected.sort_by_key(|(index, _)| *index);
    let results = collected
        .into_iter()
        .map(|(_, r)| r)
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "Swept {} configurations in {:?}: {} succeeded",
        results.len(),
        started.elapsed(),
        results.iter().filter(|r| r.is_success()).count()
    );
    Ok(results)
}

fn resolve_threads(threads: usize) -> usize {
    if threads > 0 {
        return threads;
    }
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Ranking score: -1 for success, 0.5 for a failure that also interfered
/// with the trailing pole, 1 for any other failure. Lower is better.
pub fn score(result: &RunResult) -> f64 {
    match result.error {
        None => -1.0,
        Some(_) if result.negative_overlap_percent > 0.0 => 0.5,
        Some(_) => 1.0,
    }
}

/// Sweep order: score, then step angle, then coil count, then pole count.
pub fn compare(a: &RunResult, b: &RunResult) -> Ordering {
    score(a)
        .total_cmp(&score(b))
        .then_with(|| a.step_angle.total_cmp(&b.step_angle))
        .then_with(|| a.coil_count.cmp(&b.coil_count))
        .then_with(|| a.pole_count.cmp(&b.pole_count))
}

/// Sort results best first.
pub fn rank(results: &mut [RunResult]) {
    results.sort_by(compare);
}
