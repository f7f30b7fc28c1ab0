//! Simulation micro-benchmark.
//!
//! Measures the cost of the individual pipeline stages:
//! - Alignment scan for one model
//! - A single step
//! - A full-revolution run
//! - A parallel sweep

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use srm_common::motor::MotorConfig;
use srm_sim::model::MotorModel;
use srm_sim::run::run;
use srm_sim::sweep::sweep;

fn reference_motor() -> MotorConfig {
    MotorConfig::new(30.0, 6.0, 6, 8)
}

fn bench_alignments(c: &mut Criterion) {
    let model = MotorModel::new(reference_motor()).unwrap();

    c.bench_function("alignments_6x8", |b| {
        b.iter(|| black_box(&model).alignments());
    });
}

fn bench_single_step(c: &mut Criterion) {
    c.bench_function("step_6x8", |b| {
        b.iter_batched(
            || MotorModel::new(reference_motor()).unwrap(),
            |mut model| model.step(),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run");
    for (coils, poles) in [(3, 4), (6, 8), (3, 10)] {
        let motor = MotorConfig::new(30.0, 6.0, coils, poles);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{coils}x{poles}")),
            &motor,
            |b, motor| b.iter(|| run(black_box(motor))),
        );
    }
    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_12");
    group.sample_size(20);
    for threads in [1, 0] {
        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, &t| {
            b.iter(|| sweep(&MotorConfig::default(), 12, t));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_alignments,
    bench_single_step,
    bench_run,
    bench_sweep,
);
criterion_main!(benches);
