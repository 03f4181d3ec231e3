use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use pcalg_causal::{OrientationEngine, PcEngine, SkeletonEstimator};
use pcalg_core::config::{OrientationConfig, SkeletonConfig};
use pcalg_core::PcConfig;
use test_fixtures::{DagOracle, TrueDag};

/// Sparse random DAG with roughly two parents per vertex.
fn sparse_dag(n: usize) -> TrueDag {
    TrueDag::random(n, 4.0 / n as f64, 7)
}

fn bench_skeleton(c: &mut Criterion) {
    let mut group = c.benchmark_group("skeleton");
    for n in [10, 20, 30] {
        let oracle = DagOracle::new(sparse_dag(n));
        group.bench_with_input(BenchmarkId::new("stable", n), &n, |b, &n| {
            b.iter(|| SkeletonEstimator::new(&oracle, SkeletonConfig::default()).estimate(n));
        });
        let parallel = SkeletonConfig {
            parallel: true,
            ..SkeletonConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("stable_parallel", n), &n, |b, &n| {
            b.iter(|| SkeletonEstimator::new(&oracle, parallel.clone()).estimate(n));
        });
    }
    group.finish();
}

fn bench_orientation(c: &mut Criterion) {
    let n = 30;
    let oracle = DagOracle::new(sparse_dag(n));
    let skeleton = SkeletonEstimator::new(&oracle, SkeletonConfig::default())
        .estimate(n)
        .unwrap();
    let engine = OrientationEngine::new(OrientationConfig::default());

    c.bench_function("orientation_30_vertices", |b| {
        b.iter(|| engine.orient_skeleton(&skeleton));
    });
}

fn bench_full_run(c: &mut Criterion) {
    let engine = PcEngine::new(DagOracle::new(sparse_dag(20)), PcConfig::default());
    c.bench_function("pc_run_20_vertices", |b| {
        b.iter(|| engine.run(20));
    });
}

criterion_group!(benches, bench_skeleton, bench_orientation, bench_full_run);
criterion_main!(benches);
