//! Benchmarks for series resampling and dataset construction.
//!
//! Run with: cargo bench -p mhviz-model --bench resample_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mhviz_model::curve::ExponentialApproach;
use mhviz_model::{SampleDataset, resample};
use std::hint::black_box;

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("model/resample");
    for len in [1_000u32, 10_000, 100_000] {
        let points = ExponentialApproach::new(0.0, 1.0, f64::from(len) / 5.0).points(len);
        group.throughput(Throughput::Elements(u64::from(len)));
        for stride in [1usize, 20, 100] {
            group.bench_with_input(
                BenchmarkId::new(format!("stride_{stride}"), len),
                &points,
                |b, points| b.iter(|| black_box(resample(black_box(points), stride))),
            );
        }
    }
    group.finish();
}

fn bench_sample_dataset(c: &mut Criterion) {
    let mut group = c.benchmark_group("model/sample_dataset");
    group.bench_function("build", |b| {
        b.iter(|| black_box(SampleDataset::new().build()))
    });
    group.bench_function("validate", |b| {
        let dataset = SampleDataset::new().build();
        b.iter(|| black_box(dataset.validate()))
    });
    group.finish();
}

criterion_group!(benches, bench_resample, bench_sample_dataset);
criterion_main!(benches);
