//! Benchmarks for histogram construction and column profiling.

use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tabscope::compare::histograms::compare_numeric;
use tabscope::histogram::HistogramBuilder;
use tabscope::prelude::*;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn spread_values(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 7_919) % 104_729) as f64 * 0.37).collect()
}

fn bench_numeric_histograms(c: &mut Criterion) {
    let builder = HistogramBuilder::new(vec![10, 15, 30, 50], 10).unwrap();
    let mut group = c.benchmark_group("numeric_histograms");

    for size in SIZES {
        let values = spread_values(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("float", size), &values, |b, values| {
            b.iter(|| builder.build(black_box(values), false));
        });

        let integers: Vec<f64> = values.iter().map(|v| v.trunc()).collect();
        group.bench_with_input(BenchmarkId::new("integer", size), &integers, |b, values| {
            b.iter(|| builder.build(black_box(values), true));
        });
    }

    group.finish();
}

fn bench_compare_histograms(c: &mut Criterion) {
    let builder = HistogramBuilder::new(vec![10, 15, 30, 50], 10).unwrap();
    let mut group = c.benchmark_group("compare_histograms");

    for size in SIZES {
        let left = spread_values(size);
        let right: Vec<f64> = left.iter().map(|v| v * 1.1 + 3.0).collect();
        group.throughput(Throughput::Elements(2 * size as u64));
        group.bench_with_input(
            BenchmarkId::new("union_domain", size),
            &(left, right),
            |b, (left, right)| {
                b.iter(|| compare_numeric(black_box(left), black_box(right), false, &builder));
            },
        );
    }

    group.finish();
}

fn bench_column_profiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_profiling");
    group.measurement_time(Duration::from_secs(8));

    for size in [1_000usize, 10_000] {
        let dataset = Dataset::try_from_columns(vec![
            (
                "id",
                Arc::new(Int64Array::from((0..size as i64).collect::<Vec<_>>())) as ArrayRef,
            ),
            (
                "amount",
                Arc::new(Float64Array::from(spread_values(size))) as ArrayRef,
            ),
            (
                "segment",
                Arc::new(StringArray::from(
                    (0..size).map(|i| format!("s{}", i % 12)).collect::<Vec<_>>(),
                )) as ArrayRef,
            ),
            (
                "comment",
                Arc::new(StringArray::from(
                    (0..size).map(|i| format!("note {i}")).collect::<Vec<_>>(),
                )) as ArrayRef,
            ),
        ])
        .unwrap();

        let profiler = Profiler::new();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("mixed", size), &dataset, |b, dataset| {
            b.iter(|| profiler.profile_columns(black_box(dataset), &ProfileOptions::default()));
        });
        group.bench_with_input(BenchmarkId::new("associations", size), &dataset, |b, dataset| {
            b.iter(|| profiler.associations(black_box(dataset)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_numeric_histograms,
    bench_compare_histograms,
    bench_column_profiling
);
criterion_main!(benches);
