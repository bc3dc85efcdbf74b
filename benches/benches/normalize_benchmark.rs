//! Normalization benchmarks.
//!
//! Run with: `cargo bench --package sessionbars-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sessionbars_bench::day_payload;
use sessionbars_lib::prelude::*;
use std::hint::black_box;

/// Payload sizes in minutes: one hour, a regular session, a full extended day.
const SIZES: [usize; 3] = [60, 390, 960];

fn normalize_benchmark(c: &mut Criterion) {
    let market = Market::new("NASDAQ", -14400);
    let normalizer = Normalizer::new();

    let mut group = c.benchmark_group("normalize");
    for minutes in SIZES {
        let record = RawRecord::pending("bench", "NASDAQ", "AAPL", day_payload(minutes, 13));
        group.throughput(Throughput::Elements(minutes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(minutes), &record, |b, record| {
            b.iter(|| normalizer.process(black_box(record), &market));
        });
    }
    group.finish();
}

fn driver_benchmark(c: &mut Criterion) {
    let markets = MarketRegistry::new([Market::new("NASDAQ", -14400)])
        .expect("single market registry is valid");
    let payload = day_payload(960, 13);
    let selection = Selection::market("NASDAQ");

    let mut group = c.benchmark_group("driver");
    group.throughput(Throughput::Elements(20));
    group.bench_function("memory_20_records", |b| {
        b.iter_with_setup(
            || {
                let records = MemoryRecordStore::with_records((0..20).map(|i| {
                    RawRecord::pending(format!("r{i:02}"), "NASDAQ", "AAPL", payload.clone())
                }));
                Driver::new(&markets, records, MemoryBarStore::new())
            },
            |driver| driver.run(black_box(&selection)),
        );
    });
    group.finish();
}

criterion_group!(benches, normalize_benchmark, driver_benchmark);
criterion_main!(benches);
