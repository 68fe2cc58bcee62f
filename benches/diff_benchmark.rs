//! Benchmarks for the reconciliation engine.
//!
//! Run with: cargo bench --bench diff_benchmark
//!
//! Matching is a linear scan per record, so cost grows with the product of
//! the snapshot sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use keyed_diff::config::{CountFields, DiffOptions};
use keyed_diff::diff::DiffEngine;
use keyed_diff::model::Record;
use serde_json::json;
use std::hint::black_box;

/// Generate a snapshot of `count` records keyed 0..count.
fn generate_snapshot(count: usize, revision: u32) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let mut record = Record::new();
            record.insert("id".to_string(), json!(i));
            record.insert("name".to_string(), json!(format!("record-{i}")));
            record.insert("revision".to_string(), json!(revision));
            record
        })
        .collect()
}

/// Generate an old/new pair where roughly 10% of records changed, 10% were
/// deleted and 10% added.
fn generate_snapshot_pair(size: usize) -> (Vec<Record>, Vec<Record>) {
    let old = generate_snapshot(size, 1);
    let step = 10;

    let mut new: Vec<Record> = old
        .iter()
        .enumerate()
        .filter(|(i, _)| i % step != 1)
        .map(|(i, record)| {
            let mut record = record.clone();
            if i % step == 0 {
                record.insert("revision".to_string(), json!(2));
            }
            record
        })
        .collect();
    new.extend((size..size + size / step).map(|i| {
        let mut record = Record::new();
        record.insert("id".to_string(), json!(i));
        record.insert("name".to_string(), json!(format!("record-{i}")));
        record
    }));

    (old, new)
}

fn bench_diff(c: &mut Criterion) {
    let options = DiffOptions::new()
        .fields(CountFields::all())
        .resolve()
        .expect("default options resolve");
    let engine = DiffEngine::new(&options);

    let mut group = c.benchmark_group("diff");
    for size in [100, 500, 1000] {
        let (old, new) = generate_snapshot_pair(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(engine.diff(black_box(&new), black_box(&old))));
        });
    }
    group.finish();
}

fn bench_diff_with_sort(c: &mut Criterion) {
    let options = DiffOptions::new()
        .detector_named("never")
        .resolve()
        .expect("options resolve");
    let engine = DiffEngine::new(&options);

    let mut group = c.benchmark_group("diff_with_sort");
    for size in [100, 500, 1000] {
        let old = generate_snapshot(size, 1);
        let mut new = old.clone();
        new.reverse();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(engine.diff_with_sort(black_box(&new), black_box(&old))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diff, bench_diff_with_sort);
criterion_main!(benches);
