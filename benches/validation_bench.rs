//! Benchmarks for the validation checks.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::cast_precision_loss,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use verificar::{
    datasets::{transactions, TransactionRecord},
    validation, ArrowDataset,
};

fn create_dataset(rows: usize) -> ArrowDataset {
    let records: Vec<TransactionRecord> = (0..rows)
        .map(|i| {
            TransactionRecord::new(
                &format!("TXN{i:08}"),
                1.0 + (i % 1000) as f64 * 1.5,
                "2024-01-01",
                &format!("CUST{:05}", i % 5000),
            )
        })
        .collect();

    transactions(&records).expect("Failed to create dataset")
}

fn bench_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("checks");

    for size in [1_000, 10_000, 100_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("amount_range", size), &dataset, |b, ds| {
            b.iter(|| validation::check_amount_range(black_box(ds)));
        });
        group.bench_with_input(BenchmarkId::new("unique_ids", size), &dataset, |b, ds| {
            b.iter(|| validation::check_unique_ids(black_box(ds)));
        });
        group.bench_with_input(BenchmarkId::new("date_format", size), &dataset, |b, ds| {
            b.iter(|| validation::check_date_format(black_box(ds)));
        });
        group.bench_with_input(
            BenchmarkId::new("duplicate_rows", size),
            &dataset,
            |b, ds| {
                b.iter(|| validation::duplicate_row_count(black_box(ds)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_checks);
criterion_main!(benches);
