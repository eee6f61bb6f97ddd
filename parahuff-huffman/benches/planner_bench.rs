//! Benchmarks for cumulative offset planning across all four scenarios.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use parahuff_huffman::planner::{self, Scenario};
use parahuff_huffman::{CodeBook, histogram, tree};
use std::hint::black_box;

fn random_data(size: usize) -> Vec<u8> {
    let mut seed: u64 = 0x123456789ABCDEF0;
    (0..size)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u8
        })
        .collect()
}

fn book_for(data: &[u8]) -> CodeBook {
    let hist = histogram::compute(data);
    let (pool, root) = tree::build(&hist);
    CodeBook::build(&pool, root)
}

fn bench_plan_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_simple");

    let sizes = [("64KB", 64 * 1024usize), ("1MB", 1024 * 1024)];
    for (name, size) in sizes {
        let data = random_data(size);
        let book = book_for(&data);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &(data, book), |b, (data, book)| {
            b.iter(|| {
                let plan = planner::plan(black_box(data), black_box(book), Scenario::Simple, None);
                black_box(plan);
            });
        });
    }

    group.finish();
}

fn bench_plan_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_chunking");

    let data = random_data(1024 * 1024);
    let book = book_for(&data);
    // Small artificial budget forces many chunk boundaries.
    for budget in [4096u64, 65_536u64] {
        group.bench_with_input(BenchmarkId::from_parameter(budget), &budget, |b, &budget| {
            b.iter(|| {
                let plan = planner::plan(
                    black_box(&data),
                    black_box(&book),
                    Scenario::ChunkingOnly,
                    Some(budget),
                );
                black_box(plan);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plan_simple, bench_plan_chunking);
criterion_main!(benches);
