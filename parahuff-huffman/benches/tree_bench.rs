//! Benchmarks for deterministic Huffman tree construction.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use parahuff_huffman::{histogram, tree};
use std::hint::black_box;

mod test_data {
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    pub fn skewed(size: usize) -> Vec<u8> {
        let mut seed: u64 = 0x2545F4914F6CDD1D;
        (0..size)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                // biased towards low byte values
                ((seed >> 56) % 16) as u8
            })
            .collect()
    }

    pub fn all_distinct(size: usize) -> Vec<u8> {
        (0..size).map(|i| (i % 256) as u8).collect()
    }
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");

    let sizes = [("1KB", 1024usize), ("64KB", 64 * 1024), ("1MB", 1024 * 1024)];

    for (name, size) in sizes {
        let data = test_data::uniform(size);
        let hist = histogram::compute(&data);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("uniform", name), &hist, |b, hist| {
            b.iter(|| {
                let (pool, root) = tree::build(black_box(hist));
                black_box((pool, root));
            });
        });
    }

    let skewed_hist = histogram::compute(&test_data::skewed(64 * 1024));
    group.bench_function("skewed_64kb", |b| {
        b.iter(|| {
            let (pool, root) = tree::build(black_box(&skewed_hist));
            black_box((pool, root));
        });
    });

    let distinct_hist = histogram::compute(&test_data::all_distinct(4096));
    group.bench_function("all_256_distinct", |b| {
        b.iter(|| {
            let (pool, root) = tree::build(black_box(&distinct_hist));
            black_box((pool, root));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_tree_build);
criterion_main!(benches);
