//! Benchmarks for chunksim.
//!
//! Run with:
//!     cargo bench

use std::io::Cursor;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use chunksim::{DigestSequence, digest_bytes, digest_reader, similarity, sum_reader};

fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");

    for size in [64 * 1024, 1024 * 1024, 10 * 1024 * 1024] {
        // Deterministic pseudo-random data
        let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("bytes_{}kb", size / 1024), &data, |b, data| {
            b.iter(|| black_box(digest_bytes(black_box(data), 1024).unwrap().len()));
        });

        group.bench_with_input(format!("reader_{}kb", size / 1024), &data, |b, data| {
            b.iter(|| {
                let digest = digest_reader(Cursor::new(black_box(data)), 1024).unwrap();
                black_box(digest.len())
            });
        });
    }

    group.finish();
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_sizes");
    let size = 1024 * 1024; // 1 MB
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));

    for chunk_size in [256, 1024, 16 * 1024] {
        group.bench_function(format!("reader_{}", chunk_size), |b| {
            b.iter(|| {
                let digest = digest_reader(Cursor::new(black_box(&data)), chunk_size).unwrap();
                black_box(digest.len())
            });
        });
    }

    group.bench_function("whole_file_sum", |b| {
        b.iter(|| {
            let total = sum_reader(Cursor::new(black_box(&data)), 64 * 1024).unwrap();
            black_box(total.sum)
        });
    });

    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");

    let a: DigestSequence = (0..10_000u32).map(chunksim::ChunkChecksum::new).collect();
    let b: DigestSequence = (0..10_000u32)
        .map(|i| chunksim::ChunkChecksum::new(if i % 3 == 0 { i } else { i + 1 }))
        .collect();

    group.bench_function("10k_blocks", |bench| {
        bench.iter(|| black_box(similarity(black_box(&a), black_box(&b))));
    });

    group.finish();
}

criterion_group!(benches, bench_digest, bench_chunk_sizes, bench_similarity);
criterion_main!(benches);
