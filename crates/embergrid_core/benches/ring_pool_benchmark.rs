//! # Ring Pool Benchmark
//!
//! Spawn storms must cost O(1) per write no matter how many writes land
//! in a frame.
//!
//! Run with: `cargo bench --package embergrid_core`

#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use embergrid_core::RingPool;

#[derive(Clone, Copy, Default)]
struct Payload {
    position: [f32; 2],
    life: [f32; 2],
    color: [u8; 8],
    extra: f32,
    active: bool,
}

fn bench_write_storm(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_pool_write_storm");

    for writes in [40_usize, 1_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(writes), &writes, |b, &writes| {
            let mut pool: RingPool<Payload, 40> = RingPool::new();
            b.iter(|| {
                for i in 0..writes {
                    #[allow(clippy::cast_precision_loss)]
                    let x = i as f32;
                    black_box(pool.write(Payload {
                        position: [x, x],
                        life: [1.0, 1.0],
                        active: true,
                        ..Payload::default()
                    }));
                }
            });
        });
    }

    group.finish();
}

fn bench_full_scan(c: &mut Criterion) {
    let mut pool: RingPool<Payload, 40> = RingPool::new();
    for _ in 0..40 {
        pool.write(Payload { active: true, ..Payload::default() });
    }
    c.bench_function("ring_pool_scan_40", |b| {
        b.iter(|| black_box(pool.iter().filter(|p| p.active).count()));
    });
}

criterion_group!(benches, bench_write_storm, bench_full_scan);
criterion_main!(benches);
