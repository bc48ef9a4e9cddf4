//! # Effect Pool Benchmark
//!
//! Per-frame cost of spawn, tick and render for a full pool.
//!
//! Run with: `cargo bench --package embergrid_rendering --bench effect_pool_benchmark`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use embergrid_core::{Rgb, Vec2};
use embergrid_rendering::{CommandRecorder, EffectKind, EffectPool, Surface, TrailStyle};

const KINDS: [EffectKind; 8] = [
    EffectKind::GhostAfterimage,
    EffectKind::FireEmber,
    EffectKind::Footprint,
    EffectKind::FrostMark,
    EffectKind::LavaMark,
    EffectKind::Spark,
    EffectKind::MenuMote,
    EffectKind::CosmeticTrail(TrailStyle::Rainbow),
];

fn full_pool() -> EffectPool {
    let mut pool = EffectPool::new();
    for i in 0..pool.capacity() {
        #[allow(clippy::cast_precision_loss)]
        let at = Vec2::new(20.0 + (i % 10) as f32 * 80.0, 20.0 + (i / 10) as f32 * 80.0);
        pool.spawn_simple(KINDS[i % KINDS.len()], at, 1.0, Rgb::hex(0xFF_80_40));
    }
    pool
}

fn bench_spawn_storm(c: &mut Criterion) {
    let mut pool: EffectPool = EffectPool::new();
    c.bench_function("effect_pool_spawn_1000", |b| {
        b.iter(|| {
            for i in 0..1000_u32 {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f32;
                pool.spawn_simple(EffectKind::Spark, Vec2::new(x, x), 0.5, Rgb::WHITE);
            }
            black_box(pool.active_count())
        });
    });
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("effect_pool_tick_full", |b| {
        b.iter_batched(
            full_pool,
            |mut pool| {
                pool.tick(black_box(1.0 / 60.0));
                pool
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_render(c: &mut Criterion) {
    let pool = full_pool();

    c.bench_function("effect_pool_render_recorder", |b| {
        let mut rec = CommandRecorder::new(960, 640);
        b.iter(|| {
            rec.clear();
            pool.render(&mut rec, black_box(1.5));
            black_box(rec.commands().len())
        });
    });

    c.bench_function("effect_pool_render_surface", |b| {
        let mut surface = Surface::new(960, 640);
        b.iter(|| {
            pool.render(&mut surface, black_box(1.5));
        });
    });
}

criterion_group!(benches, bench_spawn_storm, bench_tick, bench_render);
criterion_main!(benches);
