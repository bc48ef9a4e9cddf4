//! # Effect Pool Integration Test
//!
//! Ring-buffer bound, eviction order, decay and same-frame visibility.

use embergrid_core::{Rgb, Vec2};
use embergrid_rendering::effects::FOOTPRINT_ALPHA;
use embergrid_rendering::{CommandRecorder, DrawCommand, EffectKind, EffectPool};

const GREY: Rgb = Rgb::new(80, 80, 80);

fn max_alpha(rec: &CommandRecorder) -> Option<u8> {
    rec.commands().iter().filter_map(DrawCommand::color).map(|c| c.a).max()
}

/// Test: N+1 spawns leave the 2nd..(N+1)th, never more than N.
#[test]
fn test_ring_buffer_bound() {
    let mut pool: EffectPool = EffectPool::new();
    let n = pool.capacity();

    for i in 0..=n {
        #[allow(clippy::cast_precision_loss)]
        pool.spawn_simple(EffectKind::Spark, Vec2::new(i as f32, 0.0), 60.0, GREY);
        assert!(pool.active_count() <= n);
    }

    let mut xs: Vec<f32> = pool.active_effects().map(|s| s.position().x).collect();
    xs.sort_by(f32::total_cmp);
    #[allow(clippy::cast_precision_loss)]
    let expected: Vec<f32> = (1..=n).map(|i| i as f32).collect();
    assert_eq!(xs, expected);
}

/// Test: capacity 3, spawn A..E, active set is exactly {C, D, E}.
#[test]
fn test_eviction_scenario_a_to_e() {
    let mut pool: EffectPool<3> = EffectPool::new();
    let names = ['A', 'B', 'C', 'D', 'E'];
    for (i, _) in names.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        pool.spawn_simple(EffectKind::Spark, Vec2::new(i as f32, 0.0), 100.0, GREY);
    }

    let mut alive: Vec<char> = pool
        .active_effects()
        .map(|s| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = s.position().x as usize;
            names[index]
        })
        .collect();
    alive.sort_unstable();
    assert_eq!(alive, vec!['C', 'D', 'E']);
    assert_eq!(pool.stats().evicted_live, 2);
}

/// Test: remaining time strictly decreases, the slot dies on the exact tick.
#[test]
fn test_monotonic_decay() {
    let mut pool: EffectPool<4> = EffectPool::new();
    pool.spawn_simple(EffectKind::LavaMark, Vec2::ZERO, 1.0, GREY);

    let mut last = 1.0;
    let mut ticks = 0;
    while pool.active_count() > 0 {
        pool.tick(0.3);
        ticks += 1;
        if let Some(slot) = pool.active_effects().next() {
            assert!(slot.time_remaining() < last);
            last = slot.time_remaining();
        }
        assert!(ticks < 10, "slot never expired");
    }
    // 0.3 * 3 = 0.9 < 1.0, 0.3 * 4 = 1.2 >= 1.0
    assert_eq!(ticks, 4);

    pool.tick(0.3);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.stats().expired_total, 1);
}

/// Test: footprint at (100, 100), 1 s lifetime, half-faded after 0.5 s,
/// gone after another 0.5 s.
#[test]
fn test_footprint_half_fade_scenario() {
    let mut pool: EffectPool = EffectPool::new();
    pool.spawn_simple(EffectKind::Footprint, Vec2::new(100.0, 100.0), 1.0, GREY);

    pool.tick(0.5);
    let slot = pool.active_effects().next().expect("footprint alive");
    assert!((slot.progress() - 0.5).abs() < 1e-6);

    let mut rec = CommandRecorder::new(200, 200);
    pool.render(&mut rec, 0.5);
    let alpha = max_alpha(&rec).expect("footprint drawn");
    let expected = (FOOTPRINT_ALPHA * 0.5 * 255.0).round();
    assert!((f32::from(alpha) - expected).abs() <= 1.0, "alpha {alpha}");
    assert!(rec
        .commands()
        .iter()
        .filter_map(DrawCommand::color)
        .all(|c| c.rgb() == GREY));

    pool.tick(0.5);
    assert_eq!(pool.active_count(), 0);
    let mut rec = CommandRecorder::new(200, 200);
    pool.render(&mut rec, 1.0);
    assert!(rec.commands().is_empty());
}

/// Test: an effect spawned this frame is drawn this frame at full strength.
#[test]
fn test_no_same_frame_flicker() {
    let kinds = [
        EffectKind::GhostAfterimage,
        EffectKind::FireEmber,
        EffectKind::Footprint,
        EffectKind::FrostMark,
        EffectKind::LavaMark,
        EffectKind::Spark,
        EffectKind::MenuMote,
    ];
    for kind in kinds {
        let mut pool: EffectPool<2> = EffectPool::new();
        pool.spawn_simple(kind, Vec2::new(50.0, 50.0), 0.25, GREY);
        let mut rec = CommandRecorder::new(100, 100);
        pool.render(&mut rec, 3.0);
        assert!(max_alpha(&rec).is_some_and(|a| a > 0), "{kind:?} invisible at spawn");
    }
}

/// Test: a degenerate lifetime still renders for the spawn frame.
#[test]
fn test_zero_lifetime_renders_once() {
    let mut pool: EffectPool<2> = EffectPool::new();
    pool.spawn_simple(EffectKind::Spark, Vec2::ZERO, 0.0, GREY);

    let mut rec = CommandRecorder::new(10, 10);
    pool.render(&mut rec, 0.0);
    assert!(rec.paint_count() > 0);

    pool.tick(1.0 / 60.0);
    assert_eq!(pool.active_count(), 0);
}
