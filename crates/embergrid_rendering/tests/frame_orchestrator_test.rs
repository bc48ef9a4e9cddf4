//! # Frame Orchestrator Integration Test
//!
//! Drives whole frames: floor caching, spawn rules, layer order and
//! same-frame visibility of freshly spawned effects.

use embergrid_core::{Rgb, Vec2};
use embergrid_rendering::effects::FOOTPRINT_ALPHA;
use embergrid_rendering::theme::ThemeSource;
use embergrid_rendering::{
    rasterize_floor, CommandRecorder, DrawCommand, EffectKind, EntityFlags, EntityKind,
    EntitySnapshot, FloorKey, FloorLayout, FrameOrchestrator, RenderConfig, Surface, ThemeTable,
    VisualStyle, WorldSnapshot,
};

const DT: f32 = 1.0 / 60.0;

fn walking_player(x: f32) -> EntitySnapshot {
    EntitySnapshot::new(1, EntityKind::Player, Vec2::new(x, 200.0)).with_flags(EntityFlags::MOVING)
}

/// Test: a footprint spawned during a frame's spawn phase is drawn in that
/// same frame at full strength, and only decays after the next update.
#[test]
fn test_spawned_effect_visible_same_frame() {
    let mut frames: FrameOrchestrator = FrameOrchestrator::initialize(
        RenderConfig::default(),
        11,
        FloorKey::default(),
    );
    let theme = ThemeTable::builtin();
    let footprint = theme.palette(FloorKey::default()).footprint;
    let full_alpha = (FOOTPRINT_ALPHA * 255.0).round();

    let mut rec = CommandRecorder::new(960, 640);
    frames.render(&mut rec, &WorldSnapshot::new().with(walking_player(100.0)), &theme);
    frames.update(DT);

    rec.clear();
    let result = frames.render(&mut rec, &WorldSnapshot::new().with(walking_player(140.0)), &theme);
    assert_eq!(result.spawned, 1);

    let alphas: Vec<u8> = rec
        .commands()
        .iter()
        .filter_map(DrawCommand::color)
        .filter(|c| c.rgb() == footprint)
        .map(|c| c.a)
        .collect();
    assert!(!alphas.is_empty(), "footprint not drawn in spawn frame");
    assert!(alphas.iter().all(|&a| (f32::from(a) - full_alpha).abs() <= 1.0));

    let slot = frames.effects().active_effects().next().expect("footprint alive");
    assert!((slot.progress() - 1.0).abs() < f32::EPSILON);
    frames.update(DT);
    let slot = frames.effects().active_effects().next().expect("footprint alive");
    assert!(slot.progress() < 1.0);
}

/// Test: with nothing on the field, a frame is exactly the floor.
#[test]
fn test_empty_frame_equals_floor() {
    let config = RenderConfig::default();
    let layout = FloorLayout {
        columns: config.grid.columns,
        rows: config.grid.rows,
        tile_size: config.grid.tile_px(),
        seed: 5,
    };
    let theme = ThemeTable::builtin();
    let key = FloorKey::default();

    let mut expected = Surface::new(960, 640);
    rasterize_floor(&mut expected, &layout, key, &theme.palette(key));

    let mut frames: FrameOrchestrator = FrameOrchestrator::initialize(config, 5, key);
    let mut canvas = Surface::new(960, 640);
    for _ in 0..3 {
        frames.update(DT);
        frames.render(&mut canvas, &WorldSnapshot::new(), &theme);
    }
    assert!(canvas == expected);
    assert_eq!(frames.stats().floor_rebuilds, 1);
}

/// Test: the grid origin offsets the floor blit and every effect.
#[test]
fn test_grid_origin_applied() {
    let mut config = RenderConfig::default();
    config.grid.origin = [16, 8];
    let mut frames: FrameOrchestrator<4> =
        FrameOrchestrator::initialize(config, 1, FloorKey::default());
    let marker = Rgb::new(9, 9, 9);
    frames
        .effects_mut()
        .spawn_simple(EffectKind::LavaMark, Vec2::new(10.0, 10.0), 1.0, marker);

    let mut rec = CommandRecorder::new(1000, 700);
    frames.render(&mut rec, &WorldSnapshot::new(), &ThemeTable::builtin());

    assert_eq!(
        rec.commands()[0],
        DrawCommand::DrawSurface { width: 960, height: 640, origin: (16, 8) }
    );
    let centre = rec.commands().iter().find_map(|c| match c {
        DrawCommand::FillCircle { center, color, .. } if color.rgb() == marker => Some(*center),
        _ => None,
    });
    assert_eq!(centre, Some(Vec2::new(26.0, 18.0)));
}

/// Test: menu scenes spawn ambient motes and nothing else.
#[test]
fn test_menu_ambience() {
    let mut frames: FrameOrchestrator = FrameOrchestrator::initialize(
        RenderConfig::default(),
        3,
        FloorKey::new(2, VisualStyle::Neon),
    );
    let mut theme = ThemeTable::builtin();
    theme.set_key(FloorKey::new(2, VisualStyle::Neon));
    let mut rec = CommandRecorder::new(960, 640);

    for _ in 0..60 {
        frames.update(DT);
        rec.clear();
        frames.render(&mut rec, &WorldSnapshot::menu(), &theme);
    }
    let pool = frames.effects();
    assert!(pool.active_count() >= 3);
    assert!(pool.active_effects().all(|e| e.kind() == EffectKind::MenuMote));
}

/// Test: a spawn storm over many frames never exceeds pool capacity and
/// keeps evicting instead of failing.
#[test]
fn test_spawn_storm_stays_bounded() {
    let mut frames: FrameOrchestrator<16> =
        FrameOrchestrator::initialize(RenderConfig::default(), 99, FloorKey::default());
    let theme = ThemeTable::builtin();
    let mut rec = CommandRecorder::new(960, 640);

    for frame in 0..600_u32 {
        let mut world = WorldSnapshot::new();
        for id in 0..8_u32 {
            #[allow(clippy::cast_precision_loss)]
            let x = 64.0 + (frame * 4 + id * 50) as f32 % 800.0;
            let mut flags = EntityFlags::MOVING | EntityFlags::BURNING;
            if frame % 2 == 0 {
                flags |= EntityFlags::DAMAGED;
            }
            world = world.with(
                EntitySnapshot::new(id, EntityKind::Enemy, Vec2::new(x, 300.0)).with_flags(flags),
            );
        }
        frames.update(DT);
        rec.clear();
        let result = frames.render(&mut rec, &world, &theme);
        assert!(frames.effects().active_count() <= 16);
        assert!(result.effects_alive <= 16);
    }

    let pool = frames.effects().stats();
    assert!(pool.evicted_live > 0);
    assert_eq!(frames.tracked_entities(), 8);
    assert_eq!(frames.stats().total_frames, 600);
}

/// Test: switching theme key rebuilds the floor exactly once per switch.
#[test]
fn test_theme_switch_rebuilds_once() {
    let mut frames: FrameOrchestrator =
        FrameOrchestrator::initialize(RenderConfig::default(), 1, FloorKey::default());
    let mut theme = ThemeTable::builtin();
    let mut rec = CommandRecorder::new(960, 640);
    let world = WorldSnapshot::new();

    for step in 0..4_u8 {
        theme.set_key(FloorKey::new(step, VisualStyle::ALL[usize::from(step)]));
        for _ in 0..10 {
            frames.update(DT);
            frames.render(&mut rec, &world, &theme);
        }
    }
    assert_eq!(frames.stats().floor_rebuilds, 4);
    assert_eq!(frames.floor_cache().stats().hits, 36);
}
