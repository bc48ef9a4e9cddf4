//! # Frame Soak
//!
//! Headless driver: renders a scripted scene into a software surface for a
//! number of frames and prints frame statistics.
//!
//! ```text
//! frame_soak [config.toml] [--frames N] [--seed S]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=embergrid_rendering=debug`).

use embergrid_core::{Rgb, Vec2};
use embergrid_rendering::integration::CosmeticTrail;
use embergrid_rendering::{
    EntityFlags, EntityKind, EntitySnapshot, FloorKey, FrameOrchestrator, RenderConfig, SceneMode,
    Surface, ThemeTable, TrailStyle, VisualStyle, WorldSnapshot,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DT: f32 = 1.0 / 60.0;

struct Args {
    config: Option<String>,
    frames: u32,
    seed: u64,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let value_of = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
    };
    Args {
        config: args.first().filter(|a| !a.starts_with("--")).cloned(),
        frames: value_of("--frames").and_then(|s| s.parse().ok()).unwrap_or(1200),
        seed: value_of("--seed").and_then(|s| s.parse().ok()).unwrap_or(0x00E3_B16D),
    }
}

/// Scripted scene: a player walking laps, a burning enemy that takes hits
/// and dies, a bomb with a running fuse, and a menu interlude.
fn script(frame: u32, tile: f32, world: &mut WorldSnapshot) {
    #[allow(clippy::cast_precision_loss)]
    let t = frame as f32 * DT;
    world.mode = if (600..720).contains(&frame) {
        SceneMode::Menu
    } else {
        SceneMode::Playing
    };
    world.entities.clear();
    if world.mode == SceneMode::Menu {
        return;
    }

    let lap = Vec2::new((t * 0.8).cos(), (t * 0.8).sin());
    let center = Vec2::new(7.5 * tile, 5.0 * tile);
    world.entities.push(
        EntitySnapshot::new(1, EntityKind::Player, center + lap * (3.0 * tile))
            .with_heading(lap.perp().angle())
            .with_flags(EntityFlags::MOVING)
            .with_trail(CosmeticTrail {
                style: TrailStyle::Stardust,
                primary: Rgb::hex(0xFF_D7_40),
                secondary: Rgb::WHITE,
            }),
    );

    let cycle = frame % 300;
    if cycle < 280 {
        let mut flags = EntityFlags::MOVING;
        if cycle < 120 {
            flags |= EntityFlags::BURNING;
        } else {
            flags |= EntityFlags::FROZEN;
        }
        if cycle % 60 < 6 {
            flags |= EntityFlags::DAMAGED;
        }
        if cycle > 240 {
            flags |= EntityFlags::DYING;
        }
        #[allow(clippy::cast_precision_loss)]
        let x = 2.0 * tile + (cycle as f32 / 280.0) * 10.0 * tile;
        #[allow(clippy::cast_precision_loss)]
        let frost = if cycle < 120 { 0.0 } else { (280 - cycle) as f32 * DT * 2.0 };
        world.entities.push(
            EntitySnapshot::new(2, EntityKind::Enemy, Vec2::new(x, 3.0 * tile))
                .with_flags(flags)
                .with_frost(frost),
        );
    }

    let fuse = 3.0 - (t % 3.0);
    world.entities.push(
        EntitySnapshot::new(3, EntityKind::Bomb, Vec2::new(3.5 * tile, 7.5 * tile)).with_fuse(fuse),
    );
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         EMBERGRID FRAME SOAK                                     ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    let args = parse_args();
    let config = match &args.config {
        Some(path) => match RenderConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "could not load config");
                return ExitCode::FAILURE;
            }
        },
        None => RenderConfig::default(),
    };

    let mut theme = config.theme_table();
    let (width, height) = config.grid.pixel_size();
    let [ox, oy] = config.grid.origin;
    let canvas_w = width.saturating_add(ox.unsigned_abs());
    let canvas_h = height.saturating_add(oy.unsigned_abs());
    let tile = config.grid.tile_px();
    let mut canvas = Surface::new(canvas_w, canvas_h);
    let mut world = WorldSnapshot::new();

    let mut frames: FrameOrchestrator =
        FrameOrchestrator::initialize(config, args.seed, theme_key(&theme, 0));

    for frame in 0..args.frames {
        if frame % 240 == 0 {
            theme.set_key(theme_key(&theme, frame / 240));
        }
        script(frame, tile, &mut world);
        frames.update(DT);
        let result = frames.render(&mut canvas, &world, &theme);
        if result.floor_rebuilt {
            tracing::info!(frame = result.frame_number, floor_us = result.floor_us, "floor rebuilt");
        }
    }

    let stats = frames.stats();
    let pool = frames.effects().stats();
    frames.dispose();

    println!();
    println!("┌─ SOAK RESULTS ───────────────────────────────────────────────────┐");
    println!("│ Frames:             {}", stats.total_frames);
    println!("│ Avg frame:          {} us", stats.avg_frame_time_us);
    println!("│ Worst frame:        {} us", stats.worst_frame_time_us);
    println!("│ Over budget:        {:.1}%", stats.over_budget_ratio() * 100.0);
    println!("│ Floor rebuilds:     {}", stats.floor_rebuilds);
    println!("│ Effects spawned:    {}", pool.spawned_total);
    println!("│ Live evictions:     {}", pool.evicted_live);
    println!("└──────────────────────────────────────────────────────────────────┘");

    ExitCode::SUCCESS
}

fn theme_key(theme: &ThemeTable, step: u32) -> FloorKey {
    let worlds = u32::try_from(theme.world_count()).unwrap_or(1).max(1);
    let style = VisualStyle::ALL[(step as usize / 2) % VisualStyle::ALL.len()];
    FloorKey::new(u8::try_from(step % worlds).unwrap_or(0), style)
}
