//! Frame Orchestrator - runs the effect pool and the floor cache once per frame.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FRAME TIMELINE                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  update(dt)                                                  │
//! │    └── EffectPool::tick, clock += dt                         │
//! │                                                              │
//! │  render(canvas, world, theme)                                │
//! │    ├── Phase 1: SurfaceCache::ensure_fresh + blit floor      │
//! │    ├── Phase 2: spawn rules over the entity snapshot         │
//! │    ├── Phase 3: effects under entities                       │
//! │    ├── Phase 4: entities                                     │
//! │    └── Phase 5: effects over entities                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Effects spawned in phase 2 draw at full strength in the same frame and
//! start decaying at the next `update`.

use super::entity_art::draw_entity;
use super::spawn_rules::{SpawnContext, SpawnTracker};
use super::world::WorldReader;
use crate::cache::SurfaceCache;
use crate::config::RenderConfig;
use crate::draw::{Canvas, Translated};
use crate::effects::{EffectLayer, EffectPool, DEFAULT_POOL_CAPACITY};
use crate::floor::{rasterize_floor, FloorLayout};
use crate::pipeline::{FrameResult, RenderLoopStats};
use crate::theme::{FloorKey, ThemeSource};
use embergrid_core::Vec2;
use std::time::{Duration, Instant};

/// Period of the clock handed to draw routines. Pulses and flicker jump
/// phase once per wrap; f32 keeps sub-millisecond steps up to this range.
pub const RENDER_TIME_WRAP: f64 = 4096.0;

fn micros(d: Duration) -> u32 {
    u32::try_from(d.as_micros()).unwrap_or(u32::MAX)
}

/// Owns the effect pool, the floor cache and the spawn tracker.
///
/// # Example
///
/// ```
/// use embergrid_rendering::draw::Surface;
/// use embergrid_rendering::integration::{FrameOrchestrator, WorldSnapshot};
/// use embergrid_rendering::theme::{FloorKey, ThemeTable};
/// use embergrid_rendering::RenderConfig;
///
/// let mut frames: FrameOrchestrator = FrameOrchestrator::initialize(
///     RenderConfig::default(),
///     7,
///     FloorKey::default(),
/// );
/// let mut canvas = Surface::new(960, 640);
/// let theme = ThemeTable::builtin();
///
/// frames.update(1.0 / 60.0);
/// let result = frames.render(&mut canvas, &WorldSnapshot::new(), &theme);
/// assert!(result.floor_rebuilt);
/// ```
#[derive(Debug)]
pub struct FrameOrchestrator<const N: usize = DEFAULT_POOL_CAPACITY> {
    config: RenderConfig,
    layout: FloorLayout,
    effects: EffectPool<N>,
    floor: SurfaceCache<FloorKey>,
    spawner: SpawnTracker,
    clock: f64,
    seed: u64,
    last_key: FloorKey,
    frame_count: u64,
    stats: RenderLoopStats,
}

impl<const N: usize> FrameOrchestrator<N> {
    /// Sets up the subsystem. Nothing is rasterized until the first `render`.
    ///
    /// `seed` drives floor decor and spawn jitter. `initial_key` is only the
    /// baseline for key-change logging; the floor is built from whatever key
    /// the theme reports on the first `render`.
    ///
    /// Configs that skipped [`RenderConfig::validate`] are made safe here: the
    /// grid is shrunk to fit [`MAX_SURFACE_EDGE`](crate::draw::MAX_SURFACE_EDGE)
    /// and a spark burst is capped below the pool capacity.
    #[must_use]
    pub fn initialize(mut config: RenderConfig, seed: u64, initial_key: FloorKey) -> Self {
        let requested = config.grid.clone();
        if config.grid.fit_surface_limit() {
            tracing::warn!(?requested, fitted = ?config.grid, "grid exceeds surface limit");
        }
        let burst_cap = u32::try_from(N.saturating_sub(1).max(1)).unwrap_or(u32::MAX);
        if config.spawn.spark_burst > burst_cap {
            tracing::warn!(
                requested = config.spawn.spark_burst,
                capped = burst_cap,
                capacity = N,
                "spark burst would flush the effect pool"
            );
            config.spawn.spark_burst = burst_cap;
        }

        let layout = FloorLayout {
            columns: config.grid.columns,
            rows: config.grid.rows,
            tile_size: config.grid.tile_px(),
            seed,
        };
        tracing::debug!(
            capacity = N,
            columns = layout.columns,
            rows = layout.rows,
            ?initial_key,
            "frame orchestrator initialized"
        );
        Self {
            config,
            layout,
            effects: EffectPool::new(),
            floor: SurfaceCache::new(),
            spawner: SpawnTracker::new(seed),
            clock: 0.0,
            seed,
            last_key: initial_key,
            frame_count: 0,
            stats: RenderLoopStats::default(),
        }
    }

    /// Advances effect lifetimes and the render clock by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) {
        let dt = if delta_time.is_finite() && delta_time > 0.0 {
            delta_time
        } else {
            0.0
        };
        self.effects.tick(dt);
        self.clock += f64::from(dt);
    }

    /// Draws one frame onto `canvas`.
    pub fn render(
        &mut self,
        canvas: &mut dyn Canvas,
        world: &dyn WorldReader,
        theme: &dyn ThemeSource,
    ) -> FrameResult {
        let frame_start = Instant::now();
        self.frame_count += 1;

        let key = theme.floor_key();
        if key != self.last_key {
            tracing::debug!(from = ?self.last_key, to = ?key, "floor key changed");
            self.last_key = key;
        }
        let palette = theme.palette(key);
        let tile_px = self.config.grid.tile_px();
        let (grid_w, grid_h) = self.config.grid.pixel_size();
        #[allow(clippy::cast_possible_truncation)]
        let time = (self.clock % RENDER_TIME_WRAP) as f32;

        // === PHASE 1: Floor ===
        let floor_start = Instant::now();
        let rebuilds_before = self.floor.stats().rebuilds;
        let layout = self.layout;
        self.floor.ensure_fresh(key, grid_w, grid_h, |surface, key| {
            rasterize_floor(surface, &layout, *key, &palette);
        });
        let [origin_x, origin_y] = self.config.grid.origin;
        self.floor.blit(canvas, origin_x, origin_y);
        let floor_rebuilt = self.floor.stats().rebuilds > rebuilds_before;
        let floor_time = floor_start.elapsed();

        // === PHASE 2: Spawn rules ===
        let spawn_start = Instant::now();
        #[allow(clippy::cast_precision_loss)]
        let grid_px = Vec2::new(grid_w as f32, grid_h as f32);
        let ctx = SpawnContext {
            spawn: &self.config.spawn,
            lifetimes: &self.config.lifetimes,
            palette: &palette,
            tile_px,
            grid_px,
            time: self.clock,
        };
        let spawned = self.spawner.observe(world, &ctx, &mut self.effects);
        let spawn_time = spawn_start.elapsed();

        let mut grid = Translated::new(canvas, self.config.grid.origin_vec());

        // === PHASE 3-5: Layers ===
        let under_start = Instant::now();
        self.effects
            .render_layer(&mut grid, EffectLayer::UnderEntities, time);
        let mut effects_time = under_start.elapsed();

        let entities_start = Instant::now();
        let entities = world.entities();
        for entity in entities {
            draw_entity(&mut grid, entity, &palette, tile_px, time);
        }
        let entities_time = entities_start.elapsed();

        let over_start = Instant::now();
        self.effects
            .render_layer(&mut grid, EffectLayer::OverEntities, time);
        effects_time += over_start.elapsed();

        let total_us = micros(frame_start.elapsed());
        let over_budget = u64::from(total_us) > self.config.frame_budget_us;
        if over_budget {
            tracing::warn!(
                frame = self.frame_count,
                total_us,
                budget_us = self.config.frame_budget_us,
                "frame over budget"
            );
        }

        let result = FrameResult {
            frame_number: self.frame_count,
            frame_time_us: total_us,
            floor_us: micros(floor_time),
            spawn_us: micros(spawn_time),
            effects_us: micros(effects_time),
            entities_us: micros(entities_time),
            floor_rebuilt,
            spawned,
            entities_rendered: u32::try_from(entities.len()).unwrap_or(u32::MAX),
            effects_alive: u32::try_from(self.effects.active_count()).unwrap_or(u32::MAX),
            over_budget,
        };
        self.stats.record(&result);
        tracing::trace!(
            frame = result.frame_number,
            spawned,
            alive = result.effects_alive,
            floor_rebuilt,
            "frame rendered"
        );
        result
    }

    /// Releases the floor surface and drops every effect and track.
    pub fn dispose(&mut self) {
        self.floor.dispose();
        self.effects.clear();
        self.spawner.clear();
        tracing::debug!(frames = self.frame_count, "frame orchestrator disposed");
    }

    /// Forces a floor rebuild on the next frame.
    pub fn invalidate_floor(&mut self) {
        self.floor.invalidate();
    }

    /// The effect pool.
    #[must_use]
    pub fn effects(&self) -> &EffectPool<N> {
        &self.effects
    }

    /// Mutable access to the effect pool, for host-driven spawns.
    pub fn effects_mut(&mut self) -> &mut EffectPool<N> {
        &mut self.effects
    }

    /// The floor cache.
    #[must_use]
    pub fn floor_cache(&self) -> &SurfaceCache<FloorKey> {
        &self.floor
    }

    /// Entities currently tracked by the spawn rules.
    #[must_use]
    pub fn tracked_entities(&self) -> usize {
        self.spawner.tracked()
    }

    /// Render clock in seconds.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Seed passed to `initialize`.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Returns statistics.
    #[must_use]
    pub fn stats(&self) -> RenderLoopStats {
        self.stats
    }

    /// Returns the current frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
