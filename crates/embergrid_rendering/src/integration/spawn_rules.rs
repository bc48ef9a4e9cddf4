//! Spawn Rules - turns entity motion and state edges into effect spawns.
//!
//! The effect pool does no rate limiting; everything here is gated by
//! distance since the last spawn of a kind, by a per-kind cooldown, or by
//! a rising edge on a state flag. Cooldowns are absolute clock deadlines.

use super::world::{EntityFlags, EntityKind, EntitySnapshot, SceneMode, WorldReader};
use crate::config::{LifetimeConfig, SpawnConfig};
use crate::effects::renderers::{burst_angle, snap_heading};
use crate::effects::{EffectColors, EffectKind, EffectPool};
use crate::theme::Palette;
use embergrid_core::{Rgb, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::f32::consts::TAU;

/// Frost timer above which frozen movers still leave marks; below it the
/// frost overlay is fading out.
pub const FROST_FADE_THRESHOLD: f32 = 0.5;

/// Everything a rule needs besides the entity itself.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    /// Rule tuning.
    pub spawn: &'a SpawnConfig,
    /// Effect lifetimes.
    pub lifetimes: &'a LifetimeConfig,
    /// Colours for the current floor key.
    pub palette: &'a Palette,
    /// Tile edge in pixels.
    pub tile_px: f32,
    /// Grid size in pixels.
    pub grid_px: Vec2,
    /// Render clock in seconds.
    pub time: f64,
}

/// Per-entity edge and distance state.
#[derive(Debug, Clone, Copy)]
struct EntityTrack {
    last_footprint: Vec2,
    last_frost: Vec2,
    last_lava: Vec2,
    last_trail: Vec2,
    next_ember: f64,
    next_ghost: f64,
    was_damaged: bool,
    left_foot: bool,
    seen_frame: u64,
}

impl EntityTrack {
    fn new(position: Vec2) -> Self {
        Self {
            last_footprint: position,
            last_frost: position,
            last_lava: position,
            last_trail: position,
            next_ember: 0.0,
            next_ghost: 0.0,
            was_damaged: false,
            left_foot: false,
            seen_frame: 0,
        }
    }
}

/// Tracks entities across frames and applies the spawn rules.
#[derive(Debug, Clone)]
pub struct SpawnTracker {
    tracks: HashMap<u32, EntityTrack>,
    rng: ChaCha8Rng,
    next_mote: f64,
    frame: u64,
}

impl SpawnTracker {
    /// Creates a tracker whose jitter is driven by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            tracks: HashMap::with_capacity(64),
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_mote: 0.0,
            frame: 0,
        }
    }

    /// Applies every rule to the snapshot and returns the number of spawns.
    ///
    /// Tracks for entities missing from the snapshot are dropped.
    pub fn observe<const N: usize>(
        &mut self,
        world: &dyn WorldReader,
        ctx: &SpawnContext<'_>,
        pool: &mut EffectPool<N>,
    ) -> u32 {
        self.frame += 1;
        let frame = self.frame;
        let mode = world.scene_mode();
        let mut spawned = 0;

        if mode == SceneMode::Menu && ctx.time >= self.next_mote {
            let at = Vec2::new(
                self.rng.gen::<f32>() * ctx.grid_px.x,
                self.rng.gen::<f32>() * ctx.grid_px.y,
            );
            let phase = self.rng.gen::<f32>() * TAU;
            pool.spawn(
                EffectKind::MenuMote,
                at,
                ctx.lifetimes.mote,
                EffectColors::solid(ctx.palette.mote),
                phase,
            );
            self.next_mote = ctx.time + f64::from(ctx.spawn.mote_cooldown);
            spawned += 1;
        }

        for entity in world.entities() {
            let track = self
                .tracks
                .entry(entity.id)
                .or_insert_with(|| EntityTrack::new(entity.position));
            track.seen_frame = frame;
            if mode == SceneMode::Playing {
                spawned += apply_rules(entity, track, &mut self.rng, ctx, pool);
            }
        }

        let before = self.tracks.len();
        self.tracks.retain(|_, t| t.seen_frame == frame);
        let dropped = before - self.tracks.len();
        if dropped > 0 {
            tracing::trace!(dropped, "spawn tracks pruned");
        }

        spawned
    }

    /// Number of entities currently tracked.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.tracks.len()
    }

    /// Forgets every track and cooldown.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.next_mote = 0.0;
    }
}

fn moved_past(from: Vec2, to: Vec2, spacing_px: f32) -> bool {
    from.distance_squared(to) >= spacing_px * spacing_px
}

fn jitter(rng: &mut ChaCha8Rng, amount: f32) -> Vec2 {
    Vec2::new(
        (rng.gen::<f32>() * 2.0 - 1.0) * amount,
        (rng.gen::<f32>() * 2.0 - 1.0) * amount,
    )
}

fn ghost_tint(kind: EntityKind, palette: &Palette) -> Rgb {
    match kind {
        EntityKind::Player => palette.player.lerp(palette.ghost, 0.5),
        EntityKind::Enemy => palette.enemy.lerp(palette.ghost, 0.5),
        EntityKind::Bomb => palette.ghost,
    }
}

fn apply_rules<const N: usize>(
    entity: &EntitySnapshot,
    track: &mut EntityTrack,
    rng: &mut ChaCha8Rng,
    ctx: &SpawnContext<'_>,
    pool: &mut EffectPool<N>,
) -> u32 {
    let pos = entity.position;
    let tile = ctx.tile_px;
    let moving = entity.has(EntityFlags::MOVING);
    let mut spawned = 0;

    if entity.kind == EntityKind::Player
        && moving
        && moved_past(track.last_footprint, pos, ctx.spawn.footprint_spacing * tile)
    {
        let heading = snap_heading(entity.heading);
        let side = if track.left_foot { -1.0 } else { 1.0 };
        let offset = Vec2::from_angle(heading).perp() * (side * tile * 0.06);
        pool.spawn(
            EffectKind::Footprint,
            pos + offset,
            ctx.lifetimes.footprint,
            EffectColors::solid(ctx.palette.footprint),
            heading,
        );
        track.last_footprint = pos;
        track.left_foot = !track.left_foot;
        spawned += 1;
    }

    if moving
        && entity.has(EntityFlags::FROZEN)
        && entity.frost_timer > FROST_FADE_THRESHOLD
        && moved_past(track.last_frost, pos, ctx.spawn.frost_spacing * tile)
    {
        pool.spawn(
            EffectKind::FrostMark,
            pos,
            ctx.lifetimes.frost_mark,
            EffectColors::pair(ctx.palette.frost, ctx.palette.frost.lerp(Rgb::WHITE, 0.5)),
            tile * 0.12,
        );
        track.last_frost = pos;
        spawned += 1;
    }

    if moving
        && entity.has(EntityFlags::BURNING)
        && moved_past(track.last_lava, pos, ctx.spawn.lava_spacing * tile)
    {
        pool.spawn(
            EffectKind::LavaMark,
            pos,
            ctx.lifetimes.lava_mark,
            EffectColors::pair(ctx.palette.lava, ctx.palette.lava_core),
            tile * 0.11,
        );
        track.last_lava = pos;
        spawned += 1;
    }

    let lit_bomb = entity.kind == EntityKind::Bomb && entity.fuse_timer > 0.0;
    if (lit_bomb || entity.has(EntityFlags::BURNING)) && ctx.time >= track.next_ember {
        let anchor = if lit_bomb {
            pos + Vec2::new(tile * 0.18, -tile * 0.3)
        } else {
            pos
        };
        let at = anchor + jitter(rng, ctx.spawn.ember_jitter);
        pool.spawn(
            EffectKind::FireEmber,
            at,
            ctx.lifetimes.fire_ember,
            EffectColors::pair(ctx.palette.ember, ctx.palette.ember_hot),
            rng.gen::<f32>() * TAU,
        );
        track.next_ember = ctx.time + f64::from(ctx.spawn.ember_cooldown);
        spawned += 1;
    }

    let damaged = entity.has(EntityFlags::DAMAGED);
    if damaged && !track.was_damaged {
        let count = ctx.spawn.spark_burst;
        let base = rng.gen::<f32>() * TAU;
        for i in 0..count {
            pool.spawn(
                EffectKind::Spark,
                pos,
                ctx.lifetimes.spark,
                EffectColors::solid(ctx.palette.spark),
                burst_angle(i, count, base),
            );
        }
        spawned += count;
    }
    track.was_damaged = damaged;

    if entity.has(EntityFlags::DYING) && ctx.time >= track.next_ghost {
        pool.spawn(
            EffectKind::GhostAfterimage,
            pos,
            ctx.lifetimes.ghost,
            EffectColors::solid(ghost_tint(entity.kind, ctx.palette)),
            tile * 0.3,
        );
        track.next_ghost = ctx.time + f64::from(ctx.spawn.ghost_cooldown);
        spawned += 1;
    }

    if let Some(trail) = entity.trail {
        if moving && moved_past(track.last_trail, pos, ctx.spawn.trail_spacing * tile) {
            pool.spawn(
                EffectKind::CosmeticTrail(trail.style),
                pos,
                ctx.lifetimes.trail,
                EffectColors::pair(trail.primary, trail.secondary),
                entity.heading,
            );
            track.last_trail = pos;
            spawned += 1;
        }
    }

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::TrailStyle;
    use crate::integration::world::{CosmeticTrail, WorldSnapshot};
    use crate::theme::{FloorKey, ThemeSource, ThemeTable};

    struct Fixture {
        spawn: SpawnConfig,
        lifetimes: LifetimeConfig,
        palette: Palette,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                spawn: SpawnConfig::default(),
                lifetimes: LifetimeConfig::default(),
                palette: ThemeTable::builtin().palette(FloorKey::default()),
            }
        }

        fn ctx(&self, time: f32) -> SpawnContext<'_> {
            SpawnContext {
                spawn: &self.spawn,
                lifetimes: &self.lifetimes,
                palette: &self.palette,
                tile_px: 64.0,
                grid_px: Vec2::new(960.0, 640.0),
                time: f64::from(time),
            }
        }
    }

    fn count(pool: &EffectPool<64>, kind: EffectKind) -> usize {
        pool.active_effects().filter(|e| e.kind() == kind).count()
    }

    fn player(x: f32) -> EntitySnapshot {
        EntitySnapshot::new(1, EntityKind::Player, Vec2::new(x, 100.0))
            .with_flags(EntityFlags::MOVING)
    }

    #[test]
    fn test_footprints_gated_by_distance() {
        let fx = Fixture::new();
        let mut tracker = SpawnTracker::new(1);
        let mut pool: EffectPool<64> = EffectPool::new();

        // Spacing is 0.5 tiles = 32px.
        for (frame, x) in [100.0, 110.0, 120.0, 132.0, 150.0, 164.0].into_iter().enumerate() {
            let world = WorldSnapshot::new().with(player(x));
            #[allow(clippy::cast_precision_loss)]
            tracker.observe(&world, &fx.ctx(frame as f32 * 0.016), &mut pool);
        }
        assert_eq!(count(&pool, EffectKind::Footprint), 2);
    }

    #[test]
    fn test_standing_still_leaves_no_footprints() {
        let fx = Fixture::new();
        let mut tracker = SpawnTracker::new(1);
        let mut pool: EffectPool<64> = EffectPool::new();
        let still = EntitySnapshot::new(1, EntityKind::Player, Vec2::new(100.0, 100.0));
        for x in [100.0, 200.0, 300.0] {
            let mut e = still;
            e.position.x = x;
            tracker.observe(&WorldSnapshot::new().with(e), &fx.ctx(0.0), &mut pool);
        }
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_sparks_on_rising_edge_only() {
        let fx = Fixture::new();
        let mut tracker = SpawnTracker::new(1);
        let mut pool: EffectPool<64> = EffectPool::new();
        let hurt = EntitySnapshot::new(3, EntityKind::Enemy, Vec2::new(50.0, 50.0))
            .with_flags(EntityFlags::DAMAGED);

        tracker.observe(&WorldSnapshot::new().with(hurt), &fx.ctx(0.0), &mut pool);
        tracker.observe(&WorldSnapshot::new().with(hurt), &fx.ctx(0.1), &mut pool);
        assert_eq!(count(&pool, EffectKind::Spark), fx.spawn.spark_burst as usize);

        let healed = hurt.with_flags(EntityFlags::NONE);
        tracker.observe(&WorldSnapshot::new().with(healed), &fx.ctx(0.2), &mut pool);
        tracker.observe(&WorldSnapshot::new().with(hurt), &fx.ctx(0.3), &mut pool);
        assert_eq!(count(&pool, EffectKind::Spark), 2 * fx.spawn.spark_burst as usize);
    }

    #[test]
    fn test_ember_cooldown() {
        let fx = Fixture::new();
        let mut tracker = SpawnTracker::new(1);
        let mut pool: EffectPool<64> = EffectPool::new();
        let bomb = EntitySnapshot::new(9, EntityKind::Bomb, Vec2::new(64.0, 64.0)).with_fuse(2.0);
        let world = WorldSnapshot::new().with(bomb);

        tracker.observe(&world, &fx.ctx(0.0), &mut pool);
        tracker.observe(&world, &fx.ctx(0.01), &mut pool);
        assert_eq!(count(&pool, EffectKind::FireEmber), 1);
        tracker.observe(&world, &fx.ctx(0.1), &mut pool);
        assert_eq!(count(&pool, EffectKind::FireEmber), 2);
    }

    #[test]
    fn test_frost_marks_stop_while_fading() {
        let fx = Fixture::new();
        let mut tracker = SpawnTracker::new(1);
        let mut pool: EffectPool<64> = EffectPool::new();
        let frozen = |x: f32, timer: f32| {
            EntitySnapshot::new(4, EntityKind::Enemy, Vec2::new(x, 0.0))
                .with_flags(EntityFlags::MOVING | EntityFlags::FROZEN)
                .with_frost(timer)
        };

        tracker.observe(&WorldSnapshot::new().with(frozen(0.0, 2.0)), &fx.ctx(0.0), &mut pool);
        tracker.observe(&WorldSnapshot::new().with(frozen(40.0, 1.5)), &fx.ctx(0.1), &mut pool);
        assert_eq!(count(&pool, EffectKind::FrostMark), 1);
        tracker.observe(&WorldSnapshot::new().with(frozen(80.0, 0.4)), &fx.ctx(0.2), &mut pool);
        assert_eq!(count(&pool, EffectKind::FrostMark), 1);
    }

    #[test]
    fn test_trail_uses_both_colours() {
        let fx = Fixture::new();
        let mut tracker = SpawnTracker::new(1);
        let mut pool: EffectPool<64> = EffectPool::new();
        let trail = CosmeticTrail {
            style: TrailStyle::Hearts,
            primary: Rgb::new(255, 0, 128),
            secondary: Rgb::new(255, 200, 220),
        };
        let e = |x: f32| player(x).with_trail(trail);

        tracker.observe(&WorldSnapshot::new().with(e(0.0)), &fx.ctx(0.0), &mut pool);
        tracker.observe(&WorldSnapshot::new().with(e(20.0)), &fx.ctx(0.1), &mut pool);
        let spawned: Vec<_> = pool
            .active_effects()
            .filter(|s| s.kind() == EffectKind::CosmeticTrail(TrailStyle::Hearts))
            .collect();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].colors().secondary, trail.secondary);
    }

    #[test]
    fn test_menu_motes_and_pruning() {
        let fx = Fixture::new();
        let mut tracker = SpawnTracker::new(1);
        let mut pool: EffectPool<64> = EffectPool::new();

        tracker.observe(&WorldSnapshot::new().with(player(0.0)), &fx.ctx(0.0), &mut pool);
        assert_eq!(tracker.tracked(), 1);

        let menu = WorldSnapshot::menu();
        tracker.observe(&menu, &fx.ctx(1.0), &mut pool);
        tracker.observe(&menu, &fx.ctx(1.1), &mut pool);
        tracker.observe(&menu, &fx.ctx(1.3), &mut pool);
        assert_eq!(tracker.tracked(), 0);
        assert_eq!(count(&pool, EffectKind::MenuMote), 2);
        for mote in pool.active_effects() {
            assert!(mote.position().x >= 0.0 && mote.position().x <= 960.0);
            assert!(mote.position().y >= 0.0 && mote.position().y <= 640.0);
        }
    }
}
