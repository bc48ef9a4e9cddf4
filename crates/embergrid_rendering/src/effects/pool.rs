//! Ephemeral effect pool.
//!
//! Architecture:
//! 1. `spawn` writes into the ring at the cursor, evicting the oldest write
//! 2. `tick` decays every live slot once per frame
//! 3. `render` reads slots and dispatches per kind, never mutating them
//!
//! Memory is a fixed inline array; there is no "pool full" condition.

use super::kind::{EffectKind, EffectLayer};
use super::renderers::{self, EffectView};
use crate::draw::Canvas;
use embergrid_core::{Rgb, RingPool, Vec2};

/// Default slot count.
pub const DEFAULT_POOL_CAPACITY: usize = 40;

/// Smallest lifetime a spawn is clamped to (seconds).
///
/// Any positive value keeps the "visible in its spawn frame" guarantee,
/// because decay only starts at the next tick.
pub const MIN_LIFETIME: f32 = 0.001;

/// Colour payload of an effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectColors {
    /// Main colour, read by every kind.
    pub primary: Rgb,
    /// Second colour, read by multi-colour kinds only.
    pub secondary: Rgb,
}

impl EffectColors {
    /// Same colour in both channels.
    #[must_use]
    pub const fn solid(color: Rgb) -> Self {
        Self {
            primary: color,
            secondary: color,
        }
    }

    /// Two distinct colours.
    #[must_use]
    pub const fn pair(primary: Rgb, secondary: Rgb) -> Self {
        Self { primary, secondary }
    }
}

/// One pooled effect instance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectSlot {
    position: Vec2,
    time_remaining: f32,
    total_lifetime: f32,
    kind: EffectKind,
    extra: f32,
    colors: EffectColors,
    active: bool,
}

impl EffectSlot {
    /// World-space anchor, fixed at spawn.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Seconds left before expiry.
    #[must_use]
    pub const fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Lifetime the effect was spawned with.
    #[must_use]
    pub const fn total_lifetime(&self) -> f32 {
        self.total_lifetime
    }

    /// `time_remaining / total_lifetime`, 1.0 at spawn and 0.0 at expiry.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.total_lifetime > 0.0 {
            (self.time_remaining / self.total_lifetime).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Variant.
    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Per-kind scalar.
    #[must_use]
    pub const fn extra(&self) -> f32 {
        self.extra
    }

    /// Colour payload.
    #[must_use]
    pub const fn colors(&self) -> EffectColors {
        self.colors
    }

    /// Whether the slot holds a live effect.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Active and not yet decayed to zero: exactly the slots that render.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.active && self.time_remaining > 0.0
    }

    fn view(&self) -> EffectView {
        EffectView {
            position: self.position,
            progress: self.progress(),
            extra: self.extra,
            primary: self.colors.primary,
            secondary: self.colors.secondary,
        }
    }
}

/// Lifetime counters of a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Spawns since construction or the last `clear`.
    pub spawned_total: u64,
    /// Spawns that overwrote a still-live effect.
    pub evicted_live: u64,
    /// Effects that ran out their lifetime.
    pub expired_total: u64,
}

/// Fixed-capacity ring-buffer pool of effects.
///
/// `N` is the slot count; spawning never allocates and never fails.
#[derive(Debug, Clone)]
pub struct EffectPool<const N: usize = DEFAULT_POOL_CAPACITY> {
    slots: RingPool<EffectSlot, N>,
    stats: PoolStats,
}

impl<const N: usize> EffectPool<N> {
    /// Creates a pool with every slot inactive.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: RingPool::new(),
            stats: PoolStats::default(),
        }
    }

    /// Slot count.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Spawns an effect at the cursor, overwriting whatever is there.
    ///
    /// Lifetimes that are not strictly positive (or not finite) are clamped
    /// to [`MIN_LIFETIME`].
    pub fn spawn(
        &mut self,
        kind: EffectKind,
        position: Vec2,
        lifetime: f32,
        colors: EffectColors,
        extra: f32,
    ) {
        let lifetime = if lifetime.is_finite() && lifetime > 0.0 {
            lifetime
        } else {
            tracing::warn!(?kind, lifetime, "degenerate effect lifetime clamped");
            MIN_LIFETIME
        };
        let written = self.slots.write(EffectSlot {
            position,
            time_remaining: lifetime,
            total_lifetime: lifetime,
            kind,
            extra,
            colors,
            active: true,
        });
        self.stats.spawned_total += 1;
        if written.previous.is_live() {
            self.stats.evicted_live += 1;
            tracing::debug!(
                slot = written.index,
                evicted = ?written.previous.kind,
                remaining = written.previous.time_remaining,
                "live effect evicted by ring write"
            );
        }
    }

    /// Spawns with a single colour and the kind's default `extra`.
    pub fn spawn_simple(&mut self, kind: EffectKind, position: Vec2, lifetime: f32, color: Rgb) {
        self.spawn(kind, position, lifetime, EffectColors::solid(color), kind.default_extra());
    }

    /// Advances every live effect by `delta_time` seconds.
    ///
    /// Call exactly once per frame. A slot turns inactive on the tick its
    /// remaining time reaches zero. Negative or non-finite deltas count as 0.
    pub fn tick(&mut self, delta_time: f32) {
        let dt = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };
        let mut expired = 0;
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            slot.time_remaining -= dt;
            if slot.time_remaining <= 0.0 {
                slot.time_remaining = 0.0;
                slot.active = false;
                expired += 1;
            }
        }
        self.stats.expired_total += expired;
    }

    /// Draws every live effect. `time` drives oscillation only.
    pub fn render(&self, canvas: &mut dyn Canvas, time: f32) {
        for slot in self.slots.iter().filter(|s| s.is_live()) {
            renderers::draw(canvas, slot.kind, &slot.view(), time);
        }
    }

    /// Draws the live effects that belong to `layer`.
    pub fn render_layer(&self, canvas: &mut dyn Canvas, layer: EffectLayer, time: f32) {
        for slot in self
            .slots
            .iter()
            .filter(|s| s.is_live() && s.kind.layer() == layer)
        {
            renderers::draw(canvas, slot.kind, &slot.view(), time);
        }
    }

    /// Number of slots that would render.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_live()).count()
    }

    /// Copies of the live slots, in slot order.
    pub fn active_effects(&self) -> impl Iterator<Item = EffectSlot> + '_ {
        self.slots.iter().filter(|s| s.is_live()).copied()
    }

    /// Lifetime counters.
    #[must_use]
    pub const fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Deactivates every slot and rewinds the cursor.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.stats = PoolStats::default();
    }
}

impl<const N: usize> Default for EffectPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
