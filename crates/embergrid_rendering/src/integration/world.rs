//! World Seam - read-only entity snapshot consumed once per frame.
//!
//! The render layer never mutates game state. Positions are grid-local
//! pixels (the grid origin offset is applied by the orchestrator).

use crate::effects::TrailStyle;
use embergrid_core::{Rgb, Vec2};
use std::ops::{BitOr, BitOrAssign};

/// Which screen the host is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneMode {
    /// Title/menu screen: ambient motes only.
    Menu,
    /// Gameplay.
    #[default]
    Playing,
    /// Gameplay frozen; effects still decay.
    Paused,
}

/// Entity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A player character.
    Player,
    /// A hostile creature.
    Enemy,
    /// A placed bomb.
    Bomb,
}

/// Boolean entity state flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EntityFlags(u8);

impl EntityFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Moved this frame.
    pub const MOVING: Self = Self(1);
    /// Playing its death animation.
    pub const DYING: Self = Self(1 << 1);
    /// Under a frost status.
    pub const FROZEN: Self = Self(1 << 2);
    /// Under a burn status.
    pub const BURNING: Self = Self(1 << 3);
    /// Took damage (held high while the hit flash lasts).
    pub const DAMAGED: Self = Self(1 << 4);

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the flags in `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears the flags in `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for EntityFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EntityFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// An unlocked cosmetic trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CosmeticTrail {
    /// Trail sub-style.
    pub style: TrailStyle,
    /// First colour.
    pub primary: Rgb,
    /// Second colour.
    pub secondary: Rgb,
}

/// Per-frame view of one live entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapshot {
    /// Stable id across frames.
    pub id: u32,
    /// Category.
    pub kind: EntityKind,
    /// Grid-local pixel position of the entity centre.
    pub position: Vec2,
    /// Facing in radians.
    pub heading: f32,
    /// State flags.
    pub flags: EntityFlags,
    /// Seconds of frost left; 0 when not frozen.
    pub frost_timer: f32,
    /// Seconds until a bomb explodes; 0 for non-bombs.
    pub fuse_timer: f32,
    /// Unlocked cosmetic trail, if any.
    pub trail: Option<CosmeticTrail>,
}

impl EntitySnapshot {
    /// Snapshot with no flags, timers or trail.
    #[must_use]
    pub const fn new(id: u32, kind: EntityKind, position: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            heading: 0.0,
            flags: EntityFlags::NONE,
            frost_timer: 0.0,
            fuse_timer: 0.0,
            trail: None,
        }
    }

    /// Sets the flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the heading.
    #[must_use]
    pub const fn with_heading(mut self, heading: f32) -> Self {
        self.heading = heading;
        self
    }

    /// Sets the frost timer.
    #[must_use]
    pub const fn with_frost(mut self, seconds: f32) -> Self {
        self.frost_timer = seconds;
        self
    }

    /// Sets the bomb fuse.
    #[must_use]
    pub const fn with_fuse(mut self, seconds: f32) -> Self {
        self.fuse_timer = seconds;
        self
    }

    /// Sets the cosmetic trail.
    #[must_use]
    pub const fn with_trail(mut self, trail: CosmeticTrail) -> Self {
        self.trail = Some(trail);
        self
    }

    /// Shorthand for a flag test.
    #[must_use]
    pub const fn has(&self, flag: EntityFlags) -> bool {
        self.flags.contains(flag)
    }
}

/// The world collaborator as seen by the frame orchestrator.
pub trait WorldReader {
    /// Current scene.
    fn scene_mode(&self) -> SceneMode;

    /// Live entities, in draw order.
    fn entities(&self) -> &[EntitySnapshot];
}

/// Owned snapshot, for hosts that copy state out once per frame and for tests.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    /// Current scene.
    pub mode: SceneMode,
    /// Live entities.
    pub entities: Vec<EntitySnapshot>,
}

impl WorldSnapshot {
    /// Empty gameplay snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty menu snapshot.
    #[must_use]
    pub fn menu() -> Self {
        Self {
            mode: SceneMode::Menu,
            entities: Vec::new(),
        }
    }

    /// Appends an entity.
    #[must_use]
    pub fn with(mut self, entity: EntitySnapshot) -> Self {
        self.entities.push(entity);
        self
    }

    /// Mutable access by id.
    pub fn entity_mut(&mut self, id: u32) -> Option<&mut EntitySnapshot> {
        self.entities.iter_mut().find(|e| e.id == id)
    }
}

impl WorldReader for WorldSnapshot {
    fn scene_mode(&self) -> SceneMode {
        self.mode
    }

    fn entities(&self) -> &[EntitySnapshot] {
        &self.entities
    }
}
