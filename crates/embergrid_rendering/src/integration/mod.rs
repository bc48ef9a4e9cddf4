//! Integration layer.
//!
//! Connects the effect pool and the floor cache to the host:
//! - [`world`] - read-only entity snapshot seam
//! - [`spawn_rules`] - edge/distance/cooldown gated spawning
//! - [`entity_art`] - entity pass
//! - [`orchestrator`] - per-frame ordering

pub mod entity_art;
pub mod orchestrator;
pub mod spawn_rules;
pub mod world;

pub use orchestrator::FrameOrchestrator;
pub use spawn_rules::{SpawnContext, SpawnTracker, FROST_FADE_THRESHOLD};
pub use world::{
    CosmeticTrail, EntityFlags, EntityKind, EntitySnapshot, SceneMode, WorldReader, WorldSnapshot,
};
