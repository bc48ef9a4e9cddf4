//! # Ephemeral Effects
//!
//! Short-lived cosmetic effects (footprints, sparks, frost and lava marks,
//! embers, afterimages, cosmetic trails, menu ambience).
//!
//! ## Lifecycle
//!
//! 1. Spawn: written into the next ring slot, progress = 1.0
//! 2. Render: drawn the same frame, at full strength
//! 3. Tick: decays from the next frame on
//! 4. Expire: inactive on the tick its time runs out
//!
//! Nothing is allocated after construction; spawn storms evict the
//! oldest-written effect.

mod kind;
mod pool;
pub mod renderers;

pub use kind::{EffectKind, EffectLayer, TrailStyle};
pub use pool::{
    EffectColors, EffectPool, EffectSlot, PoolStats, DEFAULT_POOL_CAPACITY, MIN_LIFETIME,
};
pub use renderers::{EffectView, FOOTPRINT_ALPHA};
