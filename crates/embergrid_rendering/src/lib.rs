//! # EMBERGRID Rendering
//!
//! Frame-stepped 2D render layer for a tile-based arcade game:
//! - Ring-buffer pool of short-lived cosmetic effects, no allocation after init
//! - Keyed off-screen cache for the static floor layer
//! - Orchestrator that ticks, rebuilds, spawns and draws in a fixed order
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     FRAME ORCHESTRATOR                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ThemeSource → FloorKey → SurfaceCache ──blit──┐            │
//! │                                                ↓            │
//! │  WorldReader → SpawnTracker → EffectPool → Canvas           │
//! │                                   ↑            ↑            │
//! │                         tick(dt)  │   entities ┘            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - Single thread, no locks, no async
//! - Game state is read-only here
//! - The frame path never fails; degenerate inputs are clamped

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cache;
pub mod config;
pub mod draw;
pub mod effects;
pub mod error;
pub mod floor;
pub mod integration;
pub mod pipeline;
pub mod theme;

pub use cache::{CacheState, CacheStats, SurfaceCache};
pub use config::{GridConfig, LifetimeConfig, RenderConfig, SpawnConfig};
pub use draw::{
    Canvas, CommandRecorder, DrawCommand, Rect, SoftShadow, Surface, Translated, MAX_SURFACE_EDGE,
};
pub use effects::{
    EffectColors, EffectKind, EffectLayer, EffectPool, EffectSlot, PoolStats, TrailStyle,
};
pub use error::{ConfigError, ConfigResult};
pub use floor::{rasterize_floor, FloorLayout};
pub use integration::{
    EntityFlags, EntityKind, EntitySnapshot, FrameOrchestrator, SceneMode, WorldReader,
    WorldSnapshot,
};
pub use pipeline::{FrameResult, RenderLoopStats};
pub use theme::{FloorKey, Palette, ThemeSource, ThemeTable, VisualStyle};
