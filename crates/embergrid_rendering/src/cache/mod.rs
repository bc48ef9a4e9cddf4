//! # Render Surface Cache
//!
//! The floor layer costs hundreds of primitive calls to draw but changes
//! only when the theme key or the grid size changes. It is rasterized once
//! into an off-screen [`Surface`](crate::draw::Surface) and blitted every
//! frame after that.
//!
//! ```text
//! Empty ──ensure_fresh──► Stale ──rebuild──► Fresh
//!                           ▲                  │
//!                           └── key/size change, invalidate
//! ```

mod surface_cache;

pub use surface_cache::{CacheState, CacheStats, SurfaceCache};
