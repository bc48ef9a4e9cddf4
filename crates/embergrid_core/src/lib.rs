//! # EMBERGRID Core
//!
//! Allocation-free building blocks for the tile-arcade render layer:
//! - Fixed-capacity ring pool with oldest-write eviction
//! - 2D vectors for world/pixel space
//! - 8-bit colour payloads
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations after construction** - pools are fixed arrays
//! 2. **Plain data** - every type here is `Copy` and `Pod`
//! 3. **No rendering knowledge** - drawing lives in `embergrid_rendering`
//!
//! ## Example
//!
//! ```rust
//! use embergrid_core::RingPool;
//!
//! let mut pool: RingPool<u32, 3> = RingPool::new();
//! for value in 1..=4 {
//!     pool.write(value);
//! }
//! // The first write was overwritten by the fourth.
//! assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![4, 2, 3]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod math;
pub mod memory;

pub use color::{Rgb, Rgba};
pub use math::Vec2;
pub use memory::{Overwritten, RingPool};
