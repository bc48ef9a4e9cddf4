//! # Memory Management
//!
//! Pre-allocated storage for short-lived render data.
//!
//! ## Design Philosophy
//!
//! All memory is allocated once at startup. During gameplay:
//! - No heap allocations
//! - No free lists, no handles
//! - Predictable, flat cost per write

mod ring_pool;

pub use ring_pool::{Overwritten, RingPool};
