//! Frame bookkeeping.
//!
//! Per-frame results and running statistics reported by the
//! [`FrameOrchestrator`](crate::integration::FrameOrchestrator).

mod frame;
mod stats;

pub use frame::FrameResult;
pub use stats::RenderLoopStats;
