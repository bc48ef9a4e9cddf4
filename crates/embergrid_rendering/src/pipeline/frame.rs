//! Result of a single rendered frame.

/// Phase timings and counters of one `render` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameResult {
    /// Frame number, starting at 1.
    pub frame_number: u64,
    /// Total render time (microseconds).
    pub frame_time_us: u32,
    /// Time spent validating and blitting the floor.
    pub floor_us: u32,
    /// Time spent in spawn rules.
    pub spawn_us: u32,
    /// Time spent drawing effects, both layers.
    pub effects_us: u32,
    /// Time spent drawing entities.
    pub entities_us: u32,
    /// Whether the floor cache rebuilt this frame.
    pub floor_rebuilt: bool,
    /// Effects spawned this frame.
    pub spawned: u32,
    /// Entities drawn.
    pub entities_rendered: u32,
    /// Live effects after spawning.
    pub effects_alive: u32,
    /// Over budget warning.
    pub over_budget: bool,
}

impl FrameResult {
    /// Frame time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_us as f32 / 1000.0
    }
}
