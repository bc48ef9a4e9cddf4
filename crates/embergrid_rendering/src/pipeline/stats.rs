//! Running frame statistics.

use super::FrameResult;

/// Statistics accumulated over every rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderLoopStats {
    /// Total frames rendered.
    pub total_frames: u64,
    /// Average frame time (microseconds).
    pub avg_frame_time_us: u32,
    /// Worst frame time (microseconds).
    pub worst_frame_time_us: u32,
    /// Frames over budget.
    pub frames_over_budget: u32,
    /// Floor cache rebuilds.
    pub floor_rebuilds: u32,
    /// Effects spawned.
    pub effects_spawned: u64,
}

impl RenderLoopStats {
    /// Folds one frame into the totals.
    pub fn record(&mut self, frame: &FrameResult) {
        self.total_frames += 1;
        let n = self.total_frames;
        let avg = u64::from(self.avg_frame_time_us);
        let sample = u64::from(frame.frame_time_us);
        // Incremental mean.
        let next = if sample >= avg {
            avg + (sample - avg) / n
        } else {
            avg - (avg - sample) / n
        };
        self.avg_frame_time_us = u32::try_from(next).unwrap_or(u32::MAX);
        self.worst_frame_time_us = self.worst_frame_time_us.max(frame.frame_time_us);
        if frame.over_budget {
            self.frames_over_budget += 1;
        }
        if frame.floor_rebuilt {
            self.floor_rebuilds += 1;
        }
        self.effects_spawned += u64::from(frame.spawned);
    }

    /// Fraction of frames that blew the budget.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn over_budget_ratio(&self) -> f32 {
        if self.total_frames == 0 {
            0.0
        } else {
            self.frames_over_budget as f32 / self.total_frames as f32
        }
    }
}
