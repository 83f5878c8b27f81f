//! Jitter buffer statistics

use serde::{Deserialize, Serialize};

/// Snapshot of jitter buffer counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JitterBufferStats {
    /// Number of frames currently buffered
    pub buffered_frames: usize,

    /// Frame capacity
    pub capacity: usize,

    /// Frames accepted by `put`
    pub frames_inserted: u64,

    /// Accepted frames that had to be moved behind a newer frame
    pub frames_reordered: u64,

    /// Frames rejected for arriving behind the head
    pub late_arrivals: u64,

    /// Frames dropped from the head to make room on overflow
    pub overflow_evictions: u64,

    /// Frames handed out by `get`
    pub frames_played: u64,

    /// Reads attempted while empty
    pub underruns: u64,

    /// Number of flushes
    pub flushes: u64,
}

impl JitterBufferStats {
    /// Fraction of capacity currently occupied (0.0 - 1.0)
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.buffered_frames as f64 / self.capacity as f64
    }

    /// Fraction of offered frames that were discarded, either as late
    /// arrivals or by overflow eviction
    pub fn discard_ratio(&self) -> f64 {
        let offered = self.frames_inserted + self.late_arrivals;
        if offered == 0 {
            return 0.0;
        }
        (self.late_arrivals + self.overflow_evictions) as f64 / offered as f64
    }
}
