//! Sequence-ordered frame ring
//!
//! `OrderedRing` owns the frame storage and implements the ordering policy.
//! It has no synchronization of its own; [`crate::JitterBuffer`] wraps it in
//! a lock.
//!
//! Frame bytes live in one contiguous block allocated up front. Each slot
//! holds a sequence tag plus the offset of its bytes in that block, so
//! reordering swaps slot entries and never moves payload.
//!
//! The occupied region is `head, head + 1, ..., head + count - 1` (mod
//! capacity) and is kept non-decreasing by sequence number after every
//! insert. Sequence numbers are compared as plain `u32` values; 16-bit RTP
//! wraparound is not handled here.

use std::mem;

use tracing::{debug, trace};

use crate::config::{EmptyBaseline, JitterBufferConfig};
use crate::error::{JitterError, Result};
use crate::stats::JitterBufferStats;

#[derive(Debug, Clone, Copy)]
struct Slot {
    seq: u32,
    offset: usize,
}

/// A frame copied out of the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Sequence number the frame was inserted with
    pub seq: u32,
    /// Frame payload, always `frame_size` bytes
    pub data: Vec<u8>,
}

/// Outcome of a successful insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    /// Sequence number of the frame evicted to make room, if the ring was full
    pub evicted: Option<u32>,
    /// How many positions the new frame moved back from the tail
    pub shifted: usize,
}

/// Unsynchronized ordered ring of fixed-size frames
#[derive(Debug)]
pub struct OrderedRing {
    storage: Vec<u8>,
    slots: Vec<Slot>,
    frame_size: usize,
    head: usize,
    count: usize,
    empty_baseline: EmptyBaseline,
    stats: JitterBufferStats,
}

impl OrderedRing {
    /// Allocate a ring for `config.capacity` zeroed frames of
    /// `config.frame_size` bytes each
    pub fn new(config: &JitterBufferConfig) -> Result<Self> {
        config.validate()?;
        let capacity = config.capacity;
        let frame_size = config.frame_size;

        let total = capacity
            .checked_mul(frame_size)
            .ok_or(JitterError::StorageOverflow { capacity, frame_size })?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(total)
            .map_err(|_| JitterError::AllocationError { requested: total })?;
        storage.resize(total, 0);

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| JitterError::AllocationError {
                requested: capacity.saturating_mul(mem::size_of::<Slot>()),
            })?;
        slots.extend((0..capacity).map(|idx| Slot {
            seq: 0,
            offset: idx * frame_size,
        }));

        debug!(capacity, frame_size, "Allocated frame ring");

        Ok(Self {
            storage,
            slots,
            frame_size,
            head: 0,
            count: 0,
            empty_baseline: config.empty_baseline,
            stats: JitterBufferStats {
                capacity,
                ..Default::default()
            },
        })
    }

    /// Maximum number of frames
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Size of every frame in bytes
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Sequence number of the oldest buffered frame
    pub fn head_seq(&self) -> Option<u32> {
        if self.is_empty() {
            None
        } else {
            Some(self.slots[self.head].seq)
        }
    }

    /// Sequence numbers of the buffered frames, oldest first
    pub fn sequence_numbers(&self) -> Vec<u32> {
        (0..self.count).map(|pos| self.slots[self.index(pos)].seq).collect()
    }

    /// Insert a frame, keeping the ring sorted by sequence number.
    ///
    /// A frame older than the head is rejected without touching the ring.
    /// When full, the head frame is evicted first.
    pub fn insert(&mut self, frame: &[u8], seq: u32) -> Result<Insertion> {
        self.check_len(frame.len())?;

        if let Some(head_seq) = self.baseline() {
            if seq < head_seq {
                self.stats.late_arrivals += 1;
                debug!(seq, head_seq, "Rejected late frame");
                return Err(JitterError::LateArrival { seq, head_seq });
            }
        }

        let evicted = if self.is_full() {
            let dropped = self.slots[self.head].seq;
            self.head = (self.head + 1) % self.capacity();
            self.count -= 1;
            self.stats.overflow_evictions += 1;
            debug!(evicted = dropped, seq, "Buffer full, evicted head frame");
            Some(dropped)
        } else {
            None
        };

        // Empty ring writes at head itself, since index(0) == head
        let tail = self.index(self.count);
        let offset = self.slots[tail].offset;
        self.storage[offset..offset + self.frame_size].copy_from_slice(frame);
        self.slots[tail].seq = seq;
        self.count += 1;

        // One insertion-sort pass from the tail towards the head
        let mut pos = self.count - 1;
        while pos > 0 {
            let curr = self.index(pos);
            let prev = self.index(pos - 1);
            if self.slots[curr].seq >= self.slots[prev].seq {
                break;
            }
            self.slots.swap(curr, prev);
            pos -= 1;
        }
        let shifted = self.count - 1 - pos;

        debug_assert!(self.is_sorted(), "ring lost sequence order after insert");

        self.stats.frames_inserted += 1;
        if shifted > 0 {
            self.stats.frames_reordered += 1;
        }
        trace!(seq, shifted, count = self.count, "Inserted frame");

        Ok(Insertion { evicted, shifted })
    }

    /// Copy the head frame into `out` and remove it. Returns its sequence
    /// number. `out` is untouched on error.
    pub fn pop_into(&mut self, out: &mut [u8]) -> Result<u32> {
        self.check_len(out.len())?;
        let (seq, offset) = self.take_head()?;
        out.copy_from_slice(&self.storage[offset..offset + self.frame_size]);
        Ok(seq)
    }

    /// Remove the head frame and return an owned copy
    pub fn pop(&mut self) -> Option<Frame> {
        let (seq, offset) = self.take_head().ok()?;
        Some(Frame {
            seq,
            data: self.storage[offset..offset + self.frame_size].to_vec(),
        })
    }

    /// Drop all buffered frames. Slot bytes and tags are left as they are.
    pub fn flush(&mut self) {
        debug!(discarded = self.count, "Flushing frame ring");
        self.head = 0;
        self.count = 0;
        self.stats.flushes += 1;
    }

    /// Counter snapshot
    pub fn stats(&self) -> JitterBufferStats {
        JitterBufferStats {
            buffered_frames: self.count,
            ..self.stats.clone()
        }
    }

    // Advances past the head slot. The slot's bytes stay valid until the
    // next insert, so callers copy them out before releasing the ring.
    fn take_head(&mut self) -> Result<(u32, usize)> {
        if self.is_empty() {
            self.stats.underruns += 1;
            return Err(JitterError::Empty);
        }
        let slot = self.slots[self.head];
        self.head = (self.head + 1) % self.capacity();
        self.count -= 1;
        self.stats.frames_played += 1;
        trace!(seq = slot.seq, count = self.count, "Popped frame");
        Ok((slot.seq, slot.offset))
    }

    fn baseline(&self) -> Option<u32> {
        match (self.is_empty(), self.empty_baseline) {
            (false, _) | (true, EmptyBaseline::StaleHead) => Some(self.slots[self.head].seq),
            (true, EmptyBaseline::Unbounded) => None,
        }
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual != self.frame_size {
            return Err(JitterError::FrameSizeMismatch {
                expected: self.frame_size,
                actual,
            });
        }
        Ok(())
    }

    fn index(&self, pos: usize) -> usize {
        (self.head + pos) % self.capacity()
    }

    fn is_sorted(&self) -> bool {
        (1..self.count).all(|pos| {
            self.slots[self.index(pos - 1)].seq <= self.slots[self.index(pos)].seq
        })
    }
}
