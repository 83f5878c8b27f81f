//! Thread-safe jitter buffer
//!
//! [`JitterBuffer`] puts an [`OrderedRing`] behind a lock so producers and the
//! playout consumer can share it. Every operation takes the lock once, runs
//! to completion and releases it. Frames are copied in and copied out; no
//! reference to slot storage ever leaves the lock.
//!
//! ```
//! use jitter_core::JitterBuffer;
//!
//! let buffer = JitterBuffer::new(5, 160)?;
//! assert!(buffer.put(&[1u8; 160], 1));
//! assert!(buffer.put(&[3u8; 160], 3));
//! assert!(buffer.put(&[2u8; 160], 2));
//!
//! // Older than the head, so rejected
//! assert!(!buffer.put(&[0u8; 160], 0));
//!
//! let mut frame = [0u8; 160];
//! for expected in 1..=3u8 {
//!     assert!(buffer.get(&mut frame));
//!     assert_eq!(frame[0], expected);
//! }
//! assert!(!buffer.get(&mut frame));
//! # Ok::<(), jitter_core::JitterError>(())
//! ```

use parking_lot::lock_api::{Mutex, RawMutex};

use crate::config::JitterBufferConfig;
use crate::error::Result;
use crate::lock::RawSpinLock;
use crate::ring::{Frame, Insertion, OrderedRing};
use crate::stats::JitterBufferStats;

/// Sequence-ordered, fixed-capacity jitter buffer.
///
/// The lock type defaults to a spin lock. Any `lock_api::RawMutex` works, for
/// example [`ParkingJitterBuffer`] uses `parking_lot::RawMutex`.
pub struct JitterBuffer<R: RawMutex = RawSpinLock> {
    capacity: usize,
    frame_size: usize,
    ring: Mutex<R, OrderedRing>,
}

/// Jitter buffer whose waiters park instead of spinning
pub type ParkingJitterBuffer = JitterBuffer<parking_lot::RawMutex>;

impl JitterBuffer<RawSpinLock> {
    /// Create a buffer holding up to `capacity` frames of `frame_size` bytes.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either size is zero, `StorageOverflow` if the
    /// total size does not fit in `usize`, `AllocationError` if the frame
    /// storage cannot be reserved.
    pub fn new(capacity: usize, frame_size: usize) -> Result<Self> {
        Self::from_config(JitterBufferConfig::new(capacity, frame_size))
    }

    /// Create a buffer from a full configuration
    pub fn with_config(config: JitterBufferConfig) -> Result<Self> {
        Self::from_config(config)
    }
}

impl<R: RawMutex> JitterBuffer<R> {
    /// Create a buffer using lock type `R`
    pub fn from_config(config: JitterBufferConfig) -> Result<Self> {
        let ring = OrderedRing::new(&config)?;
        Ok(Self {
            capacity: config.capacity,
            frame_size: config.frame_size,
            ring: Mutex::new(ring),
        })
    }

    /// Maximum number of frames
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of every frame in bytes
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Number of buffered frames
    pub fn count(&self) -> usize {
        self.ring.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ring.lock().is_full()
    }

    /// Discard every buffered frame
    pub fn flush(&self) {
        self.ring.lock().flush();
    }

    /// Insert a frame tagged `seq`.
    ///
    /// Returns `false` if the frame is older than the current head (or is not
    /// `frame_size` bytes long); the buffer is unchanged in that case. A full
    /// buffer silently drops its oldest frame to make room.
    pub fn put(&self, frame: &[u8], seq: u32) -> bool {
        self.insert(frame, seq).is_ok()
    }

    /// Insert a frame, reporting why it was rejected or what it evicted
    pub fn insert(&self, frame: &[u8], seq: u32) -> Result<Insertion> {
        self.ring.lock().insert(frame, seq)
    }

    /// Copy the lowest-sequence frame into `out` and remove it.
    ///
    /// Returns `false` and leaves `out` untouched if the buffer is empty.
    pub fn get(&self, out: &mut [u8]) -> bool {
        self.pop_into(out).is_ok()
    }

    /// Copy the lowest-sequence frame into `out`, returning its sequence number
    pub fn pop_into(&self, out: &mut [u8]) -> Result<u32> {
        self.ring.lock().pop_into(out)
    }

    /// Remove the lowest-sequence frame and return an owned copy
    pub fn pop(&self) -> Option<Frame> {
        self.ring.lock().pop()
    }

    /// Sequence number of the next frame `get` would return
    pub fn head_seq(&self) -> Option<u32> {
        self.ring.lock().head_seq()
    }

    /// Buffered sequence numbers in playout order
    pub fn sequence_numbers(&self) -> Vec<u32> {
        self.ring.lock().sequence_numbers()
    }

    pub fn stats(&self) -> JitterBufferStats {
        self.ring.lock().stats()
    }
}

impl<R: RawMutex> std::fmt::Debug for JitterBuffer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JitterBuffer")
            .field("capacity", &self.capacity)
            .field("frame_size", &self.frame_size)
            .field("count", &self.count())
            .finish()
    }
}
