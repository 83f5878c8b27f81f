//! # Jitter-Core: Sequence-Ordered Jitter Buffer
//!
//! A fixed-capacity buffer that absorbs arrival-time variance in a stream of
//! fixed-size media frames before they are played out at a steady rate.
//!
//! ## Behavior
//!
//! - **Reordering**: frames are kept sorted by sequence number, so `get`
//!   always returns the lowest buffered sequence number
//! - **Late arrivals**: a frame older than the current head is rejected
//! - **Overflow**: inserting into a full buffer evicts the oldest frame
//! - **Fixed storage**: all frame slots are allocated once at creation
//! - **Thread safety**: every operation is serialized by a short spin lock
//!
//! ## Usage
//!
//! ```rust
//! use jitter_core::JitterBuffer;
//!
//! let buffer = JitterBuffer::new(5, 160)?;
//! for seq in [0u32, 3, 1, 2] {
//!     buffer.put(&[seq as u8; 160], seq);
//! }
//!
//! let mut frame = [0u8; 160];
//! let mut played = Vec::new();
//! while buffer.get(&mut frame) {
//!     played.push(frame[0]);
//! }
//! assert_eq!(played, vec![0, 1, 2, 3]);
//! # Ok::<(), jitter_core::JitterError>(())
//! ```
//!
//! Sequence numbers are compared as plain `u32` values. Callers feeding
//! 16-bit RTP sequence numbers should extend them before insertion.

pub mod buffer;
pub mod config;
pub mod error;
pub mod lock;
pub mod logging;
pub mod ring;
pub mod stats;

pub use buffer::{JitterBuffer, ParkingJitterBuffer};
pub use config::{EmptyBaseline, JitterBufferConfig};
pub use error::{JitterError, Result};
pub use lock::{RawSpinLock, SpinMutex, SpinMutexGuard};
pub use logging::{init_logging, LoggingConfig};
pub use ring::{Frame, Insertion, OrderedRing};
pub use stats::JitterBufferStats;

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
