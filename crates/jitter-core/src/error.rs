//! Error handling for the jitter buffer
//!
//! Construction-time failures (`InvalidArgument`, `StorageOverflow`,
//! `AllocationError`) are fatal to that buffer instance. Steady-state
//! failures (`LateArrival`, `Empty`, `FrameSizeMismatch`) never modify the
//! buffer and the caller may simply continue.

use thiserror::Error;

/// Result type alias for jitter buffer operations
pub type Result<T> = std::result::Result<T, JitterError>;

/// Error type for jitter buffer operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JitterError {
    /// Capacity or frame size is zero, or a config value is out of range
    #[error("Invalid argument: {details}")]
    InvalidArgument { details: String },

    /// Backing storage could not be reserved
    #[error("Allocation failed: could not reserve {requested} bytes of frame storage")]
    AllocationError { requested: usize },

    /// `capacity * frame_size` does not fit in `usize`
    #[error("Storage size overflow: {capacity} frames of {frame_size} bytes")]
    StorageOverflow { capacity: usize, frame_size: usize },

    /// Frame sequence number is below the current head
    #[error("Late arrival: seq {seq} is older than head seq {head_seq}")]
    LateArrival { seq: u32, head_seq: u32 },

    /// No frame buffered
    #[error("Jitter buffer is empty")]
    Empty,

    /// Caller buffer length does not match the configured frame size
    #[error("Frame size mismatch: expected {expected} bytes, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    /// Configuration text could not be parsed
    #[error("Configuration error: {details}")]
    Config { details: String },
}

impl JitterError {
    /// Create a new invalid argument error
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::InvalidArgument {
            details: details.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config {
            details: details.into(),
        }
    }

    /// Check if the error leaves the buffer usable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::LateArrival { .. } | Self::Empty | Self::FrameSizeMismatch { .. }
        )
    }
}

impl From<toml::de::Error> for JitterError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}
