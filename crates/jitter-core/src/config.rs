//! Jitter buffer configuration

use serde::{Deserialize, Serialize};

use crate::error::{JitterError, Result};

/// Default number of frame slots
pub const DEFAULT_CAPACITY: usize = 50;

/// Default frame size in bytes (20ms of G.711 at 8kHz)
pub const DEFAULT_FRAME_SIZE: usize = 160;

/// Lower bound used for late-arrival checks while the buffer is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyBaseline {
    /// An empty buffer accepts any sequence number
    #[default]
    Unbounded,

    /// Compare against whatever tag is left in the head slot. Slots start at
    /// 0 and keep their last tag after a drain or flush, so the first frame
    /// of a new cycle can be rejected.
    StaleHead,
}

/// Jitter buffer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterBufferConfig {
    /// Maximum number of frames held at once
    pub capacity: usize,

    /// Size of every frame in bytes
    pub frame_size: usize,

    /// Late-arrival baseline while empty
    pub empty_baseline: EmptyBaseline,
}

impl Default for JitterBufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            frame_size: DEFAULT_FRAME_SIZE,
            empty_baseline: EmptyBaseline::default(),
        }
    }
}

impl JitterBufferConfig {
    /// Create a configuration with the given capacity and frame size
    pub fn new(capacity: usize, frame_size: usize) -> Self {
        Self {
            capacity,
            frame_size,
            ..Default::default()
        }
    }

    /// Set the frame capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the frame size in bytes
    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    /// Set the empty-buffer baseline policy
    pub fn with_empty_baseline(mut self, baseline: EmptyBaseline) -> Self {
        self.empty_baseline = baseline;
        self
    }

    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that capacity and frame size are non-zero
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(JitterError::invalid_argument("capacity must be at least 1"));
        }
        if self.frame_size == 0 {
            return Err(JitterError::invalid_argument("frame_size must be at least 1"));
        }
        Ok(())
    }
}
