//! Tracing subscriber setup for applications embedding the jitter buffer

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{JitterError, Result};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// The log level to use
    pub level: Level,
    /// Whether to include file and line information
    pub file_info: bool,
    /// Whether to include the thread name in each line
    pub thread_names: bool,
    /// Write through the test harness so output is captured per test
    pub test_writer: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: Level::INFO,
            file_info: false,
            thread_names: false,
            test_writer: false,
        }
    }
}

impl LoggingConfig {
    pub fn new(level: Level) -> Self {
        LoggingConfig {
            level,
            ..Default::default()
        }
    }

    /// Enable file and line information in logs
    pub fn with_file_info(mut self) -> Self {
        self.file_info = true;
        self
    }

    /// Enable thread names in logs
    pub fn with_thread_names(mut self) -> Self {
        self.thread_names = true;
        self
    }

    /// Route output through libtest's capture
    pub fn with_test_writer(mut self) -> Self {
        self.test_writer = true;
        self
    }
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` directives are honored on top of `config.level`.
///
/// # Errors
///
/// `Config` if a global subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(config.level.into());

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_file(config.file_info)
        .with_line_number(config.file_info)
        .with_thread_names(config.thread_names);

    let installed = if config.test_writer {
        builder.with_test_writer().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| JitterError::config(format!("Logging already initialized: {}", e)))?;

    tracing::debug!("jitter-core v{} logging initialized", crate::VERSION);
    Ok(())
}

/// Parse a log level from a string
pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level).map_err(|_| JitterError::config(format!("Invalid log level: {}", level)))
}
