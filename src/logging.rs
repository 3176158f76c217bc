//! Logging setup for diagnostics.
//!
//! Logs go to stderr so stdout stays clean for report output. Levels are
//! configurable via `RUST_LOG` or the CLI verbosity flags.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Disable logging entirely
    Off,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            // Filtered out by the off directive
            LogLevel::Error | LogLevel::Off => Level::ERROR,
        }
    }
}

impl From<u8> for LogLevel {
    /// Convert verbosity count to log level: 0 = Info, 1 = Debug, 2+ = Trace.
    fn from(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Configuration for logging output.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            ..Self::default()
        }
    }

    pub fn with_verbosity(verbosity: u8) -> Self {
        Self {
            level: LogLevel::from(verbosity),
            with_target: verbosity > 1,
        }
    }
}

/// Initialize the global tracing subscriber. `RUST_LOG` wins over the
/// configured level when set. Safe to call once per process.
pub fn init_logging(config: &LoggingConfig) {
    let filter = if config.level == LogLevel::Off {
        EnvFilter::new("off")
    } else {
        let level: Level = config.level.into();
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(config.with_target)
        .init();
}
