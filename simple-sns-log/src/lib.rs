//! Simple SNS Logging
//!
//! The simple-sns crates emit `tracing` events (remote call timings, delivery
//! failures, batch summaries). This crate turns them into output, configured
//! from the environment.
//!
//! # Usage
//!
//! ```rust
//! // Installs a global subscriber once; later calls return false.
//! let installed = simple_sns_log::init();
//! # let _ = installed;
//! ```
//!
//! # Environment Variables
//!
//! - `SIMPLE_SNS_DEBUG=1` - Enable debug logging
//! - `SIMPLE_SNS_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `SIMPLE_SNS_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `RUST_LOG` - Full `EnvFilter` directive, overrides the level

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level
    Error,
    /// No logging
    Off,
}

impl Level {
    /// Parse a level name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// `EnvFilter` directive for this level.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line human readable output
    Pretty,
    /// Single-line output
    Compact,
    /// One JSON object per event
    Json,
}

impl Format {
    /// Parse a format name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// ANSI colors (ignored for JSON)
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Json,
            ansi: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| {
            lookup(key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        };

        let debug = flag("SIMPLE_SNS_DEBUG").unwrap_or(false);

        let level = lookup("SIMPLE_SNS_LOG_LEVEL")
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup("SIMPLE_SNS_LOG_FORMAT")
            .and_then(|s| Format::parse(&s))
            .unwrap_or(Format::Json);

        let ansi = format != Format::Json && lookup("NO_COLOR").is_none();

        Self {
            level,
            format,
            ansi,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_filter()))
    }
}

/// Install a global subscriber configured from the environment.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init() -> bool {
    init_with(&LogConfig::from_env())
}

/// Install a global subscriber with the given configuration.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with(config: &LogConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.filter());

    let result = match config.format {
        Format::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        Format::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(config.ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        Format::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(config.ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.is_ok()
}
