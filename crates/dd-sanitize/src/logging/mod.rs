//! Category loggers and subscriber set-up.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary (or test) via [`init_logging`].
//!
//! # Usage
//!
//! ```no_run
//! use dd_sanitize::logging::{init_logging, LogConfig, LogLevel, Logger};
//! use dd_sanitize::{Value, ValueMap};
//!
//! init_logging(&LogConfig::from_env(None, None)).ok();
//!
//! let log = Logger::new("network");
//! log.info(format_args!("request finished"));
//!
//! let mut payload = ValueMap::new();
//! payload.insert("status".to_string(), Value::from(200));
//! log.payload(LogLevel::Debug, "response", &payload);
//! ```

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use crate::{SanitizeError, Sanitizer, ValueMap};
use std::fmt;
use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as fmt_layer, EnvFilter};

/// Subsystem reported when the executable name cannot be determined.
pub const UNKNOWN_SUBSYSTEM: &str = "Unknown Bundle Identifier";

/// Install the global subscriber.
///
/// `RUST_LOG` directives win over the configured level when present. Fails
/// if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> crate::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.filter().into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Human => {
            let layer = fmt_layer::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal());
            if config.timestamps {
                registry.with(layer).try_init()
            } else {
                registry.with(layer.without_time()).try_init()
            }
        }
        LogFormat::Jsonl => registry
            .with(fmt_layer::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| SanitizeError::Logging(e.to_string()))
}

/// Name of the running executable, used as the default subsystem.
pub fn process_subsystem() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| UNKNOWN_SUBSYSTEM.to_string())
}

/// A logger bound to a subsystem and category.
///
/// Every event carries `subsystem` and `category` fields so output from
/// different parts of an application can be filtered apart.
#[derive(Debug, Clone)]
pub struct Logger {
    subsystem: String,
    category: String,
    sanitizer: Sanitizer,
}

impl Logger {
    /// Logger for `category` under the process subsystem.
    pub fn new(category: impl Into<String>) -> Self {
        Self::with_subsystem(process_subsystem(), category)
    }

    /// Logger with an explicit subsystem.
    pub fn with_subsystem(subsystem: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            subsystem: subsystem.into(),
            category: category.into(),
            sanitizer: Sanitizer::default(),
        }
    }

    /// Sanitizer used by [`payload`](Self::payload).
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// The subsystem name.
    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    /// The category name.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(subsystem = %self.subsystem, category = %self.category, "{}", args);
    }

    /// Logs an info-level message.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(subsystem = %self.subsystem, category = %self.category, "{}", args);
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(subsystem = %self.subsystem, category = %self.category, "{}", args);
    }

    /// Logs an error-level message.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(subsystem = %self.subsystem, category = %self.category, "{}", args);
    }

    /// Logs a message with a sanitized payload attached as `payload`.
    ///
    /// The payload is only rendered when the level is enabled.
    pub fn payload(&self, level: LogLevel, message: &str, map: &ValueMap) {
        macro_rules! emit {
            ($lvl:expr) => {
                if tracing::enabled!($lvl) {
                    let payload = self.sanitizer.make_description(map);
                    tracing::event!(
                        $lvl,
                        subsystem = %self.subsystem,
                        category = %self.category,
                        payload = %payload,
                        "{}",
                        message
                    );
                }
            };
        }

        match level {
            LogLevel::Trace => emit!(tracing::Level::TRACE),
            LogLevel::Debug => emit!(tracing::Level::DEBUG),
            LogLevel::Info => emit!(tracing::Level::INFO),
            LogLevel::Warn => emit!(tracing::Level::WARN),
            LogLevel::Error => emit!(tracing::Level::ERROR),
            LogLevel::Off => {}
        }
    }
}
