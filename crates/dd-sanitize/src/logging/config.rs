//! Logging configuration.
//!
//! Resolved from `DD_LOG` (a level name), `RUST_LOG` (filter directives) and
//! `DD_LOG_FORMAT` (`human` or `jsonl`), then from explicit caller overrides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Console text (default).
    #[default]
    Human,
    /// One JSON object per line.
    Jsonl,
}

impl LogFormat {
    const ALL: [LogFormat; 2] = [LogFormat::Human, LogFormat::Jsonl];

    fn name(self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        }
    }
}

/// Minimum severity that reaches the output, most verbose first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Includes per-leaf redaction events.
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Nothing is emitted.
    Off,
}

impl LogLevel {
    const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ];

    fn name(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    /// The equivalent subscriber filter.
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }

    /// Most verbose level named by a `RUST_LOG`-style directive list, e.g.
    /// `warn,dd_sanitize=trace` yields `Trace`.
    fn from_directives(directives: &str) -> Option<Self> {
        directives
            .split(',')
            .filter_map(|directive| directive.rsplit('=').next())
            .filter_map(|level| level.trim().parse().ok())
            .min()
    }
}

macro_rules! named_enum_text {
    ($ty:ident, $what:literal) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|candidate| candidate.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!(concat!("unknown log ", $what, ": {}"), s))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_enum_text!(LogFormat, "format");
named_enum_text!(LogLevel, "level");

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Prefix human output with timestamps.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::default(),
            level: LogLevel::default(),
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Resolve from the process environment, then apply explicit overrides.
    pub fn from_env(level: Option<LogLevel>, format: Option<LogFormat>) -> Self {
        Self::from_lookup(|name| std::env::var(name).ok(), level, format)
    }

    /// Resolve from a variable lookup, then apply explicit overrides.
    ///
    /// Unparseable values are ignored. `DD_LOG` shadows `RUST_LOG` even when
    /// it does not parse.
    pub fn from_lookup<F>(lookup: F, level: Option<LogLevel>, format: Option<LogFormat>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_level = match lookup("DD_LOG") {
            Some(name) => name.trim().parse().ok(),
            None => lookup("RUST_LOG").and_then(|d| LogLevel::from_directives(&d)),
        };
        let env_format = lookup("DD_LOG_FORMAT").and_then(|name| name.trim().parse().ok());

        LogConfig {
            format: format.or(env_format).unwrap_or_default(),
            level: level.or(env_level).unwrap_or_default(),
            timestamps: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_names_round_trip_case_insensitively() {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().to_uppercase().parse::<LogLevel>(), Ok(level));
        }
        for format in LogFormat::ALL {
            assert_eq!(format.to_string().parse::<LogFormat>(), Ok(format));
        }
        assert_eq!(
            "json".parse::<LogFormat>(),
            Err("unknown log format: json".to_string())
        );
        assert!("warning".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(LogLevel::Trace.filter(), LevelFilter::TRACE);
        assert_eq!(LogLevel::Off.filter(), LevelFilter::OFF);
    }

    #[test]
    fn test_rust_log_picks_most_verbose_directive() {
        assert_eq!(
            LogLevel::from_directives("warn,dd_sanitize=trace"),
            Some(LogLevel::Trace)
        );
        assert_eq!(LogLevel::from_directives("dd_inspect=error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_directives("dd_inspect"), None);
    }

    #[test]
    fn test_dd_log_shadows_rust_log() {
        let config = LogConfig::from_lookup(
            vars(&[("DD_LOG", "error"), ("RUST_LOG", "trace")]),
            None,
            None,
        );
        assert_eq!(config.level, LogLevel::Error);

        let config = LogConfig::from_lookup(
            vars(&[("DD_LOG", "loud"), ("RUST_LOG", "trace")]),
            None,
            None,
        );
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn test_rust_log_fallback_and_format() {
        let config = LogConfig::from_lookup(
            vars(&[("RUST_LOG", "dd_sanitize=debug"), ("DD_LOG_FORMAT", "jsonl")]),
            None,
            None,
        );
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Jsonl);
        assert!(config.timestamps);
    }

    #[test]
    fn test_explicit_overrides_win() {
        let config = LogConfig::from_lookup(
            vars(&[("DD_LOG", "trace"), ("DD_LOG_FORMAT", "jsonl")]),
            Some(LogLevel::Warn),
            Some(LogFormat::Human),
        );
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Human);
    }
}
