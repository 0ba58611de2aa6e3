//! Timestamp rendering.
//!
//! The formatter is a plain value handed to the sanitizer, never a shared
//! instance. Two profiles exist: a fixed, locale-free format for reproducible
//! output and a medium date/time style for human reading.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use serde::{Deserialize, Serialize};

/// `yyyy-MM-dd HH:mm:ss Z` in UTC.
pub const FIXED_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Medium date style followed by medium time style.
pub const MEDIUM_FORMAT: &str = "%b %-d, %Y at %-I:%M:%S %p";

/// How timestamps are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum DateFormat {
    /// Fixed format in UTC (default).
    #[default]
    Fixed,
    /// Medium style at a fixed offset from UTC.
    Medium {
        /// Offset east of UTC in seconds.
        #[serde(default)]
        utc_offset_seconds: i32,
    },
    /// Medium style in the process's local time zone.
    Local,
}

impl std::str::FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" | "utc" | "stable" => Ok(DateFormat::Fixed),
            "medium" => Ok(DateFormat::Medium {
                utc_offset_seconds: 0,
            }),
            "local" => Ok(DateFormat::Local),
            _ => Err(format!("unknown date format: {}", s)),
        }
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateFormat::Fixed => write!(f, "fixed"),
            DateFormat::Medium { .. } => write!(f, "medium"),
            DateFormat::Local => write!(f, "local"),
        }
    }
}

/// Renders timestamps according to a [`DateFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFormatter {
    format: DateFormat,
}

impl DateFormatter {
    /// Create a formatter for the given profile.
    pub fn new(format: DateFormat) -> Self {
        Self { format }
    }

    /// The profile in use.
    pub fn date_format(&self) -> DateFormat {
        self.format
    }

    /// Render a timestamp.
    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        match self.format {
            DateFormat::Fixed => timestamp.format(FIXED_FORMAT).to_string(),
            DateFormat::Medium { utc_offset_seconds } => {
                // Out-of-range offsets render in UTC
                let offset = FixedOffset::east_opt(utc_offset_seconds).unwrap_or_else(|| Utc.fix());
                timestamp
                    .with_timezone(&offset)
                    .format(MEDIUM_FORMAT)
                    .to_string()
            }
            DateFormat::Local => timestamp
                .with_timezone(&Local)
                .format(MEDIUM_FORMAT)
                .to_string(),
        }
    }
}
