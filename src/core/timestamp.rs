//! Timestamp prefixes for sinks that want them
//!
//! Rendered messages carry no structure of their own. File and console sinks
//! can optionally stamp each write with the time it reached them.

use super::error::{OutputError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// How a sink renders the time of a write
///
/// # Examples
///
/// ```
/// use rust_spew_system::TimestampFormat;
/// use chrono::Utc;
///
/// let stamp = TimestampFormat::Iso8601.format(&Utc::now()).unwrap();
/// assert!(stamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Seconds since the epoch: `1736332245`
    Unix,

    /// Milliseconds since the epoch: `1736332245123`
    UnixMillis,

    /// Any strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    /// Render `datetime`. Fails only for a `Custom` string chrono cannot parse.
    pub fn format(&self, datetime: &DateTime<Utc>) -> Result<String> {
        let rendered = match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                write!(out, "{}", datetime.format(format_str)).map_err(|_| {
                    OutputError::config(
                        "timestamp",
                        format!("invalid strftime format '{}'", format_str),
                    )
                })?;
                out
            }
        };
        Ok(rendered)
    }

    /// `"[<now>] "`, ready to be written ahead of a message
    pub fn prefix_now(&self) -> Result<String> {
        Ok(format!("[{}] ", self.format(&Utc::now())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime()).unwrap();
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime()).unwrap();
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_formats() {
        let secs: i64 = TimestampFormat::Unix
            .format(&fixed_datetime())
            .unwrap()
            .parse()
            .unwrap();
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(millis, secs * 1000 + 123);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()).unwrap(), "2025/01/08 10:30");
    }

    #[test]
    fn test_invalid_custom_format_is_an_error() {
        let format = TimestampFormat::Custom("%Y-%Q".to_string());
        let err = format.format(&fixed_datetime()).unwrap_err();
        assert!(matches!(err, OutputError::InvalidConfiguration { .. }));
        assert!(format.prefix_now().is_err());
    }

    #[test]
    fn test_prefix_shape() {
        let prefix = TimestampFormat::Unix.prefix_now().unwrap();
        assert!(prefix.starts_with('['));
        assert!(prefix.ends_with("] "));
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
