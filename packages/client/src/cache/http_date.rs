//! HTTP date parsing and formatting utilities
//!
//! Converts between RFC 7231 HTTP-date text and `SystemTime`. Parsing returns
//! a `Result`; callers that want the unconditional-request fallback use
//! [`httpdate::to_instant_or_epoch`] explicitly.

use thiserror::Error;

/// HTTP date parsing error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpDateParseError {
    /// Date format was not recognized by any of the supported parsers
    #[error("Unrecognized HTTP date format: {0}")]
    UnrecognizedFormat(String),
    /// Date was parsed but represents a time before Unix epoch
    #[error("Invalid timestamp in HTTP date: {0}")]
    InvalidTimestamp(String),
}

/// HTTP date parsing utilities
pub mod httpdate {
    use std::time::{Duration, SystemTime};

    use chrono::{DateTime, NaiveDateTime, Utc};

    use super::HttpDateParseError;

    /// `If-Modified-Since` value sent when nothing is cached yet
    pub const EPOCH_SENTINEL: &str = "Thu, 01 Jan 1970 00:00:00 UTC";

    const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S";

    /// Parse HTTP date string into SystemTime following RFC 7231 formats
    pub fn parse_http_date(date_str: &str) -> Result<SystemTime, HttpDateParseError> {
        let trimmed = date_str.trim();

        // 1. IMF-fixdate (preferred): "Sun, 06 Nov 1994 08:49:37 GMT"
        //    "UTC" is accepted as a zone alias for the epoch sentinel.
        let fixdate = trimmed
            .strip_suffix(" GMT")
            .or_else(|| trimmed.strip_suffix(" UTC"));
        if let Some(stamp) = fixdate {
            if let Ok(dt) = NaiveDateTime::parse_from_str(stamp, IMF_FIXDATE) {
                return to_system_time(dt.and_utc().timestamp(), date_str);
            }

            // 2. RFC 850: "Sunday, 06-Nov-94 08:49:37 GMT"
            if let Ok(dt) = NaiveDateTime::parse_from_str(stamp, "%A, %d-%b-%y %H:%M:%S") {
                return to_system_time(dt.and_utc().timestamp(), date_str);
            }
        }

        // 3. ANSI C asctime(): "Sun Nov  6 08:49:37 1994", no zone, GMT implied
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%a %b %e %H:%M:%S %Y") {
            return to_system_time(dt.and_utc().timestamp(), date_str);
        }

        // RFC 2822 with a numeric offset as a last resort
        if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
            return to_system_time(dt.timestamp(), date_str);
        }

        Err(HttpDateParseError::UnrecognizedFormat(date_str.to_string()))
    }

    fn to_system_time(timestamp: i64, original: &str) -> Result<SystemTime, HttpDateParseError> {
        u64::try_from(timestamp)
            .map(|secs| SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .map_err(|_| HttpDateParseError::InvalidTimestamp(original.to_string()))
    }

    /// Format SystemTime as HTTP date string in RFC 7231 IMF-fixdate format
    ///
    /// Sub-second precision is dropped.
    pub fn fmt_http_date(time: SystemTime) -> String {
        let duration = time
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default();

        let secs = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
        let dt = DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default();

        dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    /// Parse `text`, falling back to the Unix epoch when it is absent or invalid
    pub fn to_instant_or_epoch(text: Option<&str>) -> SystemTime {
        text.and_then(|t| parse_http_date(t).ok())
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }
}
