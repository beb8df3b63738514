//! Locale-invariant timestamp parsing and formatting.
//!
//! Parsing never consults the host locale. Accepted inputs, in order:
//! configured extra formats, RFC 3339 (offsets are normalised to UTC),
//! ISO-8601 date-times with `T` or a space, and date-only forms. The
//! slash-separated month-first form is the invariant-culture reading.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::convert::error::ConversionError;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y"];

/// Timestamp parser with optional extra formats.
#[derive(Debug, Clone, Default)]
pub struct TimestampParser {
    extra_formats: Vec<String>,
}

impl TimestampParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `strftime`-style formats tried before the built-in ones.
    ///
    /// A format without time fields is treated as a date at midnight.
    pub fn with_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_formats
            .extend(formats.into_iter().map(Into::into));
        self
    }

    pub fn extra_formats(&self) -> &[String] {
        &self.extra_formats
    }

    /// Parse `text` as a timestamp.
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime, ConversionError> {
        let text = text.trim();

        for format in &self.extra_formats {
            if let Some(dt) = parse_with(text, format) {
                return Ok(dt);
            }
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(dt.naive_utc());
        }

        DATE_TIME_FORMATS
            .iter()
            .chain(DATE_FORMATS)
            .find_map(|format| parse_with(text, format))
            .ok_or_else(|| ConversionError::Parse {
                input: text.to_string(),
                target: "datetime".to_string(),
            })
    }
}

fn parse_with(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Parse with the built-in formats only.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, ConversionError> {
    TimestampParser::new().parse(text)
}

/// Render a timestamp as ISO-8601, with fractional seconds only when present.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }
}
