//! Parsing operator-entered times into the remote wire format.
//!
//! Entered times are civil date-times (no zone) in a fixed pattern, interpreted in
//! a configured IANA zone. The wire format is RFC 3339 carrying that zone's offset,
//! e.g. `2024-03-15T09:30:00+05:30`.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{CalctlError, CalctlResult};

/// Format and zone used for every entered time.
#[derive(Debug, Clone)]
pub struct TimeConfig {
    format: String,
    zone: Tz,
}

impl TimeConfig {
    pub fn new(format: &str, zone: &str) -> CalctlResult<Self> {
        let zone: Tz = zone
            .parse()
            .map_err(|_| CalctlError::Config(format!("Unknown time zone: {zone}")))?;

        Ok(TimeConfig {
            format: format.to_string(),
            zone,
        })
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn zone_name(&self) -> &'static str {
        self.zone.name()
    }

    /// Human-readable version of the pattern, e.g. `YYYY-MM-DD HH:MM`.
    pub fn expected_pattern(&self) -> String {
        self.format
            .replace("%Y", "YYYY")
            .replace("%m", "MM")
            .replace("%d", "DD")
            .replace("%H", "HH")
            .replace("%M", "MM")
            .replace("%S", "SS")
    }

    /// Parse an entered civil date-time into a wire instant.
    ///
    /// The input must match the pattern exactly: chrono accepts e.g. single-digit
    /// months for `%m`, so the parsed value is formatted back and compared.
    pub fn parse(&self, text: &str) -> CalctlResult<WireInstant> {
        let invalid = || CalctlError::InvalidFormat {
            input: text.to_string(),
            expected: self.expected_pattern(),
        };

        let naive = NaiveDateTime::parse_from_str(text, &self.format).map_err(|_| invalid())?;
        if naive.format(&self.format).to_string() != text {
            return Err(invalid());
        }

        let local = self.zone.from_local_datetime(&naive).earliest().ok_or_else(|| {
            CalctlError::Validation(format!("{text} does not exist in {}", self.zone.name()))
        })?;

        Ok(WireInstant(local.fixed_offset()))
    }
}

/// An instant in the remote service's timestamp format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireInstant(DateTime<FixedOffset>);

impl WireInstant {
    pub fn parse_wire(text: &str) -> CalctlResult<Self> {
        DateTime::parse_from_rfc3339(text)
            .map(WireInstant)
            .map_err(|_| CalctlError::InvalidFormat {
                input: text.to_string(),
                expected: "RFC 3339".into(),
            })
    }

    pub fn from_utc(utc: DateTime<Utc>, zone: Tz) -> Self {
        WireInstant(utc.with_timezone(&zone).fixed_offset())
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    pub fn to_wire(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl From<DateTime<Utc>> for WireInstant {
    fn from(utc: DateTime<Utc>) -> Self {
        WireInstant(utc.fixed_offset())
    }
}

impl fmt::Display for WireInstant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}
