//! Date parsing with the unset-sentinel fallback

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use hrsync_domain::UNSET_DATE;

/// Result of parsing one upstream date field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParse {
    Parsed(NaiveDate),
    /// Field missing or blank
    Absent,
    /// Field present but not a recognised date
    Malformed,
}

impl DateParse {
    /// Collapse to a record value; both failure kinds become [`UNSET_DATE`].
    pub fn or_unset(self) -> NaiveDate {
        match self {
            Self::Parsed(date) => date,
            Self::Absent | Self::Malformed => UNSET_DATE,
        }
    }
}

/// Parse `YYYY-MM-DD`, or the date part of an ISO-8601 timestamp.
pub fn parse_date(raw: Option<&str>) -> DateParse {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DateParse::Absent;
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return DateParse::Parsed(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return DateParse::Parsed(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return DateParse::Parsed(timestamp.date());
    }
    DateParse::Malformed
}

/// Record-level date value: the parsed date or [`UNSET_DATE`].
pub fn date_or_unset(raw: Option<&str>) -> NaiveDate {
    parse_date(raw).or_unset()
}
