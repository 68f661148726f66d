//! Canonical calendar-day keys and inclusive date windows

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use revmine_common::{Result, RevMineError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Canonical day-granularity identifier used for bucketing and chart labels
///
/// Ordering is chronological. Displays and serializes as `YYYY-MM-DD`, so
/// two raw inputs naming the same calendar day in different formats compare
/// equal after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Normalize a raw date value into a canonical `DateKey`.
    ///
    /// Accepted forms: `DD/MM/YYYY`, ISO `YYYY-MM-DD`, or an ISO datetime
    /// whose literal date components are taken as-is (timezone offsets are
    /// not applied; calendar-day equivalence is on the written components).
    /// Anything else, including a datetime with a malformed time part,
    /// fails with `InvalidDateFormat`.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
            return Ok(Self(date));
        }
        // ISO datetimes must parse in full; the written day is kept and the
        // offset is never applied
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(datetime.date()));
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(datetime.date_naive()));
        }
        Err(RevMineError::invalid_date(raw))
    }

    /// The underlying calendar day
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Inclusive date-range filter; either bound may be absent (unbounded)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// Window with no bounds; every date passes
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Window bounded below only
    pub fn since(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Window bounded above only
    pub fn until(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Window with both bounds
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Window covering the last `days` days up to today
    pub fn last_days(days: u32) -> Self {
        let end = chrono::Utc::now().date_naive();
        let start = end - chrono::Duration::days(days as i64);
        Self::between(start, end)
    }

    /// Whether a date falls inside the window (bounds inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}
