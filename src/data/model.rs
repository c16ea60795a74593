use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::category::{Month, Weekday};

// ---------------------------------------------------------------------------
// Column – the field identifiers consumed by the loader
// ---------------------------------------------------------------------------

/// Every field a ride record is built from, with its source column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    DateTime,
    Hour,
    Season,
    WeatherCondition,
    Weekday,
    Month,
    Holiday,
    Temperature,
    Casual,
    Registered,
    TotalCount,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::DateTime,
        Column::Hour,
        Column::Season,
        Column::WeatherCondition,
        Column::Weekday,
        Column::Month,
        Column::Holiday,
        Column::Temperature,
        Column::Casual,
        Column::Registered,
        Column::TotalCount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::DateTime => "date_time",
            Column::Hour => "hour",
            Column::Season => "season_hourly",
            Column::WeatherCondition => "weather_condition_hourly",
            Column::Weekday => "weekday_hourly",
            Column::Month => "month_hourly",
            Column::Holiday => "holiday_hourly",
            Column::Temperature => "temp_hourly",
            Column::Casual => "casual_hourly",
            Column::Registered => "registered_hourly",
            Column::TotalCount => "total_count_hourly",
        }
    }
}

// ---------------------------------------------------------------------------
// Categorical labels kept literally
// ---------------------------------------------------------------------------

/// Season label exactly as written in the source.
///
/// The published dataset spells spring as "Springer"; the label is kept as-is
/// and reported through [`Dataset::non_canonical_seasons`] instead of being
/// rewritten.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Season(pub String);

impl Season {
    pub const CANONICAL: [&'static str; 4] = ["Spring", "Summer", "Fall", "Winter"];

    pub fn new(label: impl Into<String>) -> Self {
        Season(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn is_canonical(&self) -> bool {
        Self::CANONICAL.contains(&self.0.as_str())
    }
}

impl AsRef<str> for Season {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weather bucket label exactly as written in the source.
///
/// Ordered clear → severe; labels outside the four buckets sort after them,
/// alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WeatherCondition(pub String);

impl WeatherCondition {
    /// The four buckets of the source data, clear → severe.
    pub const BUCKETS: [&'static str; 4] = [
        "Clear, Few clouds, Partly cloudy, Partly cloudy",
        "Mist + Cloudy, Mist + Broken clouds, Mist + Few clouds, Mist",
        "Light Snow, Light Rain + Thunderstorm + Scattered clouds, Light Rain + Scattered clouds",
        "Heavy Rain + Ice Pallets + Thunderstorm + Mist, Snow + Fog",
    ];

    pub fn new(label: impl Into<String>) -> Self {
        WeatherCondition(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    /// 0 (clear) … 3 (severe), `None` for labels outside the four buckets.
    pub fn severity(&self) -> Option<usize> {
        Self::BUCKETS.iter().position(|b| *b == self.0)
    }
}

impl Ord for WeatherCondition {
    fn cmp(&self, other: &Self) -> Ordering {
        let rank = |w: &Self| w.severity().unwrap_or(usize::MAX);
        rank(self)
            .cmp(&rank(other))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for WeatherCondition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<str> for WeatherCondition {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Holiday vs. ordinary working-day hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Holiday {
    WorkingDay,
    Holiday,
}

impl Holiday {
    /// Accepts the flag spellings seen in exported datasets (case-insensitive).
    pub fn parse_flag(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "1.0" | "true" | "yes" | "holiday" => Some(Holiday::Holiday),
            "0" | "0.0" | "false" | "no" | "working day" | "workingday" | "non-holiday"
            | "not holiday" => Some(Holiday::WorkingDay),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Holiday::WorkingDay => "Working day",
            Holiday::Holiday => "Holiday",
        }
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which rider count an aggregate targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Total,
    Casual,
    Registered,
}

// ---------------------------------------------------------------------------
// RawRecord – one hourly observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub timestamp: NaiveDateTime,
    /// 0–23.
    pub hour: u8,
    pub total_count: u64,
    pub casual_count: u64,
    pub registered_count: u64,
    pub temperature: f64,
    pub season: Season,
    pub weather: WeatherCondition,
    pub weekday: Weekday,
    pub month: Month,
    pub holiday: Holiday,
}

impl RawRecord {
    pub fn count(&self, field: CountField) -> u64 {
        match field {
            CountField::Total => self.total_count,
            CountField::Casual => self.casual_count,
            CountField::Registered => self.registered_count,
        }
    }

    /// `total == casual + registered`; expected of the source, not enforced.
    pub fn counts_consistent(&self) -> bool {
        self.casual_count.checked_add(self.registered_count) == Some(self.total_count)
    }
}

// ---------------------------------------------------------------------------
// Dataset – an ordered, immutable record sequence
// ---------------------------------------------------------------------------

/// Records sorted ascending by timestamp (stable on ties).
///
/// There is no mutable access; filtering produces a new `Dataset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<RawRecord>,
}

impl Dataset {
    /// Build a dataset, stable-sorting the records by timestamp.
    pub fn from_records(mut records: Vec<RawRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Dataset { records }
    }

    /// Wrap records already known to be in timestamp order.
    pub(crate) fn from_sorted(records: Vec<RawRecord>) -> Self {
        debug_assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        Dataset { records }
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(min, max)` timestamp, `None` for an empty dataset.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.timestamp, last.timestamp))
    }

    /// Season labels present that are not one of Spring/Summer/Fall/Winter.
    pub fn non_canonical_seasons(&self) -> BTreeSet<Season> {
        self.records
            .iter()
            .filter(|r| !r.season.is_canonical())
            .map(|r| r.season.clone())
            .collect()
    }

    /// Number of records whose casual + registered does not add up to total.
    pub fn inconsistent_count_rows(&self) -> usize {
        self.records.iter().filter(|r| !r.counts_consistent()).count()
    }
}
