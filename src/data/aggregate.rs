use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::category::{Month, Weekday};
use super::error::Result;
use super::filter::filter;
use super::model::{CountField, Dataset, Holiday, RawRecord, Season, WeatherCondition};

// ---------------------------------------------------------------------------
// Accumulation
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
struct Accum {
    n: u64,
    sum: u64,
}

impl Accum {
    fn push(&mut self, value: u64) {
        self.n += 1;
        self.sum += value;
    }

    /// Arithmetic mean; groups are only created by a push so `n > 0`.
    fn mean(&self) -> f64 {
        self.sum as f64 / self.n as f64
    }
}

/// Group `records` by `key` and accumulate `field`.
///
/// Only keys that occur are present, and iteration follows `K: Ord` –
/// which for `Weekday`/`Month` is the canonical order.
fn rollup<K: Ord>(
    records: &[RawRecord],
    field: CountField,
    key: impl Fn(&RawRecord) -> K,
) -> BTreeMap<K, Accum> {
    let mut groups: BTreeMap<K, Accum> = BTreeMap::new();
    for r in records {
        groups.entry(key(r)).or_default().push(r.count(field));
    }
    groups
}

fn day_of(ts: NaiveDateTime) -> NaiveDate {
    ts.date()
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

/// One `(bucket, season, weather)` group with mean and sum of `total_count`.
///
/// `bucket` is the hour (0–23), the weekday or the month depending on the
/// profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRow<K> {
    pub bucket: K,
    pub season: Season,
    pub weather: WeatherCondition,
    pub mean: f64,
    pub sum: u64,
}

pub type HourlyRow = ProfileRow<u8>;
pub type WeekdayRow = ProfileRow<Weekday>;
pub type MonthlyRow = ProfileRow<Month>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRow {
    pub day: NaiveDate,
    pub sum: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolidayRow {
    pub holiday: Holiday,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureRow {
    pub day: NaiveDate,
    pub temperature: f64,
    pub season: Season,
    pub mean: f64,
}

/// Temperature as a grouping key; ordered with `total_cmp`, with `-0.0`
/// folded into `0.0`.
#[derive(Debug, Clone, Copy)]
struct TempKey(f64);

impl TempKey {
    fn new(t: f64) -> Self {
        TempKey(if t == 0.0 { 0.0 } else { t })
    }
}

impl PartialEq for TempKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TempKey {}

impl PartialOrd for TempKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TempKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// ---------------------------------------------------------------------------
// Rollups
// ---------------------------------------------------------------------------

fn profile<K: Ord + Clone>(
    records: &[RawRecord],
    bucket: impl Fn(&RawRecord) -> K,
) -> Vec<ProfileRow<K>> {
    rollup(records, CountField::Total, |r| {
        (bucket(r), r.season.clone(), r.weather.clone())
    })
    .into_iter()
    .map(|((bucket, season, weather), acc)| ProfileRow {
        bucket,
        season,
        weather,
        mean: acc.mean(),
        sum: acc.sum,
    })
    .collect()
}

/// Mean and sum per `(hour, season, weather)`.
pub fn hourly_profile(records: &[RawRecord]) -> Vec<HourlyRow> {
    profile(records, |r| r.hour)
}

/// Mean and sum per `(weekday, season, weather)`, Mon → Sun.
pub fn weekday_profile(records: &[RawRecord]) -> Vec<WeekdayRow> {
    profile(records, |r| r.weekday)
}

/// Mean and sum per `(month, season, weather)`, Jan → Dec.
pub fn monthly_profile(records: &[RawRecord]) -> Vec<MonthlyRow> {
    profile(records, |r| r.month)
}

/// Sum of `field` per calendar day. Days without records are absent.
pub fn daily_sums(records: &[RawRecord], field: CountField) -> Vec<DailyRow> {
    rollup(records, field, |r| day_of(r.timestamp))
        .into_iter()
        .map(|(day, acc)| DailyRow { day, sum: acc.sum })
        .collect()
}

pub fn daily_totals(records: &[RawRecord]) -> Vec<DailyRow> {
    daily_sums(records, CountField::Total)
}

pub fn daily_casual_totals(records: &[RawRecord]) -> Vec<DailyRow> {
    daily_sums(records, CountField::Casual)
}

pub fn daily_registered_totals(records: &[RawRecord]) -> Vec<DailyRow> {
    daily_sums(records, CountField::Registered)
}

/// Mean `total_count` for working-day vs. holiday hours.
pub fn holiday_profile(records: &[RawRecord]) -> Vec<HolidayRow> {
    rollup(records, CountField::Total, |r| r.holiday)
        .into_iter()
        .map(|(holiday, acc)| HolidayRow {
            holiday,
            mean: acc.mean(),
        })
        .collect()
}

/// Mean `total_count` per `(day, temperature, season)`.
pub fn temperature_season_profile(records: &[RawRecord]) -> Vec<TemperatureRow> {
    rollup(records, CountField::Total, |r| {
        (day_of(r.timestamp), TempKey::new(r.temperature), r.season.clone())
    })
    .into_iter()
    .map(|((day, temp, season), acc)| TemperatureRow {
        day,
        temperature: temp.0,
        season,
        mean: acc.mean(),
    })
    .collect()
}

// ---------------------------------------------------------------------------
// The full set of views handed to the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardViews {
    pub hourly: Vec<HourlyRow>,
    pub daily: Vec<DailyRow>,
    pub daily_casual: Vec<DailyRow>,
    pub daily_registered: Vec<DailyRow>,
    pub weekday: Vec<WeekdayRow>,
    pub monthly: Vec<MonthlyRow>,
    pub holiday: Vec<HolidayRow>,
    pub temperature: Vec<TemperatureRow>,
}

impl DashboardViews {
    pub fn compute(records: &[RawRecord]) -> Self {
        DashboardViews {
            hourly: hourly_profile(records),
            daily: daily_totals(records),
            daily_casual: daily_casual_totals(records),
            daily_registered: daily_registered_totals(records),
            weekday: weekday_profile(records),
            monthly: monthly_profile(records),
            holiday: holiday_profile(records),
            temperature: temperature_season_profile(records),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hourly.is_empty()
            && self.daily.is_empty()
            && self.daily_casual.is_empty()
            && self.daily_registered.is_empty()
            && self.weekday.is_empty()
            && self.monthly.is_empty()
            && self.holiday.is_empty()
            && self.temperature.is_empty()
    }
}

/// Filter `dataset` to `[start, end]` and compute every view; rejects
/// `start > end` before any record is looked at.
pub fn query_between(
    dataset: &Dataset,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<DashboardViews> {
    let filtered = filter(dataset, start, end)?;
    Ok(DashboardViews::compute(filtered.records()))
}

// ---------------------------------------------------------------------------
// Row selections over produced views
// ---------------------------------------------------------------------------

/// Sum of `sum` over the rows whose season label equals `label` exactly.
pub fn total_for_season<K>(rows: &[ProfileRow<K>], label: &str) -> u64 {
    rows.iter()
        .filter(|r| r.season.label() == label)
        .map(|r| r.sum)
        .sum()
}

/// Sum of `sum` over the rows whose weather label equals `label` exactly.
pub fn total_for_weather<K>(rows: &[ProfileRow<K>], label: &str) -> u64 {
    rows.iter()
        .filter(|r| r.weather.label() == label)
        .map(|r| r.sum)
        .sum()
}

/// Sum of the `mean` column (the "hourly rents" headline figure).
pub fn sum_of_means<K>(rows: &[ProfileRow<K>]) -> f64 {
    rows.iter().map(|r| r.mean).sum()
}

pub fn daily_total(rows: &[DailyRow]) -> u64 {
    rows.iter().map(|r| r.sum).sum()
}

/// `(min, max)` temperature in the profile, `None` when empty.
pub fn temperature_bounds(rows: &[TemperatureRow]) -> Option<(f64, f64)> {
    let mut temps = rows.iter().map(|r| r.temperature);
    let first = temps.next()?;
    Some(temps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
}

/// Mean of the group means per hour, collapsing season and weather.
pub fn hourly_mean_by_hour(rows: &[HourlyRow]) -> Vec<(u8, f64)> {
    let mut by_hour: BTreeMap<u8, (f64, usize)> = BTreeMap::new();
    for r in rows {
        let slot = by_hour.entry(r.bucket).or_insert((0.0, 0));
        slot.0 += r.mean;
        slot.1 += 1;
    }
    by_hour
        .into_iter()
        .map(|(hour, (total, n))| (hour, total / n as f64))
        .collect()
}
