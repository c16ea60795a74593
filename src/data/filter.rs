use chrono::{NaiveDate, NaiveDateTime};

use super::error::{PipelineError, Result};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Date range predicate
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` interval over record timestamps.
///
/// Bounds are never clamped to the dataset; out-of-domain bounds simply
/// match fewer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Fails with [`PipelineError::InvalidRange`] iff `start > end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(PipelineError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// Whole calendar days: from `start` 00:00 through the last instant of `end`.
    pub fn days(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let first = start.and_hms_opt(0, 0, 0);
        let last = end.and_hms_nano_opt(23, 59, 59, 999_999_999);
        match (first, last) {
            (Some(first), Some(last)) => Self::new(first, last),
            _ => Err(PipelineError::Malformed(format!(
                "cannot build day range {start} .. {end}"
            ))),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// Return the records of `dataset` inside `range`, in their original order.
///
/// The result is a fresh `Dataset`; the input is left untouched.
pub fn filter_range(dataset: &Dataset, range: &DateRange) -> Dataset {
    let records = dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.timestamp))
        .cloned()
        .collect();
    Dataset::from_sorted(records)
}

/// Validate `start <= end`, then filter. The check happens before any record
/// is looked at, so it does not depend on whether the range holds data.
pub fn filter(dataset: &Dataset, start: NaiveDateTime, end: NaiveDateTime) -> Result<Dataset> {
    let range = DateRange::new(start, end)?;
    Ok(filter_range(dataset, &range))
}
