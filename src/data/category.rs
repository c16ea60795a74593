use std::fmt;

use serde::Serialize;

use super::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Canonical orderings for the weekday and month domains
// ---------------------------------------------------------------------------
//
// Variant declaration order *is* the display order: `Ord` is derived, so any
// `BTreeMap` keyed (partly) by these types iterates canonically.

/// Day of week as labelled in the source data, ordered Mon → Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Weekday {
    Mon,
    Tues,
    Wed,
    Thurs,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tues,
        Weekday::Wed,
        Weekday::Thurs,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tues => "Tues",
            Weekday::Wed => "Wed",
            Weekday::Thurs => "Thurs",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    /// Zero-based position in the canonical order.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Parse a source label. Unknown labels are rejected, never sorted last.
    pub fn from_label(s: &str, row: usize) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| PipelineError::UnknownCategory {
                row,
                domain: "weekday",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar month as labelled in the source data, ordered Jan → Dec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_label(s: &str, row: usize) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| PipelineError::UnknownCategory {
                row,
                domain: "month",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_order_is_mon_to_sun() {
        let mut shuffled = vec![
            Weekday::Sun,
            Weekday::Wed,
            Weekday::Mon,
            Weekday::Sat,
            Weekday::Thurs,
            Weekday::Tues,
            Weekday::Fri,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Weekday::ALL.to_vec());
        // Lexical order would put Fri first.
        assert_eq!(Weekday::Fri.ordinal(), 4);
    }

    #[test]
    fn month_order_is_calendar_order() {
        let mut labels: Vec<Month> = ["Dec", "Apr", "Jan", "Aug", "Feb"]
            .iter()
            .map(|s| Month::from_label(s, 0).unwrap())
            .collect();
        labels.sort();
        assert_eq!(
            labels,
            vec![Month::Jan, Month::Feb, Month::Apr, Month::Aug, Month::Dec]
        );
    }

    #[test]
    fn labels_round_trip_through_parser() {
        for d in Weekday::ALL {
            assert_eq!(Weekday::from_label(d.label(), 0).unwrap(), d);
        }
        for m in Month::ALL {
            assert_eq!(Month::from_label(&format!(" {m} "), 0).unwrap(), m);
        }
    }

    #[test]
    fn unknown_labels_are_rejected() {
        match Weekday::from_label("Tuesday", 7) {
            Err(PipelineError::UnknownCategory { row, domain, value }) => {
                assert_eq!(row, 7);
                assert_eq!(domain, "weekday");
                assert_eq!(value, "Tuesday");
            }
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
        assert!(matches!(
            Month::from_label("jan", 1),
            Err(PipelineError::UnknownCategory { domain: "month", .. })
        ));
    }

    #[test]
    fn serializes_as_source_label() {
        assert_eq!(serde_json::to_string(&Weekday::Thurs).unwrap(), "\"Thurs\"");
        assert_eq!(serde_json::to_string(&Month::Sep).unwrap(), "\"Sep\"");
    }
}
