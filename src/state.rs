use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::data::aggregate::{query_between, DashboardViews};
use crate::data::filter::DateRange;
use crate::data::loader::load_file;
use crate::data::model::{Dataset, Season, WeatherCondition};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Date picker values; the range is whole days, both ends included.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// Views for the current range (None when the last query failed).
    pub views: Option<DashboardViews>,

    /// Colours per season and per weather label.
    pub season_colors: Option<ColorMap>,
    pub weather_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load a file and make it the active dataset.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let dataset = load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Ingest a newly loaded dataset: reset the range to its full span.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let span = dataset.time_span();
        self.start_date = span.map(|(min, _)| min.date());
        self.end_date = span.map(|(_, max)| max.date());

        let seasons: Vec<&Season> = unique(dataset.records().iter().map(|r| &r.season));
        let weathers: Vec<&WeatherCondition> =
            unique(dataset.records().iter().map(|r| &r.weather));
        self.season_colors = Some(ColorMap::new(seasons.iter().map(|s| s.label())));
        self.weather_colors = Some(ColorMap::new(weathers.iter().map(|w| w.label())));

        let odd = dataset.non_canonical_seasons();
        self.status_message = if odd.is_empty() {
            None
        } else {
            let labels: Vec<&str> = odd.iter().map(Season::label).collect();
            Some(format!("Data note: non-standard season labels {labels:?}"))
        };

        self.dataset = Some(dataset);
        self.recompute();
    }

    /// Rebuild the views for the current date range.
    ///
    /// A rejected range drops the views and reports the error; the session
    /// itself carries on.
    pub fn recompute(&mut self) {
        let (Some(ds), Some(start), Some(end)) = (&self.dataset, self.start_date, self.end_date)
        else {
            self.views = None;
            return;
        };

        let views = DateRange::days(start, end)
            .and_then(|range| query_between(ds, range.start(), range.end()));
        match views {
            Ok(views) => {
                log::debug!(
                    "Recomputed views for {start} .. {end}: {} daily rows",
                    views.daily.len()
                );
                self.views = Some(views);
                if self
                    .status_message
                    .as_deref()
                    .is_some_and(|m| m.starts_with("Error"))
                {
                    self.status_message = None;
                }
            }
            Err(e) => {
                log::warn!("Rejected date range: {e}");
                self.views = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Update the picked range and recompute.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self.recompute();
    }
}

/// Distinct values, sorted.
fn unique<'a, T: Ord + ?Sized>(items: impl Iterator<Item = &'a T>) -> Vec<&'a T> {
    let mut v: Vec<&T> = items.collect();
    v.sort();
    v.dedup();
    v
}
