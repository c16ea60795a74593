use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate::{
    daily_total, hourly_mean_by_hour, sum_of_means, total_for_season, total_for_weather,
    DashboardViews, ProfileRow,
};
use crate::data::category::{Month, Weekday};
use crate::data::model::WeatherCondition;
use crate::state::AppState;
use crate::ui::{format_count, metric};

const CHART_HEIGHT: f32 = 260.0;
const LINE_COLOR: Color32 = Color32::from_rgb(0x90, 0xCA, 0xF9);

/// Short headings for the four weather buckets, clear → severe.
const WEATHER_TITLES: [&str; 4] = ["Clear", "Mist + Cloudy", "Light Snow + Rain", "Dangerous"];

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render every section of the dashboard in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.dataset.is_some() {
                ui.heading("Pick a valid date range");
            } else {
                ui.heading("Open a file to view rides  (File → Open…)");
            }
        });
        return;
    };

    let fallback = ColorMap::new(std::iter::empty());
    let seasons = state.season_colors.as_ref().unwrap_or(&fallback);
    let weathers = state.weather_colors.as_ref().unwrap_or(&fallback);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Bike Sharing System");
            ui.separator();
            hourly_section(ui, views, seasons, weathers);
            daily_section(ui, views, seasons, weathers);
            monthly_section(ui, views, seasons, weathers);
            holiday_section(ui, views);
            temperature_section(ui, views, seasons);
        });
}

fn hourly_section(ui: &mut Ui, views: &DashboardViews, seasons: &ColorMap, weathers: &ColorMap) {
    ui.heading("Hourly Rents");
    metric(ui, "Total bike rents", format_count(sum_of_means(&views.hourly)));

    let points: PlotPoints = hourly_mean_by_hour(&views.hourly)
        .into_iter()
        .map(|(h, v)| [h as f64, v])
        .collect();
    Plot::new("hourly_line")
        .height(CHART_HEIGHT)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(LINE_COLOR).width(2.0));
        });

    ui.label("Season vs hourly rents");
    let by_season = mean_by(&views.hourly, |b| *b as usize, |r| &r.season);
    grouped_bars(ui, "hourly_season", &by_season, seasons, |x| x.to_string());

    ui.label("Weather condition vs hourly rents");
    let by_weather = mean_by(&views.hourly, |b| *b as usize, |r| &r.weather);
    grouped_bars(ui, "hourly_weather", &by_weather, weathers, |x| x.to_string());
    ui.separator();
}

fn daily_section(ui: &mut Ui, views: &DashboardViews, seasons: &ColorMap, weathers: &ColorMap) {
    ui.heading("Daily Rents");
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total bike rents", format_count(daily_total(&views.daily) as f64));
        metric(
            &mut cols[1],
            "Total casual users",
            format_count(daily_total(&views.daily_casual) as f64),
        );
        metric(
            &mut cols[2],
            "Total registered users",
            format_count(daily_total(&views.daily_registered) as f64),
        );
    });

    let points: PlotPoints = views
        .daily
        .iter()
        .map(|r| [r.day.num_days_from_ce() as f64, r.sum as f64])
        .collect();
    Plot::new("daily_line")
        .height(CHART_HEIGHT)
        .x_axis_formatter(|mark, _range| {
            NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
                .map(|d| d.to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(LINE_COLOR).width(2.0));
        });

    let weekday_label =
        |x: usize| Weekday::ALL.get(x).map(|d| d.label()).unwrap_or("").to_string();

    ui.label("Season vs daily rents");
    let by_season = mean_by(&views.weekday, |d| d.ordinal(), |r| &r.season);
    grouped_bars(ui, "weekday_season", &by_season, seasons, weekday_label);

    ui.label("Weather condition vs daily rents");
    let by_weather = mean_by(&views.weekday, |d| d.ordinal(), |r| &r.weather);
    grouped_bars(ui, "weekday_weather", &by_weather, weathers, weekday_label);
    ui.separator();
}

fn monthly_section(ui: &mut Ui, views: &DashboardViews, seasons: &ColorMap, weathers: &ColorMap) {
    ui.heading("Monthly Rents");

    ui.strong("Distribution by season");
    let season_labels: Vec<&str> = seasons.entries().map(|(l, _)| l).collect();
    if !season_labels.is_empty() {
        ui.columns(season_labels.len(), |cols| {
            for (col, label) in cols.iter_mut().zip(&season_labels) {
                metric(
                    col,
                    &format!("Total rent when {label}"),
                    format_count(total_for_season(&views.monthly, label) as f64),
                );
            }
        });
    }

    let month_label =
        |x: usize| Month::ALL.get(x).map(|m| m.label()).unwrap_or("").to_string();
    let by_season = mean_by(&views.monthly, |m| m.ordinal(), |r| &r.season);
    grouped_bars(ui, "monthly_season", &by_season, seasons, month_label);

    ui.strong("Distribution by weather condition");
    ui.columns(WEATHER_TITLES.len(), |cols| {
        for ((col, title), bucket) in cols
            .iter_mut()
            .zip(WEATHER_TITLES)
            .zip(WeatherCondition::BUCKETS)
        {
            metric(
                col,
                &format!("Total rent when {title}"),
                format_count(total_for_weather(&views.monthly, bucket) as f64),
            );
        }
    });

    let by_weather = mean_by(&views.monthly, |m| m.ordinal(), |r| &r.weather);
    grouped_bars(ui, "monthly_weather", &by_weather, weathers, month_label);
    ui.separator();
}

fn holiday_section(ui: &mut Ui, views: &DashboardViews) {
    ui.heading("Holiday / working day vs rents");
    let labels: Vec<&'static str> = views.holiday.iter().map(|r| r.holiday.label()).collect();
    let bars: Vec<Bar> = views
        .holiday
        .iter()
        .enumerate()
        .map(|(i, r)| Bar::new(i as f64, r.mean).width(0.6))
        .collect();
    Plot::new("holiday_bars")
        .height(CHART_HEIGHT)
        .x_axis_formatter(move |mark, _range| label_at(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(LINE_COLOR));
        });
    ui.separator();
}

fn temperature_section(ui: &mut Ui, views: &DashboardViews, seasons: &ColorMap) {
    ui.heading("Rides by season and temperature");
    let mut by_season: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for r in &views.temperature {
        by_season
            .entry(r.season.label())
            .or_default()
            .push([r.temperature, r.mean]);
    }
    Plot::new("temperature_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (label, pts) in by_season {
                plot_ui.points(
                    Points::new(pts)
                        .radius(2.5)
                        .color(seasons.color_for(label))
                        .name(label),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mean of the group means per `(x, hue)`, collapsing the other dimension.
///
/// Series follow the hue's ordering, so weather runs clear → severe.
fn mean_by<'a, K, H: Ord>(
    rows: &'a [ProfileRow<K>],
    x: impl Fn(&K) -> usize,
    hue: impl Fn(&'a ProfileRow<K>) -> H,
) -> BTreeMap<H, BTreeMap<usize, f64>> {
    let mut acc: BTreeMap<H, BTreeMap<usize, (f64, usize)>> = BTreeMap::new();
    for r in rows {
        let slot = acc
            .entry(hue(r))
            .or_default()
            .entry(x(&r.bucket))
            .or_insert((0.0, 0));
        slot.0 += r.mean;
        slot.1 += 1;
    }
    acc.into_iter()
        .map(|(h, xs)| {
            let means = xs
                .into_iter()
                .map(|(x, (total, n))| (x, total / n as f64))
                .collect();
            (h, means)
        })
        .collect()
}

/// Side-by-side bars, one series per hue label.
fn grouped_bars<H: AsRef<str>>(
    ui: &mut Ui,
    id: &str,
    series: &BTreeMap<H, BTreeMap<usize, f64>>,
    colors: &ColorMap,
    x_label: impl Fn(usize) -> String + 'static,
) {
    let n = series.len().max(1) as f64;
    let width = 0.8 / n;
    let charts: Vec<BarChart> = series
        .iter()
        .enumerate()
        .map(|(k, (hue, xs))| {
            let offset = (k as f64 - (n - 1.0) / 2.0) * width;
            let bars = xs
                .iter()
                .map(|(&x, &v)| Bar::new(x as f64 + offset, v).width(width))
                .collect();
            let hue: &str = hue.as_ref();
            BarChart::new(bars).color(colors.color_for(hue)).name(hue)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if (v - v.round()).abs() < 1e-6 && v >= 0.0 {
                x_label(v.round() as usize)
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn label_at(labels: &[&str], value: f64) -> String {
    if (value - value.round()).abs() > 1e-6 || value < 0.0 {
        return String::new();
    }
    labels
        .get(value.round() as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::weekday_profile;
    use crate::data::model::tests::{record, ts};
    use crate::data::model::Season;

    #[test]
    fn mean_by_collapses_weather_per_season() {
        let mut a = record(ts(2011, 1, 3, 0), 10);
        a.weekday = Weekday::Mon;
        let mut b = record(ts(2011, 1, 3, 1), 30);
        b.weekday = Weekday::Mon;
        b.weather = WeatherCondition::new(WeatherCondition::BUCKETS[1]);
        let mut c = record(ts(2011, 1, 4, 0), 4);
        c.weekday = Weekday::Tues;
        c.season = Season::new("Winter");

        let rows = weekday_profile(&[a, b, c]);
        let by_season = mean_by(&rows, |d| d.ordinal(), |r| &r.season);
        let summer = &by_season[&Season::new("Summer")];
        assert_eq!(summer[&0], 20.0);
        assert!(!summer.contains_key(&1));
        assert_eq!(by_season[&Season::new("Winter")][&1], 4.0);
    }

    #[test]
    fn weather_series_run_clear_to_severe() {
        let rows: Vec<_> = [3, 0, 2, 1]
            .into_iter()
            .enumerate()
            .map(|(i, sev)| {
                let mut r = record(ts(2011, 1, 3, i as u32), 10);
                r.weather = WeatherCondition::new(WeatherCondition::BUCKETS[sev]);
                r
            })
            .collect();

        let hourly = crate::data::aggregate::hourly_profile(&rows);
        let by_weather = mean_by(&hourly, |b| *b as usize, |r| &r.weather);
        let order: Vec<Option<usize>> = by_weather.keys().map(|w| w.severity()).collect();
        assert_eq!(order, vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn axis_labels_only_on_whole_positions() {
        let labels = ["Working day", "Holiday"];
        assert_eq!(label_at(&labels, 1.0), "Holiday");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, 2.0), "");
        assert_eq!(label_at(&labels, -1.0), "");
    }
}
