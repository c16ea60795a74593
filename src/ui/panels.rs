use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::data::aggregate::{temperature_bounds, DashboardViews};
use crate::state::AppState;
use crate::ui::metric;

// ---------------------------------------------------------------------------
// Left side panel – date range and temperature metrics
// ---------------------------------------------------------------------------

/// Render the left side panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Date range");
    ui.separator();

    let (Some(mut start), Some(mut end)) = (state.start_date, state.end_date) else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut changed = false;
    egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("From");
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt("start_date"))
            .changed();
        ui.end_row();

        ui.label("To");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt("end_date"))
            .changed();
        ui.end_row();
    });

    if let Some((min, max)) = state.dataset.as_ref().and_then(|ds| ds.time_span()) {
        if ui.small_button("Full span").clicked() {
            start = min.date();
            end = max.date();
            changed = true;
        }
    }

    if changed {
        state.set_range(start, end);
    }

    ui.add_space(8.0);
    ui.separator();

    let bounds = state
        .views
        .as_ref()
        .and_then(|v| temperature_bounds(&v.temperature));
    match bounds {
        Some((lo, hi)) => {
            metric(ui, "Min Temperature", format!("{}", lo.round()));
            metric(ui, "Max Temperature", format!("{}", hi.round()));
        }
        None => {
            ui.label("No records in range.");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.views.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export views…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} records loaded", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::YELLOW
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open bike-sharing data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let Some(views) = &state.views else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export views")
        .add_filter("JSON", &["json"])
        .set_file_name("bike_views.json")
        .save_file();

    if let Some(path) = file {
        match export_views(views, &path) {
            Ok(()) => {
                log::info!("Exported views to {}", path.display());
                state.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Write the views as pretty JSON.
pub fn export_views(views: &DashboardViews, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), views).context("writing JSON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, ts};

    #[test]
    fn export_writes_every_view() {
        let views = DashboardViews::compute(&[record(ts(2011, 1, 1, 0), 5)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("views.json");
        export_views(&views, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        for key in [
            "hourly",
            "daily",
            "daily_casual",
            "daily_registered",
            "weekday",
            "monthly",
            "holiday",
            "temperature",
        ] {
            assert_eq!(json[key].as_array().unwrap().len(), 1, "{key}");
        }
    }
}
