use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct BikePulseApp {
    pub state: AppState,
}

impl BikePulseApp {
    /// Start with the configured dataset, if any. A failed load leaves the
    /// app empty with the error in the status line.
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::default();
        if config.should_autoload() {
            if let Err(e) = state.load_path(config.data_path()) {
                log::error!("Failed to load startup dataset: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        } else {
            log::info!(
                "No dataset at {}; waiting for File → Open",
                config.data_path().display()
            );
        }
        Self { state }
    }
}

impl eframe::App for BikePulseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: date range ----
        egui::SidePanel::left("range_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::dashboard(ui, &self.state);
        });
    }
}
