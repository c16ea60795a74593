mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::BikePulseApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::parse();
    log::debug!("Startup configuration: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Pulse – Bike Sharing Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(BikePulseApp::new(&config)))),
    )
}
