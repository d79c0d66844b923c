mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use app::SalaryExplorerApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();
    log::debug!(
        "config: {}",
        serde_json::to_string(&config).unwrap_or_else(|e| format!("<unserializable: {e}>"))
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Data Science Jobs and Compensation Insights",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryExplorerApp::new(config)))),
    )
}
