use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::{AppState, Gesture};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryExplorerApp {
    pub state: AppState,
}

impl SalaryExplorerApp {
    /// Build the app and load the default dataset.
    pub fn new(config: DashboardConfig) -> Self {
        let path = config.dataset_path.clone();
        let mut state = AppState::new(config);
        panels::load_into(&mut state, &path);
        Self { state }
    }
}

impl eframe::App for SalaryExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Views only emit gestures; state changes once the frame is drawn.
        let mut gestures: Vec<Gesture> = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &mut gestures);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state, &mut gestures);
            });

        // ---- Central panel: the three linked views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.session.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a salary dataset to begin  (File → Open…)");
                });
                return;
            }
            ui.columns(2, |cols| {
                let pie_size = egui::vec2(cols[0].available_width(), cols[0].available_height() * 0.48);
                cols[0].allocate_ui(pie_size, |ui| {
                    plot::proportion_chart(ui, &self.state, &mut gestures);
                });
                cols[0].separator();
                plot::salary_histogram(&mut cols[0], &self.state, &mut gestures);

                plot::linked_chart(&mut cols[1], &self.state, &mut gestures);
            });
        });

        for gesture in gestures {
            self.state.apply(gesture);
        }
    }
}
