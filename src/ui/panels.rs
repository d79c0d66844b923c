use std::path::Path;

use eframe::egui::{self, Color32, RichText, Sense, Ui, Vec2};

use crate::data::aggregate::PointMode;
use crate::data::filter::Selection;
use crate::state::{AppState, Gesture};
use crate::view::histogram::format_usd_short;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &AppState, gestures: &mut Vec<Gesture>) {
    ui.heading("Salary Plot Filters");
    ui.separator();

    // Cheap clone of the shared session so gestures can be queued freely.
    let Some(session) = state.session.clone() else {
        ui.label("No dataset loaded.");
        return;
    };
    let axes = &session.layer(state.point_mode).axes;

    // ---- Job title ----
    ui.strong("Job Title");
    egui::ComboBox::from_id_salt("job_title")
        .selected_text(state.filters.category.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(state.filters.category.is_all(), "All").clicked() {
                gestures.push(Gesture::SelectCategory(Selection::All));
            }
            for title in &axes.categories {
                let selection = Selection::Only(title.clone());
                if ui
                    .selectable_label(state.filters.category == selection, title)
                    .clicked()
                {
                    gestures.push(Gesture::SelectCategory(selection));
                }
            }
        });

    ui.add_space(4.0);

    // ---- Experience level ----
    ui.strong("Experience Level");
    egui::ComboBox::from_id_salt("experience_level")
        .selected_text(state.filters.level.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(state.filters.level.is_all(), "All").clicked() {
                gestures.push(Gesture::SelectLevel(Selection::All));
            }
            for level in &axes.levels {
                let selection = Selection::Only(level.clone());
                if ui
                    .selectable_label(state.filters.level == selection, level.label())
                    .clicked()
                {
                    gestures.push(Gesture::SelectLevel(selection));
                }
            }
        });

    ui.add_space(8.0);

    let reset = egui::Button::new(RichText::new("Reset Filters").color(Color32::WHITE))
        .fill(Color32::from_rgb(0xE1, 0x57, 0x59));
    if ui.add(reset).clicked() {
        gestures.push(Gesture::Reset);
    }

    ui.separator();

    // ---- Active selections from the charts ----
    if let Some(range) = state.filters.salary_range {
        ui.label(format!(
            "Salary bin: {} – {}",
            format_usd_short(range.lo),
            format_usd_short(range.hi)
        ));
    }
    if let Some(status) = state.filters.proportion {
        ui.label(format!("Remote status: {status}"));
    }

    ui.separator();

    // ---- Pie legend ----
    ui.strong("Remote Work");
    for (label, color) in session.slice_colors.legend_entries() {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(14.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.label(label);
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, gestures: &mut Vec<Gesture>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} records loaded, {} of {} lines shown",
                session.dataset.len(),
                state.views.linked.included,
                state.views.linked.points.len()
            ));
        }

        ui.separator();

        for mode in [PointMode::PerRecord, PointMode::Averaged] {
            if ui
                .selectable_label(state.point_mode == mode, mode.label())
                .clicked()
            {
                gestures.push(Gesture::SetPointMode(mode));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load `path` and install it; on failure keep whatever was loaded before
/// and report the error once.
pub fn load_into(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!("Loaded {} records from {}", dataset.len(), path.display());
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::model::{raw, RemoteStatus, SalaryDataset};

    #[test]
    fn failed_load_into_empty_state_installs_nothing() {
        let mut state = AppState::new(DashboardConfig::default());

        load_into(&mut state, Path::new("no/such/dir/ds_salaries.csv"));
        assert!(state.session.is_none());
        assert!(state.views.slices.is_empty());
        let message = state.status_message.clone().unwrap_or_default();
        assert!(message.starts_with("Error:"), "{message}");

        load_into(&mut state, Path::new("ds_salaries.parquet"));
        assert!(state.session.is_none());
        assert!(state.status_message.unwrap_or_default().contains("parquet"));
    }

    #[test]
    fn failed_load_keeps_previous_dataset_and_filters() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(SalaryDataset::from_raw_rows(vec![
            raw("Engineer", "SE", "100000", "100"),
            raw("Analyst", "MI", "60000", "0"),
        ]));
        state.apply(Gesture::ToggleProportion(RemoteStatus::Remote));
        let session = state.session.clone().unwrap();
        let filters = state.filters.clone();
        let views = state.views.clone();

        load_into(&mut state, Path::new("no/such/dir/ds_salaries.json"));
        assert!(Arc::ptr_eq(state.session.as_ref().unwrap(), &session));
        assert_eq!(state.filters, filters);
        assert_eq!(state.views.histogram, views.histogram);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn successful_load_replaces_dataset_and_clears_error() {
        let path = std::env::temp_dir().join(format!("salary-explorer-{}.csv", std::process::id()));
        std::fs::write(
            &path,
            "work_year,experience_level,job_title,salary,salary_in_usd,remote_ratio\n\
             2023,SE,Data Engineer,150000,150000,100\n",
        )
        .unwrap();

        let mut state = AppState::new(DashboardConfig::default());
        load_into(&mut state, Path::new("missing.csv"));
        assert!(state.status_message.is_some());

        load_into(&mut state, &path);
        std::fs::remove_file(&path).ok();
        assert_eq!(state.session.as_ref().map(|s| s.dataset.len()), Some(1));
        assert!(state.status_message.is_none());
    }
}
