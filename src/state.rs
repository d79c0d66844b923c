use std::sync::Arc;

use crate::color::{CategoryColors, SliceColors};
use crate::config::DashboardConfig;
use crate::data::aggregate::{Aggregates, LinkedLayer, PointId, PointMode};
use crate::data::filter::{FilterState, HighlightState, Selection};
use crate::data::model::{ExperienceLevel, RemoteStatus, SalaryDataset};
use crate::view::histogram::{histogram_view, HistogramView};
use crate::view::linked::{linked_view, LinkedView};
use crate::view::proportion::{proportion_view, SliceView};

// ---------------------------------------------------------------------------
// Session – immutable data derived once per load
// ---------------------------------------------------------------------------

/// A loaded dataset with everything derived from it. Shared read-only.
#[derive(Debug)]
pub struct Session {
    pub dataset: SalaryDataset,
    pub aggregates: Aggregates,
    pub slice_colors: SliceColors,
    averaged_colors: CategoryColors,
    per_record_colors: CategoryColors,
}

impl Session {
    pub fn new(dataset: SalaryDataset, config: &DashboardConfig) -> Self {
        let aggregates = Aggregates::compute(&dataset.records, config.top_n, config.histogram_ticks);
        let slice_colors = SliceColors::new(aggregates.proportions.iter().map(|s| s.status));
        let averaged_colors = CategoryColors::new(&aggregates.averaged.axes.categories);
        let per_record_colors = CategoryColors::new(&aggregates.per_record.axes.categories);
        Session {
            dataset,
            aggregates,
            slice_colors,
            averaged_colors,
            per_record_colors,
        }
    }

    pub fn layer(&self, mode: PointMode) -> &LinkedLayer {
        self.aggregates.layer(mode)
    }

    pub fn category_colors(&self, mode: PointMode) -> &CategoryColors {
        match mode {
            PointMode::Averaged => &self.averaged_colors,
            PointMode::PerRecord => &self.per_record_colors,
        }
    }
}

// ---------------------------------------------------------------------------
// Gestures
// ---------------------------------------------------------------------------

/// Every user input that can change what the views show.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    SelectCategory(Selection<String>),
    SelectLevel(Selection<ExperienceLevel>),
    /// Click on a histogram bar (bin index).
    ToggleSalaryBin(usize),
    /// Click on a pie slice.
    ToggleProportion(RemoteStatus),
    /// Pointer over a linked-view point, `None` on leave.
    HoverPoint(Option<PointId>),
    /// Pointer over a pie slice, `None` on leave.
    HoverSlice(Option<RemoteStatus>),
    SetPointMode(PointMode),
    Reset,
}

impl Gesture {
    pub fn is_hover(&self) -> bool {
        matches!(self, Gesture::HoverPoint(_) | Gesture::HoverSlice(_))
    }
}

/// Render models for the three views, rebuilt together on every publish.
#[derive(Debug, Clone, Default)]
pub struct ViewModels {
    pub slices: Vec<SliceView>,
    pub linked: LinkedView,
    pub histogram: HistogramView,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded data (None until a file loads successfully).
    pub session: Option<Arc<Session>>,

    /// Cross-filter selections.
    pub filters: FilterState,

    /// Hover targets.
    pub highlight: HighlightState,

    /// Which point shape the linked view shows.
    pub point_mode: PointMode,

    /// Published render models (derived; never edited directly).
    pub views: ViewModels,

    /// Whether the last published change came from hovering.
    pub last_change_was_hover: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            point_mode: config.point_mode,
            config,
            session: None,
            filters: FilterState::default(),
            highlight: HighlightState::default(),
            views: ViewModels::default(),
            last_change_was_hover: false,
            status_message: None,
        }
    }

    /// Install a newly loaded dataset and start from a clean filter state.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        let session = Session::new(dataset, &self.config);
        log::info!(
            "Derived {} slices, {} top titles, {} averaged / {} per-record points, {} bins",
            session.aggregates.proportions.len(),
            session.aggregates.top_categories.len(),
            session.aggregates.averaged.points.len(),
            session.aggregates.per_record.points.len(),
            session.aggregates.bins.len(),
        );
        self.session = Some(Arc::new(session));
        self.filters = FilterState::default();
        self.highlight.clear();
        self.status_message = None;
        self.last_change_was_hover = false;
        self.publish();
    }

    /// Apply one gesture; publishes when anything changed.
    pub fn apply(&mut self, gesture: Gesture) -> bool {
        let changed = match &gesture {
            Gesture::SelectCategory(sel) => self.filters.select_category(sel.clone()),
            Gesture::SelectLevel(sel) => self.filters.select_level(sel.clone()),
            Gesture::ToggleSalaryBin(index) => self.toggle_salary_bin(*index),
            Gesture::ToggleProportion(status) => self.filters.toggle_proportion(*status),
            Gesture::HoverPoint(target) => self.hover_point(*target),
            Gesture::HoverSlice(target) => replace(&mut self.highlight.slice, *target),
            Gesture::SetPointMode(mode) => self.set_point_mode(*mode),
            Gesture::Reset => {
                let had_hover = self.highlight != HighlightState::default();
                self.highlight.clear();
                self.filters.reset() | had_hover
            }
        };

        if changed {
            log::debug!("{gesture:?} -> {:?}", self.filters);
            self.last_change_was_hover = gesture.is_hover();
            self.publish();
        }
        changed
    }

    fn toggle_salary_bin(&mut self, index: usize) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        match session.aggregates.bins.get(index) {
            Some(bin) => self.filters.toggle_salary_bin(bin),
            None => false,
        }
    }

    /// Only included points can take focus; leaving clears it.
    fn hover_point(&mut self, target: Option<PointId>) -> bool {
        let target = target.filter(|id| {
            self.session
                .as_ref()
                .and_then(|s| s.layer(self.point_mode).points.get(id.0))
                .is_some_and(|p| self.filters.included(p))
        });
        replace(&mut self.highlight.point, target)
    }

    fn set_point_mode(&mut self, mode: PointMode) -> bool {
        if self.point_mode == mode {
            return false;
        }
        self.point_mode = mode;
        // Point ids belong to one mode.
        self.highlight.point = None;
        true
    }

    /// Rebuild every view model from the current state.
    pub fn publish(&mut self) {
        let Some(session) = &self.session else {
            self.views = ViewModels::default();
            return;
        };
        let layer = session.layer(self.point_mode);
        self.views = ViewModels {
            slices: proportion_view(
                &session.aggregates.proportions,
                &session.slice_colors,
                &self.filters,
                &self.highlight,
            ),
            linked: linked_view(
                &layer.points,
                session.category_colors(self.point_mode),
                &self.filters,
                &self.highlight,
            ),
            histogram: histogram_view(&session.aggregates.bins, &session.dataset.records, &self.filters),
        };
    }

    /// Transition length for linked-view style changes.
    pub fn line_transition(&self) -> f32 {
        if self.last_change_was_hover {
            self.config.animation.lines_hover
        } else {
            self.config.animation.lines_filter
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::raw;
    use crate::view::linked::PointStyle;

    fn scenario_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(SalaryDataset::from_raw_rows(vec![
            raw("Engineer", "SE", "100000", "100"),
            raw("Engineer", "MI", "80000", "0"),
            raw("Analyst", "SE", "60000", "50"),
        ]));
        state
    }

    fn included(state: &AppState) -> Vec<usize> {
        state
            .views
            .linked
            .points
            .iter()
            .filter(|v| v.style.is_included())
            .map(|v| v.id.0)
            .collect()
    }

    #[test]
    fn loading_publishes_all_views() {
        let state = scenario_state();
        assert_eq!(state.views.slices.len(), 3);
        assert_eq!(state.views.linked.points.len(), 3);
        assert_eq!(state.views.histogram.total, 3);
        assert_eq!(included(&state), vec![0, 1, 2]);
    }

    #[test]
    fn category_selection_updates_linked_view() {
        let mut state = scenario_state();
        assert!(state.apply(Gesture::SelectCategory(Selection::Only("Engineer".into()))));
        assert_eq!(included(&state), vec![0, 1]);
        assert!(!state.apply(Gesture::SelectCategory(Selection::Only("Engineer".into()))));
    }

    #[test]
    fn slice_click_rederives_histogram_and_toggles_back() {
        let mut state = scenario_state();
        state.apply(Gesture::ToggleProportion(RemoteStatus::InPerson));
        assert_eq!(state.views.histogram.total, 1);
        assert_eq!(state.views.histogram.caption, "Showing Only In-Person Positions");
        assert_eq!(included(&state), vec![1]);
        assert_eq!(state.views.slices.iter().filter(|s| s.active).count(), 1);

        state.apply(Gesture::ToggleProportion(RemoteStatus::InPerson));
        assert_eq!(state.filters.proportion, None);
        assert_eq!(state.views.histogram.total, 3);
        assert!(state.views.slices.iter().all(|s| s.active));
    }

    #[test]
    fn bin_click_constrains_points_not_histogram() {
        let mut state = scenario_state();
        let session = state.session.clone().unwrap();
        let bin = session.aggregates.bins.bin_for(60000.0).unwrap();

        assert!(state.apply(Gesture::ToggleSalaryBin(bin)));
        assert_eq!(included(&state), vec![2]);
        assert_eq!(state.views.histogram.total, 3);
        assert!(state.views.histogram.bars[bin].selected);

        assert!(state.apply(Gesture::ToggleSalaryBin(bin)));
        assert_eq!(state.filters.salary_range, None);
        assert!(!state.apply(Gesture::ToggleSalaryBin(10_000)));
    }

    #[test]
    fn hover_focuses_only_included_points() {
        let mut state = scenario_state();
        state.apply(Gesture::SelectLevel(Selection::Only(ExperienceLevel::Senior)));
        assert!(!state.apply(Gesture::HoverPoint(Some(PointId(1)))));
        assert_eq!(state.highlight.point, None);

        assert!(state.apply(Gesture::HoverPoint(Some(PointId(2)))));
        assert!(state.last_change_was_hover);
        assert_eq!(state.line_transition(), state.config.animation.lines_hover);
        assert_eq!(state.views.linked.points[2].style, PointStyle::Focused);
        assert_eq!(state.views.linked.points[0].style, PointStyle::Suppressed);

        assert!(state.apply(Gesture::HoverPoint(None)));
        assert_eq!(state.views.linked.points[0].style, PointStyle::Normal);
    }

    #[test]
    fn reset_clears_filters_and_hover() {
        let mut state = scenario_state();
        let baseline = state.views.linked.clone();

        state.apply(Gesture::SelectCategory(Selection::Only("Analyst".into())));
        state.apply(Gesture::SelectLevel(Selection::Only(ExperienceLevel::Senior)));
        state.apply(Gesture::ToggleProportion(RemoteStatus::Hybrid));
        state.apply(Gesture::HoverSlice(Some(RemoteStatus::Hybrid)));
        state.apply(Gesture::HoverPoint(Some(PointId(2))));

        assert!(state.apply(Gesture::Reset));
        assert!(state.filters.is_default());
        assert_eq!(state.highlight, HighlightState::default());
        assert_eq!(state.views.linked, baseline);
        assert!(!state.last_change_was_hover);
        assert!(!state.apply(Gesture::Reset));
    }

    #[test]
    fn switching_mode_drops_point_focus() {
        let mut state = scenario_state();
        state.apply(Gesture::HoverPoint(Some(PointId(0))));
        assert!(state.apply(Gesture::SetPointMode(PointMode::Averaged)));
        assert_eq!(state.highlight.point, None);
        assert_eq!(state.views.linked.points.len(), 3);
        assert!(!state.apply(Gesture::SetPointMode(PointMode::Averaged)));
    }

    #[test]
    fn averaged_mode_ignores_proportion_for_points() {
        let mut state = scenario_state();
        state.apply(Gesture::SetPointMode(PointMode::Averaged));
        state.apply(Gesture::ToggleProportion(RemoteStatus::Remote));
        assert_eq!(included(&state), vec![0, 1, 2]);
        assert_eq!(state.views.histogram.total, 1);
    }

    #[test]
    fn gestures_without_data_are_harmless() {
        let mut state = AppState::new(DashboardConfig::default());
        assert!(!state.apply(Gesture::ToggleSalaryBin(0)));
        assert!(!state.apply(Gesture::HoverPoint(Some(PointId(0)))));
        assert!(state.apply(Gesture::ToggleProportion(RemoteStatus::Remote)));
        assert!(state.views.slices.is_empty());
    }
}
