use std::f64::consts::TAU;

use eframe::egui::Color32;

use crate::color::SliceColors;
use crate::data::aggregate::ProportionSlice;
use crate::data::filter::{FilterState, HighlightState};
use crate::data::model::RemoteStatus;

/// Radial offset of the hovered slice, as a fraction of the radius.
pub const HOVER_POP_OUT: f32 = 0.05;
const INACTIVE_FADE: f32 = 0.35;

/// Render directive for one pie slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceView {
    pub status: RemoteStatus,
    pub count: usize,
    /// Share of all records, 0..=1.
    pub fraction: f64,
    /// Radians, clockwise from 12 o'clock.
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: Color32,
    pub active: bool,
    pub hovered: bool,
    /// Radial pop-out as a fraction of the radius.
    pub offset: f32,
}

impl SliceView {
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// `"Remote: 42.0%"`.
    pub fn tooltip(&self) -> String {
        format!("{}: {:.1}%", self.status.label(), self.fraction * 100.0)
    }
}

/// Slices keep the first-seen order of `slices`; angles are laid out largest
/// first. A slice is active when it is the selected one or nothing is
/// selected.
pub fn proportion_view(
    slices: &[ProportionSlice],
    colors: &SliceColors,
    filters: &FilterState,
    highlight: &HighlightState,
) -> Vec<SliceView> {
    let total: usize = slices.iter().map(|s| s.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut by_size: Vec<usize> = (0..slices.len()).collect();
    by_size.sort_by(|&a, &b| slices[b].count.cmp(&slices[a].count));

    let mut angles = vec![(0.0, 0.0); slices.len()];
    let mut cursor = 0.0;
    let last = by_size.last().copied();
    for i in by_size {
        let sweep = slices[i].count as f64 / total as f64 * TAU;
        // The final slice closes the circle exactly.
        let end = if Some(i) == last { TAU } else { cursor + sweep };
        angles[i] = (cursor, end);
        cursor = end;
    }

    slices
        .iter()
        .zip(angles)
        .map(|(slice, (start_angle, end_angle))| {
            let active = filters.proportion.map_or(true, |p| p == slice.status);
            let hovered = highlight.slice == Some(slice.status);
            let base = colors.color_for(slice.status);
            SliceView {
                status: slice.status,
                count: slice.count,
                fraction: slice.count as f64 / total as f64,
                start_angle,
                end_angle,
                fill: if active { base } else { base.gamma_multiply(INACTIVE_FADE) },
                active,
                hovered,
                offset: if hovered { HOVER_POP_OUT } else { 0.0 },
            }
        })
        .collect()
}

/// Clockwise angle from 12 o'clock of a pointer offset (screen y grows down),
/// in `[0, TAU)`.
pub fn angle_of(dx: f64, dy: f64) -> f64 {
    let a = dx.atan2(-dy);
    if a < 0.0 {
        // a tiny negative angle can round up to TAU
        (a + TAU) % TAU
    } else {
        a
    }
}

/// Slice under the pointer, if the pointer is inside the pie.
pub fn slice_at(views: &[SliceView], dx: f64, dy: f64, radius: f64) -> Option<RemoteStatus> {
    if dx.hypot(dy) > radius {
        return None;
    }
    let angle = angle_of(dx, dy);
    views.iter().find(|v| v.contains_angle(angle)).map(|v| v.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn slices() -> Vec<ProportionSlice> {
        vec![
            ProportionSlice { status: RemoteStatus::Hybrid, count: 1 },
            ProportionSlice { status: RemoteStatus::Remote, count: 2 },
            ProportionSlice { status: RemoteStatus::InPerson, count: 1 },
        ]
    }

    fn colors() -> SliceColors {
        SliceColors::new(slices().iter().map(|s| s.status))
    }

    #[test]
    fn largest_slice_starts_at_twelve() {
        let views = proportion_view(&slices(), &colors(), &FilterState::default(), &HighlightState::default());
        assert_eq!(views[0].status, RemoteStatus::Hybrid);
        assert_relative_eq!(views[1].start_angle, 0.0);
        assert_relative_eq!(views[1].end_angle, std::f64::consts::PI);
        assert_relative_eq!(views[0].start_angle, std::f64::consts::PI);
        assert_relative_eq!(views[2].end_angle, TAU);
        assert_relative_eq!(views.iter().map(|v| v.fraction).sum::<f64>(), 1.0);
        assert!(views.iter().all(|v| v.active));
    }

    #[test]
    fn selection_deactivates_other_slices() {
        let filters = FilterState { proportion: Some(RemoteStatus::Remote), ..FilterState::default() };
        let views = proportion_view(&slices(), &colors(), &filters, &HighlightState::default());
        let active: Vec<_> = views.iter().filter(|v| v.active).map(|v| v.status).collect();
        assert_eq!(active, vec![RemoteStatus::Remote]);
        assert_ne!(views[0].fill, colors().color_for(RemoteStatus::Hybrid));
    }

    #[test]
    fn hover_pops_out_and_reports_percentage() {
        let highlight = HighlightState { slice: Some(RemoteStatus::Remote), ..HighlightState::default() };
        let views = proportion_view(&slices(), &colors(), &FilterState::default(), &highlight);
        assert!(views[1].hovered);
        assert_eq!(views[1].offset, HOVER_POP_OUT);
        assert_eq!(views[1].tooltip(), "Remote: 50.0%");
        assert_eq!(views[0].tooltip(), "Hybrid: 25.0%");
    }

    #[test]
    fn hit_testing_by_angle() {
        let views = proportion_view(&slices(), &colors(), &FilterState::default(), &HighlightState::default());
        // right of centre → first half → Remote
        assert_eq!(slice_at(&views, 10.0, 0.0, 50.0), Some(RemoteStatus::Remote));
        // left of centre → 270° → last quarter → In-Person
        assert_eq!(slice_at(&views, -10.0, 0.0, 50.0), Some(RemoteStatus::InPerson));
        // straight down → 180° → Hybrid
        assert_eq!(slice_at(&views, 0.0, 10.0, 50.0), Some(RemoteStatus::Hybrid));
        assert_eq!(slice_at(&views, 60.0, 0.0, 50.0), None);
    }

    #[test]
    fn no_gap_just_left_of_twelve() {
        let thirds = vec![
            ProportionSlice { status: RemoteStatus::Remote, count: 1 },
            ProportionSlice { status: RemoteStatus::InPerson, count: 1 },
            ProportionSlice { status: RemoteStatus::Hybrid, count: 1 },
        ];
        let views = proportion_view(&thirds, &colors(), &FilterState::default(), &HighlightState::default());
        assert_eq!(views.iter().map(|v| v.end_angle).fold(0.0, f64::max), TAU);
        for k in 1..2000 {
            let dx = -(k as f64) * 1e-15;
            assert!(slice_at(&views, dx, -10.0, 50.0).is_some(), "gap at dx = {dx}");
        }
        assert_eq!(slice_at(&views, -1e-9, -10.0, 50.0), Some(RemoteStatus::Hybrid));
        assert!(angle_of(-1e-300, -10.0) < TAU);
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(proportion_view(&[], &colors(), &FilterState::default(), &HighlightState::default()).is_empty());
    }
}
