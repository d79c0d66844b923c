use eframe::egui::{Color32, Pos2, Rect};

use super::scale::{LinearScale, PointScale};
use crate::color::{CategoryColors, NEUTRAL};
use crate::data::aggregate::{LinkedAxes, LinkedPoint, PointId};
use crate::data::filter::{FilterState, HighlightState};
use crate::data::model::ExperienceLevel;

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// Styling state of one point. Both of a point's segments always share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStyle {
    /// Included, nothing focused.
    Normal,
    /// The hovered point.
    Focused,
    /// Included, but another point is focused.
    Suppressed,
    /// Excluded by the filter: faint and ignored by hover.
    Dimmed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub opacity: f32,
}

impl PointStyle {
    pub fn stroke(self, category_color: Color32) -> StrokeStyle {
        match self {
            PointStyle::Normal => StrokeStyle { color: category_color, width: 2.0, opacity: 0.5 },
            PointStyle::Focused => StrokeStyle { color: category_color, width: 5.0, opacity: 1.0 },
            PointStyle::Suppressed => StrokeStyle { color: NEUTRAL, width: 1.0, opacity: 0.1 },
            PointStyle::Dimmed => StrokeStyle { color: NEUTRAL, width: 1.0, opacity: 0.05 },
        }
    }

    pub fn is_included(self) -> bool {
        self != PointStyle::Dimmed
    }
}

/// Render directive for one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointView {
    pub id: PointId,
    pub style: PointStyle,
    pub stroke: StrokeStyle,
}

/// The linked view as a whole; `points[i].id == PointId(i)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedView {
    pub points: Vec<PointView>,
    /// Drawn last so it sits on top.
    pub focused: Option<PointId>,
    pub included: usize,
}

/// Style every point from scratch against the current filter and hover.
pub fn linked_view(
    points: &[LinkedPoint],
    colors: &CategoryColors,
    filters: &FilterState,
    highlight: &HighlightState,
) -> LinkedView {
    let included: Vec<bool> = points.iter().map(|p| filters.included(p)).collect();
    let focused = highlight
        .point
        .filter(|id| included.get(id.0).copied().unwrap_or(false));

    let views = points
        .iter()
        .zip(&included)
        .map(|(p, &is_included)| {
            let style = match (is_included, focused) {
                (false, _) => PointStyle::Dimmed,
                (true, Some(f)) if f == p.id => PointStyle::Focused,
                (true, Some(_)) => PointStyle::Suppressed,
                (true, None) => PointStyle::Normal,
            };
            PointView {
                id: p.id,
                style,
                stroke: style.stroke(colors.color_for(&p.category)),
            }
        })
        .collect();

    LinkedView {
        points: views,
        focused,
        included: included.iter().filter(|&&i| i).count(),
    }
}

impl LinkedView {
    pub fn get(&self, id: PointId) -> Option<&PointView> {
        self.points.get(id.0)
    }

    /// Ids in paint order: dimmed points underneath, the focused point last.
    pub fn paint_order(&self) -> impl Iterator<Item = PointId> + '_ {
        let dimmed = self.points.iter().filter(|v| !v.style.is_included());
        let rest = self
            .points
            .iter()
            .filter(move |v| v.style.is_included() && Some(v.id) != self.focused);
        dimmed.chain(rest).map(|v| v.id).chain(self.focused)
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

pub const AXIS_LABELS: [&str; 3] = ["Job Title", "Experience Level", "Salary (USD)"];

/// Screen placement of the three parallel axes inside `rect`.
#[derive(Debug, Clone)]
pub struct LinkedLayout {
    pub axis_x: [f32; 3],
    pub top: f32,
    pub bottom: f32,
    pub categories: PointScale<String>,
    pub levels: PointScale<ExperienceLevel>,
    pub salary: LinearScale,
}

impl LinkedLayout {
    pub fn new(axes: &LinkedAxes, rect: Rect) -> Self {
        let x = PointScale::new(vec![0usize, 1, 2], (rect.left() as f64, rect.right() as f64));
        let axis_x = [0usize, 1, 2].map(|i| x.position(&i).unwrap_or_default() as f32);
        let vertical = (rect.top() as f64, rect.bottom() as f64);
        let (lo, hi) = axes.salary.unwrap_or((0.0, 0.0));
        LinkedLayout {
            axis_x,
            top: rect.top(),
            bottom: rect.bottom(),
            categories: PointScale::new(axes.categories.clone(), vertical),
            levels: PointScale::new(axes.levels.clone(), vertical),
            // Higher salaries at the top.
            salary: LinearScale::new((lo, hi), (vertical.1, vertical.0)),
        }
    }

    /// The category→level and level→salary segments of a point.
    pub fn segments(&self, p: &LinkedPoint) -> Option<[[Pos2; 2]; 2]> {
        let cat_y = self.categories.position(&p.category)? as f32;
        let level_y = self.levels.position(&p.level)? as f32;
        let salary_y = self.salary.map(p.salary) as f32;
        let a = Pos2::new(self.axis_x[0], cat_y);
        let b = Pos2::new(self.axis_x[1], level_y);
        let c = Pos2::new(self.axis_x[2], salary_y);
        Some([[a, b], [b, c]])
    }

    /// The included point whose nearest segment is within `tolerance` pixels
    /// of `pointer`. Either segment resolves to the same point.
    pub fn pick(
        &self,
        points: &[LinkedPoint],
        view: &LinkedView,
        pointer: Pos2,
        tolerance: f32,
    ) -> Option<PointId> {
        let mut best: Option<(PointId, f32)> = None;
        for p in points {
            let hoverable = view.get(p.id).is_some_and(|v| v.style.is_included());
            if !hoverable {
                continue;
            }
            let Some(segments) = self.segments(p) else {
                continue;
            };
            let d = segments
                .iter()
                .map(|[a, b]| distance_to_segment(pointer, *a, *b))
                .fold(f32::INFINITY, f32::min);
            if d <= tolerance && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((p.id, d));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Euclidean distance from `p` to the segment `a`–`b`.
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

/// `$123,457` – rounded to whole dollars with thousands separators.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        format!("-${out}")
    } else {
        format!("${out}")
    }
}

pub fn point_tooltip(p: &LinkedPoint) -> String {
    let heading = format!("{} {}", p.level, p.category);
    if p.record.is_some() {
        format!("{heading}\nSalary: {}", format_usd(p.salary))
    } else {
        format!(
            "{heading}\nAverage salary: {} ({} records)",
            format_usd(p.salary),
            p.support
        )
    }
}
