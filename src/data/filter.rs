use std::fmt;

use super::aggregate::{LinkedPoint, PointId};
use super::bins::Bin;
use super::model::{ExperienceLevel, RemoteStatus};

// ---------------------------------------------------------------------------
// Filter predicate: the four cross-filter axes
// ---------------------------------------------------------------------------

/// A dropdown selection: everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

/// Salary interval taken from a clicked histogram bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryRange {
    pub bin: usize,
    pub lo: f64,
    pub hi: f64,
    pub upper_closed: bool,
}

impl SalaryRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && (value < self.hi || (self.upper_closed && value <= self.hi))
    }
}

impl From<&Bin> for SalaryRange {
    fn from(bin: &Bin) -> Self {
        SalaryRange {
            bin: bin.index,
            lo: bin.x0,
            hi: bin.x1,
            upper_closed: bin.upper_closed,
        }
    }
}

/// The shared cross-filter state. Every field defaults to "no constraint".
///
/// A point is included when it passes all four components. The state never
/// records why a point is excluded: callers re-evaluate [`FilterState::included`]
/// over the full point set after each change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub category: Selection<String>,
    pub level: Selection<ExperienceLevel>,
    pub salary_range: Option<SalaryRange>,
    pub proportion: Option<RemoteStatus>,
}

impl FilterState {
    pub fn included(&self, point: &LinkedPoint) -> bool {
        self.category.matches(&point.category)
            && self.level.matches(&point.level)
            && self.salary_range.map_or(true, |r| r.contains(point.salary))
            && self.matches_proportion(point.remote_status)
    }

    /// Points without a single remote status (averages) are not restricted.
    fn matches_proportion(&self, status: Option<RemoteStatus>) -> bool {
        match (self.proportion, status) {
            (Some(selected), Some(own)) => selected == own,
            _ => true,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    // -- Transitions: each replaces exactly one field and reports a change --

    pub fn select_category(&mut self, selection: Selection<String>) -> bool {
        replace(&mut self.category, selection)
    }

    pub fn select_level(&mut self, selection: Selection<ExperienceLevel>) -> bool {
        replace(&mut self.level, selection)
    }

    /// Select the bin, or clear the range when the same bin is clicked again.
    pub fn toggle_salary_bin(&mut self, bin: &Bin) -> bool {
        self.salary_range = match self.salary_range {
            Some(current) if current.bin == bin.index => None,
            _ => Some(SalaryRange::from(bin)),
        };
        true
    }

    /// Select the slice, or clear it when the same slice is clicked again.
    pub fn toggle_proportion(&mut self, status: RemoteStatus) -> bool {
        self.proportion = match self.proportion {
            Some(current) if current == status => None,
            _ => Some(status),
        };
        true
    }

    pub fn reset(&mut self) -> bool {
        let was_default = self.is_default();
        *self = FilterState::default();
        !was_default
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

// ---------------------------------------------------------------------------
// Hover state
// ---------------------------------------------------------------------------

/// Ephemeral hover targets. Never part of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightState {
    /// The focused linked-view point.
    pub point: Option<PointId>,
    /// The slice under the pointer in the proportion view.
    pub slice: Option<RemoteStatus>,
}

impl HighlightState {
    pub fn clear(&mut self) {
        *self = HighlightState::default();
    }
}
