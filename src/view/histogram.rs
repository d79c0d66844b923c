use eframe::egui::Color32;

use crate::color::{NEUTRAL, PRIMARY};
use crate::data::bins::{Bin, HistogramBins};
use crate::data::filter::FilterState;
use crate::data::model::Record;

/// Render directive for one histogram bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarView {
    pub bin: Bin,
    pub count: usize,
    pub fill: Color32,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramView {
    pub bars: Vec<BarView>,
    pub max_count: usize,
    /// Total of the active subset that fell into a bin.
    pub total: usize,
    pub caption: String,
}

/// Bars over the fixed thresholds. The proportion filter picks which records
/// feed the counts; the salary range only changes bar fills.
pub fn histogram_view(bins: &HistogramBins, records: &[Record], filters: &FilterState) -> HistogramView {
    let subset = records
        .iter()
        .filter(|r| filters.proportion.map_or(true, |s| r.remote_status == s))
        .map(|r| r.salary_in_usd);
    let counts = bins.counts(subset);

    let selected_bin = filters.salary_range.map(|r| r.bin);
    let bars: Vec<BarView> = bins
        .bins()
        .iter()
        .zip(&counts)
        .map(|(bin, &count)| {
            let selected = selected_bin == Some(bin.index);
            let fill = match selected_bin {
                Some(_) if !selected => NEUTRAL,
                _ => PRIMARY,
            };
            BarView { bin: *bin, count, fill, selected }
        })
        .collect();

    let caption = match filters.proportion {
        None => "Showing All Positions".to_string(),
        Some(status) => format!("Showing Only {} Positions", status.label()),
    };

    HistogramView {
        max_count: counts.iter().copied().max().unwrap_or(0),
        total: counts.iter().sum(),
        bars,
        caption,
    }
}

/// Short axis label: `$25k`, `$1.2M`.
pub fn format_usd_short(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "k")
    } else {
        (value, "")
    };
    if scaled.abs() >= 10.0 || scaled == 0.0 {
        format!("${scaled:.0}{suffix}")
    } else {
        format!("${scaled:.1}{suffix}")
    }
}
