use std::path::PathBuf;

use serde::Serialize;

use crate::data::aggregate::PointMode;

/// Compiled-in dashboard settings. There is no config file; the only
/// external input is the dataset itself.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardConfig {
    /// Dataset loaded at start-up.
    pub dataset_path: PathBuf,
    /// Number of job titles shown in the linked view.
    pub top_n: usize,
    /// Target tick count for the histogram thresholds.
    pub histogram_ticks: usize,
    pub point_mode: PointMode,
    pub window_size: [f32; 2],
    pub animation: AnimationConfig,
}

/// Durations (seconds) of style transitions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnimationConfig {
    pub lines_filter: f32,
    pub lines_hover: f32,
    pub bars: f32,
    pub slice_hover: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            lines_filter: 0.5,
            lines_hover: 0.1,
            bars: 0.3,
            slice_hover: 0.2,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/ds_salaries.csv"),
            top_n: 10,
            histogram_ticks: 20,
            point_mode: PointMode::default(),
            window_size: [1400.0, 900.0],
            animation: AnimationConfig::default(),
        }
    }
}
