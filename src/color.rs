use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::RemoteStatus;

/// Default bar fill and the first ordinal colour.
pub const PRIMARY: Color32 = Color32::from_rgb(0x4E, 0x79, 0xA7);
/// Fill of de-emphasised bars and suppressed lines.
pub const NEUTRAL: Color32 = Color32::from_rgb(0xCC, 0xCC, 0xCC);

/// Tableau 10.
const ORDINAL: [Color32; 10] = [
    Color32::from_rgb(0x4E, 0x79, 0xA7),
    Color32::from_rgb(0xF2, 0x8E, 0x2B),
    Color32::from_rgb(0xE1, 0x57, 0x59),
    Color32::from_rgb(0x76, 0xB7, 0xB2),
    Color32::from_rgb(0x59, 0xA1, 0x4F),
    Color32::from_rgb(0xED, 0xC9, 0x48),
    Color32::from_rgb(0xB0, 0x7A, 0xA1),
    Color32::from_rgb(0xFF, 0x9D, 0xA7),
    Color32::from_rgb(0x9C, 0x75, 0x5F),
    Color32::from_rgb(0xBA, 0xB0, 0xAC),
];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Ordinal colours for `n` keys: Tableau 10 first, generated hues after.
pub fn ordinal_palette(n: usize) -> Vec<Color32> {
    if n <= ORDINAL.len() {
        return ORDINAL[..n].to_vec();
    }
    let mut colors = ORDINAL.to_vec();
    colors.extend(generate_palette(n - ORDINAL.len()));
    colors
}

// ---------------------------------------------------------------------------
// Key → Color32 maps
// ---------------------------------------------------------------------------

/// Job title → line colour, assigned in axis order.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: HashMap<String, Color32>,
}

impl CategoryColors {
    pub fn new(categories: &[String]) -> Self {
        let mapping = categories
            .iter()
            .cloned()
            .zip(ordinal_palette(categories.len()))
            .collect();
        CategoryColors { mapping }
    }

    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping.get(category).copied().unwrap_or(Color32::GRAY)
    }
}

/// Remote status → slice colour, assigned in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SliceColors {
    mapping: Vec<(RemoteStatus, Color32)>,
}

impl SliceColors {
    pub fn new(order: impl IntoIterator<Item = RemoteStatus>) -> Self {
        SliceColors {
            mapping: order.into_iter().zip(ORDINAL).collect(),
        }
    }

    pub fn color_for(&self, status: RemoteStatus) -> Color32 {
        self.mapping
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, c)| *c)
            .unwrap_or(Color32::GRAY)
    }

    /// Legend entries (label → colour) in first-seen order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(s, c)| (s.label().to_string(), *c))
            .collect()
    }
}
