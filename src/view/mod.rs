/// View bindings: pure functions from aggregates + filter state to render
/// directives, plus the scales and hit tests the UI needs to draw them.
///
/// Nothing in here touches egui's painter; `ui::*` consumes these models.

pub mod histogram;
pub mod linked;
pub mod proportion;
pub mod scale;
