use std::hash::Hash;

use eframe::egui::{Color32, Context, Id};

use crate::view::linked::StrokeStyle;

// ---------------------------------------------------------------------------
// Style transitions
// ---------------------------------------------------------------------------
//
// egui keeps the in-flight value per id; a new target restarts the
// transition from wherever the previous one had got to.

pub fn animate_color(ctx: &Context, id: Id, target: Color32, secs: f32) -> Color32 {
    let [r, g, b, a] = target.to_array();
    let channel = |name: &'static str, v: u8| {
        ctx.animate_value_with_time(id.with(name), v as f32, secs)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_premultiplied(channel("r", r), channel("g", g), channel("b", b), channel("a", a))
}

pub fn animate_stroke(ctx: &Context, key: impl Hash, target: StrokeStyle, secs: f32) -> StrokeStyle {
    let id = Id::new(key);
    StrokeStyle {
        color: animate_color(ctx, id.with("color"), target.color, secs),
        width: ctx.animate_value_with_time(id.with("width"), target.width, secs),
        opacity: ctx.animate_value_with_time(id.with("opacity"), target.opacity, secs),
    }
}
