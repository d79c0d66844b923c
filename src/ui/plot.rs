use std::f64::consts::FRAC_PI_2;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::data::bins::nice_ticks;
use crate::state::{AppState, Gesture};
use crate::ui::anim::{animate_color, animate_stroke};
use crate::view::histogram::format_usd_short;
use crate::view::linked::{point_tooltip, LinkedLayout, AXIS_LABELS};
use crate::view::proportion::slice_at;

const LINE_PICK_TOLERANCE: f32 = 4.0;

fn heading(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(text);
    });
}

// ---------------------------------------------------------------------------
// Proportion view (pie)
// ---------------------------------------------------------------------------

/// Pie of remote-work status. Hover shows the share, click toggles the
/// proportion filter.
pub fn proportion_chart(ui: &mut Ui, state: &AppState, gestures: &mut Vec<Gesture>) {
    heading(ui, "Remote Work Ratios (click a slice)");

    let side = ui.available_width().min(ui.available_height()).max(60.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click());
    let center = response.rect.center();
    let radius = side * 0.42;
    let secs = state.config.animation.slice_hover;

    for slice in &state.views.slices {
        let offset = ui.ctx().animate_value_with_time(
            egui::Id::new(("slice_offset", slice.status)),
            slice.offset,
            secs,
        );
        let fill = animate_color(
            ui.ctx(),
            egui::Id::new(("slice_fill", slice.status)),
            slice.fill,
            state.config.animation.bars,
        );
        let shift = polar(Pos2::ZERO, radius * offset, slice.mid_angle()).to_vec2();
        paint_wedge(&painter, center + shift, radius, slice.start_angle, slice.end_angle, fill);
    }

    let hovered = response.hover_pos().and_then(|pos| {
        let d = pos - center;
        slice_at(&state.views.slices, d.x as f64, d.y as f64, radius as f64 * 1.05)
    });
    gestures.push(Gesture::HoverSlice(hovered));

    if let Some(status) = hovered {
        if response.clicked() {
            gestures.push(Gesture::ToggleProportion(status));
        }
        if let Some(slice) = state.views.slices.iter().find(|s| s.status == status) {
            response.on_hover_text_at_pointer(slice.tooltip());
        }
    }
}

/// Screen position at `angle` (clockwise from 12 o'clock).
fn polar(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    let a = angle - FRAC_PI_2;
    center + Vec2::new(a.cos() as f32, a.sin() as f32) * radius
}

/// Fill a pie wedge as a fan of convex pieces (each ≤ 90°).
fn paint_wedge(painter: &egui::Painter, center: Pos2, radius: f32, start: f64, end: f64, fill: Color32) {
    const MAX_PIECE: f64 = FRAC_PI_2;
    const STEP: f64 = 0.04;
    let mut piece_start = start;
    while piece_start < end {
        let piece_end = (piece_start + MAX_PIECE).min(end);
        let mut points = vec![center];
        let mut a = piece_start;
        while a < piece_end {
            points.push(polar(center, radius, a));
            a += STEP;
        }
        points.push(polar(center, radius, piece_end));
        painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
        piece_start = piece_end;
    }
}

// ---------------------------------------------------------------------------
// Linked view (parallel coordinates)
// ---------------------------------------------------------------------------

/// Job title → experience level → salary polylines for the top titles.
pub fn linked_chart(ui: &mut Ui, state: &AppState, gestures: &mut Vec<Gesture>) {
    heading(ui, "Salaries by Job and Experience Level (Top 10 Most Frequent Titles)");

    let Some(session) = &state.session else {
        return;
    };
    let layer = session.layer(state.point_mode);

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let plot_rect = Rect::from_min_max(
        response.rect.min + Vec2::new(190.0, 30.0),
        response.rect.max - Vec2::new(60.0, 12.0),
    );
    let layout = LinkedLayout::new(&layer.axes, plot_rect);
    let text_color = ui.visuals().text_color();
    let axis_stroke = Stroke::new(1.0, text_color);
    let font = FontId::proportional(10.0);

    // ---- Axes ----
    for (x, label) in layout.axis_x.iter().zip(AXIS_LABELS) {
        painter.line_segment([Pos2::new(*x, layout.top), Pos2::new(*x, layout.bottom)], axis_stroke);
        painter.text(
            Pos2::new(*x, layout.top - 16.0),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(11.0),
            text_color,
        );
    }
    for (category, y) in layout.categories.ticks() {
        painter.text(
            Pos2::new(layout.axis_x[0] - 6.0, y as f32),
            Align2::RIGHT_CENTER,
            category,
            font.clone(),
            text_color,
        );
    }
    for (level, y) in layout.levels.ticks() {
        painter.text(
            Pos2::new(layout.axis_x[1] - 6.0, y as f32),
            Align2::RIGHT_CENTER,
            level.label(),
            font.clone(),
            text_color,
        );
    }
    if let Some((lo, hi)) = layer.axes.salary {
        for tick in nice_ticks(lo, hi, 10) {
            painter.text(
                Pos2::new(layout.axis_x[2] - 6.0, layout.salary.map(tick) as f32),
                Align2::RIGHT_CENTER,
                format_usd_short(tick),
                font.clone(),
                text_color,
            );
        }
    }

    // ---- Lines ----
    let secs = state.line_transition();
    for id in state.views.linked.paint_order() {
        let (Some(point), Some(view)) = (layer.points.get(id.0), state.views.linked.get(id)) else {
            continue;
        };
        let stroke = animate_stroke(ui.ctx(), ("linked", state.point_mode, id), view.stroke, secs);
        if stroke.opacity < 0.01 || stroke.width <= 0.0 {
            continue;
        }
        let Some(segments) = layout.segments(point) else {
            continue;
        };
        let pen = Stroke::new(stroke.width, stroke.color.gamma_multiply(stroke.opacity));
        for segment in segments {
            painter.line_segment(segment, pen);
        }
    }

    // ---- Hover ----
    let picked = response
        .hover_pos()
        .and_then(|pos| layout.pick(&layer.points, &state.views.linked, pos, LINE_PICK_TOLERANCE));
    gestures.push(Gesture::HoverPoint(picked));

    if let Some(point) = state.views.linked.focused.and_then(|id| layer.points.get(id.0)) {
        if response.hovered() {
            response.on_hover_text_at_pointer(point_tooltip(point));
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric-distribution view (histogram)
// ---------------------------------------------------------------------------

/// Salary histogram; click a bar to toggle the salary-range filter.
pub fn salary_histogram(ui: &mut Ui, state: &AppState, gestures: &mut Vec<Gesture>) {
    heading(ui, "Salary Distribution (click a bar)");
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(&state.views.histogram.caption);
    });

    let secs = state.config.animation.bars;
    let ctx = ui.ctx().clone();
    let bars: Vec<Bar> = state
        .views
        .histogram
        .bars
        .iter()
        .map(|b| {
            let height = ctx.animate_value_with_time(
                egui::Id::new(("bar_height", b.bin.index)),
                b.count as f32,
                secs * 2.0,
            );
            let fill = animate_color(&ctx, egui::Id::new(("bar_fill", b.bin.index)), b.fill, secs);
            Bar::new(b.bin.center(), height as f64)
                .width(b.bin.width() * 0.95)
                .fill(fill)
                .stroke(Stroke::new(1.0, Color32::WHITE))
                .name(format!(
                    "{} – {}: {}",
                    format_usd_short(b.bin.x0),
                    format_usd_short(b.bin.x1),
                    b.count
                ))
        })
        .collect();

    let response = Plot::new("salary_histogram")
        .x_axis_label("Salary in USD")
        .y_axis_label("Count")
        .x_axis_formatter(|mark, _range| format_usd_short(mark.value))
        .include_x(0.0)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            plot_ui.pointer_coordinate()
        });

    if response.response.clicked() {
        if let Some(session) = &state.session {
            let bin = response
                .inner
                .and_then(|coord| session.aggregates.bins.bin_for(coord.x));
            if let Some(index) = bin {
                gestures.push(Gesture::ToggleSalaryBin(index));
            }
        }
    }
}
