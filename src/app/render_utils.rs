use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, pos2};

use crate::graph::DragBox;

pub(super) const NODE_FILL: Color32 = Color32::from_rgb(255, 0, 0);
pub(super) const NODE_OUTLINE: Color32 = Color32::BLACK;
pub(super) const SELECTED_FILL: Color32 = Color32::from_rgb(255, 0, 255);
pub(super) const NEIGHBOR_OUTLINE: Color32 = Color32::from_rgb(255, 200, 0);

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_gray(238));
}

pub(super) fn panel_to_screen(rect: Rect, point: (f64, f64)) -> Pos2 {
    pos2(rect.left() + point.0 as f32, rect.top() + point.1 as f32)
}

pub(super) fn screen_to_panel(rect: Rect, pos: Pos2) -> (f64, f64) {
    (f64::from(pos.x - rect.left()), f64::from(pos.y - rect.top()))
}

/// Ordinary edges use the blue channel, edges of the selection the green one.
pub(super) fn edge_color(channel: u8, selected: bool) -> Color32 {
    if selected {
        Color32::from_rgb(0, channel, 0)
    } else {
        Color32::from_rgb(0, 0, channel)
    }
}

pub(super) fn draw_drag_box(painter: &Painter, rect: Rect, drag_box: DragBox) {
    let a = panel_to_screen(rect, drag_box.origin);
    let b = panel_to_screen(rect, drag_box.current);
    let top_left = pos2(a.x.min(b.x), a.y.min(b.y));
    let bottom_right = pos2(a.x.max(b.x), a.y.max(b.y));
    let top_right = pos2(bottom_right.x, top_left.y);
    let bottom_left = pos2(top_left.x, bottom_right.y);

    let stroke = Stroke::new(1.0, Color32::BLACK);
    painter.line_segment([top_left, top_right], stroke);
    painter.line_segment([top_right, bottom_right], stroke);
    painter.line_segment([bottom_right, bottom_left], stroke);
    painter.line_segment([bottom_left, top_left], stroke);
}
