use eframe::egui::{self, PointerButton, Rect, Ui};

use super::super::ViewModel;
use super::super::pointer::PointerEvent;
use super::super::render_utils::screen_to_panel;

impl ViewModel {
    pub(in crate::app) fn handle_graph_input(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if response.clicked_by(PointerButton::Secondary) {
            self.apply_pointer(PointerEvent::SecondaryClick);
        }

        self.handle_graph_zoom(ui, rect, response);
        self.handle_graph_pan(response);

        if response.drag_started_by(PointerButton::Primary)
            && let Some(origin) = ui.input(|input| input.pointer.press_origin())
        {
            self.apply_pointer(PointerEvent::Down {
                at: screen_to_panel(rect, origin),
            });
        }

        if response.dragged_by(PointerButton::Primary)
            && let Some(current) = response.interact_pointer_pos()
        {
            self.apply_pointer(PointerEvent::Move {
                at: screen_to_panel(rect, current),
            });
        }

        if response.drag_stopped_by(PointerButton::Primary) {
            let released = response
                .interact_pointer_pos()
                .or_else(|| ui.input(|input| input.pointer.latest_pos()));
            if let Some(released) = released {
                self.apply_pointer(PointerEvent::Up {
                    at: screen_to_panel(rect, released),
                });
            }
        }

        self.handle_graph_hover(response, rect);
    }

    fn handle_graph_hover(&mut self, response: &egui::Response, rect: Rect) {
        if self.pointer.is_dragging() || response.dragged() {
            return;
        }

        let Some(pointer) = response.hover_pos() else {
            return;
        };
        let at = screen_to_panel(rect, pointer);
        if self.last_hover == Some(at) {
            return;
        }

        self.last_hover = Some(at);
        self.apply_pointer(PointerEvent::Move { at });
    }

    fn handle_graph_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.apply_pointer(PointerEvent::Scroll {
            at: screen_to_panel(rect, pointer),
            factor: f64::from(factor),
        });
    }

    fn handle_graph_pan(&mut self, response: &egui::Response) {
        if !response.dragged_by(PointerButton::Middle) {
            return;
        }

        let delta = response.drag_delta();
        self.apply_pointer(PointerEvent::Pan {
            delta: (f64::from(delta.x), f64::from(delta.y)),
        });
    }
}
