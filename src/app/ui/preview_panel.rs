use eframe::egui::{Align2, Color32, FontId, Rect, Sense, Ui, pos2, vec2};

use crate::util::fit_centered;

use super::super::ViewModel;

const CAPTION_HEIGHT: f32 = 24.0;

impl ViewModel {
    pub(in crate::app) fn draw_preview(&self, ui: &mut Ui) {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::BLACK);

        let Some(preview) = &self.preview else {
            if self.preview_loader.is_pending() {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "loading preview...",
                    FontId::proportional(13.0),
                    Color32::from_gray(160),
                );
            }
            return;
        };

        let Some((x, y, w, h)) = fit_centered(
            (rect.width(), rect.height() - CAPTION_HEIGHT),
            preview.size,
        ) else {
            return;
        };

        let image_rect = Rect::from_min_size(rect.left_top() + vec2(x, y), vec2(w, h));
        painter.image(
            preview.texture.id(),
            image_rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        let stale = self.graph.selected() != Some(preview.node);
        painter.text(
            pos2(rect.center().x, image_rect.bottom() + 6.0),
            Align2::CENTER_TOP,
            &preview.display_name,
            FontId::proportional(13.0),
            if stale {
                Color32::from_gray(140)
            } else {
                Color32::WHITE
            },
        );
    }
}
