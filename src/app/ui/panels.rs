use std::sync::Arc;

use eframe::egui::{self, Align, ColorImage, Context, Layout, TextureOptions};

use crate::graph::{Graph, ViewTransform, Viewport};
use crate::image_source::ImageSource;

use super::super::pointer::{PointerController, PointerEvent};
use super::super::preview::{Preview, PreviewLoader};
use super::super::{Inputs, PreviewTexture, ViewModel};

const PREVIEW_PANEL_WIDTH: f32 = 400.0;

impl ViewModel {
    pub(in crate::app) fn new(graph: Graph, image_source: Arc<dyn ImageSource>) -> Self {
        let view = graph.extent_bounds().map(ViewTransform::new);

        Self {
            graph,
            view,
            viewport: Viewport {
                width: 0.0,
                height: 0.0,
            },
            pointer: PointerController::default(),
            last_hover: None,
            preview_loader: PreviewLoader::new(image_source),
            preview: None,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, inputs: &Inputs) {
        self.receive_preview(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("simgraph-viewer");
                    ui.separator();
                    ui.label(format!("graph: {}", inputs.graph));
                    ui.label(format!("nodes: {}", self.graph.node_count()));
                    ui.label(format!("edges: {}", self.graph.edge_count()));
                    if let Some((min, max)) = self.graph.weight_range() {
                        ui.label(format!("weights: {min:.3} .. {max:.3}"));
                    }
                    if let Some(view) = self.view
                        && !view.is_reset()
                    {
                        let visible = view.visible();
                        ui.label(format!(
                            "view: x {:.0}..{:.0}, y {:.0}..{:.0}",
                            visible.min_x, visible.max_x, visible.min_y, visible.max_y
                        ));
                    }
                    let can_reset = self.view.is_some_and(|view| !view.is_reset());
                    if ui
                        .add_enabled(can_reset, egui::Button::new("Reset view"))
                        .clicked()
                    {
                        self.apply_pointer(PointerEvent::SecondaryClick);
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(name) = self.graph.selected_display_name() {
                            ui.label(name);
                        }
                    });
                });
            });

        egui::SidePanel::left("preview")
            .resizable(false)
            .exact_width(PREVIEW_PANEL_WIDTH)
            .show(ctx, |ui| self.draw_preview(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    fn receive_preview(&mut self, ctx: &Context) {
        if let Some(landed) = self.preview_loader.poll() {
            self.preview = landed.map(|preview| Self::upload_preview(ctx, preview));
        }
        if self.preview_loader.is_pending() {
            ctx.request_repaint();
        }
    }

    fn upload_preview(ctx: &Context, preview: Preview) -> PreviewTexture {
        let size = (preview.image.width, preview.image.height);
        let image = ColorImage::from_rgba_unmultiplied([size.0, size.1], &preview.image.rgba);
        let texture = ctx.load_texture(
            format!("preview-{}", preview.node),
            image,
            TextureOptions::LINEAR,
        );
        PreviewTexture {
            node: preview.node,
            display_name: preview.display_name,
            size,
            texture,
        }
    }

    /// Feeds one pointer event through the state machine and keeps the
    /// preview in step with the selection.
    pub(in crate::app) fn apply_pointer(&mut self, event: PointerEvent) {
        let Some(view) = self.view.as_mut() else {
            return;
        };

        let outcome = self
            .pointer
            .handle(event, &mut self.graph, view, self.viewport);
        if outcome.view_changed {
            // Content moved under the pointer, so the next hover re-picks.
            self.last_hover = None;
        }
        if outcome.selection_changed {
            let handle = self.graph.selected_image_handle();
            if handle.is_none() {
                self.preview = None;
            }
            self.preview_loader.request(handle);
        }
    }
}
