use eframe::egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, vec2};

use crate::graph::{EdgeShading, Viewport};

use super::super::ViewModel;
use super::super::render_utils::{
    NEIGHBOR_OUTLINE, NODE_FILL, NODE_OUTLINE, SELECTED_FILL, draw_background, draw_drag_box,
    edge_color, panel_to_screen,
};

fn circle_radius(diameter: f64) -> f32 {
    diameter as f32 / 2.0
}

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        self.viewport = Viewport {
            width: f64::from(rect.width()),
            height: f64::from(rect.height()),
        };

        if self.view.is_none() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "The graph has no nodes.",
                FontId::proportional(15.0),
                Color32::from_gray(60),
            );
            return;
        }

        self.handle_graph_input(ui, rect, &response);

        let Some(view) = self.view else {
            return;
        };
        let viewport = self.viewport;
        let graph = &self.graph;
        let screen_positions = graph
            .nodes()
            .iter()
            .map(|node| panel_to_screen(rect, view.to_screen((node.x, node.y), viewport)))
            .collect::<Vec<Pos2>>();
        let shading = graph
            .weight_range()
            .map(|(min, max)| EdgeShading::new(min, max));
        let selected = graph.selected();

        // Each undirected edge is stored twice; draw it from the lower id.
        if let Some(shading) = shading {
            for (id, node) in graph.nodes().iter().enumerate() {
                if graph.is_orphaned(id) {
                    continue;
                }
                for (&neighbor, &weight) in node.neighbors.iter().zip(&node.weights) {
                    if id < neighbor {
                        painter.line_segment(
                            [screen_positions[id], screen_positions[neighbor]],
                            Stroke::new(1.0, edge_color(shading.channel(weight), false)),
                        );
                    }
                }
            }

            if let Some(selected) = selected
                && let Some(node) = graph.node(selected)
            {
                for (&neighbor, &weight) in node.neighbors.iter().zip(&node.weights) {
                    painter.line_segment(
                        [screen_positions[selected], screen_positions[neighbor]],
                        Stroke::new(1.5, edge_color(shading.channel(weight), true)),
                    );
                }
            }
        }

        for id in graph.visible_nodes() {
            let Some(radius) = graph.node_diameter(id).map(circle_radius) else {
                continue;
            };
            let position = screen_positions[id];
            painter.circle_filled(position, radius, NODE_FILL);
            painter.circle_stroke(position, radius, Stroke::new(1.0, NODE_OUTLINE));
        }

        if let Some(selected) = selected
            && let Some(node) = graph.node(selected)
        {
            for (&neighbor, &weight) in node.neighbors.iter().zip(&node.weights) {
                let Some(radius) = graph.node_diameter(neighbor).map(circle_radius) else {
                    continue;
                };
                let channel = shading.map_or(0, |shading| shading.channel(weight));
                let position = screen_positions[neighbor];
                painter.circle_filled(position, radius, edge_color(channel, true));
                painter.circle_stroke(position, radius, Stroke::new(1.5, NEIGHBOR_OUTLINE));
            }

            if let Some(radius) = graph.node_diameter(selected).map(circle_radius) {
                let position = screen_positions[selected];
                painter.circle_filled(position, radius, SELECTED_FILL);
                painter.circle_stroke(position, radius, Stroke::new(1.0, NODE_OUTLINE));
            }

            let panel_text = format!(
                "{}  |  image {}  |  neighbors {}",
                node.display_name,
                node.image_index,
                node.degree()
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(20),
            );
        }

        if let Some(drag_box) = graph.drag_box() {
            draw_drag_box(&painter, rect, drag_box);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_radius_is_half_the_diameter() {
        assert_eq!(circle_radius(6.0), 3.0);
        assert_eq!(circle_radius(7.0), 3.5);
    }
}
