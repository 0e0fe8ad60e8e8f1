use std::collections::HashMap;

use serde::Serialize;

use super::error::ParseError;
use super::shading::render_radius;
use super::transform::{ViewTransform, Viewport};

/// Dense index into [`Graph::nodes`], assigned in declaration order.
pub type NodeId = usize;

/// Hover pick distance in screen pixels.
pub const PICK_DISTANCE: f64 = 15.0;

#[derive(Clone, Debug)]
pub struct Node {
    pub image_index: usize,
    pub display_name: String,
    pub x: f64,
    pub y: f64,
    pub neighbors: Vec<NodeId>,
    pub weights: Vec<f64>,
}

impl Node {
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    fn add_neighbor(&mut self, neighbor: NodeId, weight: f64) {
        self.neighbors.push(neighbor);
        self.weights.push(weight);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// In-progress selection box, in screen pixels, corners as dragged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragBox {
    pub origin: (f64, f64),
    pub current: (f64, f64),
}

/// What the image collaborator needs to fetch the preview of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageHandle {
    pub node: NodeId,
    pub display_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OrphanReport {
    pub isolated: Vec<NodeId>,
    pub pairs: Vec<(NodeId, NodeId)>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GraphReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub neighbor_entries: usize,
    pub visible_node_count: usize,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub extent: Option<Bounds>,
    pub orphans: OrphanReport,
}

#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    index_by_image: HashMap<usize, NodeId>,
    min_weight: f64,
    max_weight: f64,
    edge_count: usize,
    selected: Option<NodeId>,
    drag_box: Option<DragBox>,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index_by_image: HashMap::new(),
            min_weight: f64::INFINITY,
            max_weight: 0.0,
            edge_count: 0,
            selected: None,
            drag_box: None,
        }
    }
}

impl Graph {
    pub(super) fn push_node(&mut self, image_index: usize, display_name: String, x: f64, y: f64) {
        let id = self.nodes.len();
        self.nodes.push(Node {
            image_index,
            display_name,
            x,
            y,
            neighbors: Vec::new(),
            weights: Vec::new(),
        });
        self.index_by_image.insert(image_index, id);
    }

    /// Records an undirected edge as two directed adjacency entries.
    pub(super) fn push_edge(
        &mut self,
        line: usize,
        from_image: usize,
        to_image: usize,
        weight: f64,
    ) -> Result<(), ParseError> {
        let resolve = |image_index: usize| {
            self.index_by_image
                .get(&image_index)
                .copied()
                .ok_or(ParseError::UnknownNode { line, image_index })
        };
        let from = resolve(from_image)?;
        let to = resolve(to_image)?;

        self.nodes[from].add_neighbor(to, weight);
        self.nodes[to].add_neighbor(from, weight);
        self.edge_count += 1;

        if weight < self.min_weight {
            self.min_weight = weight;
        }
        if weight > self.max_weight {
            self.max_weight = weight;
        }
        Ok(())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// `None` until an edge has been read; the raw statistics start at
    /// `+inf` and `0.0`.
    pub fn weight_range(&self) -> Option<(f64, f64)> {
        (self.edge_count > 0).then_some((self.min_weight, self.max_weight))
    }

    /// No neighbors at all, or a single neighbor that itself has only one.
    pub fn is_orphaned(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return true;
        };
        match node.neighbors.as_slice() {
            [] => true,
            [only] => self.nodes.get(*only).is_some_and(|other| other.degree() == 1),
            _ => false,
        }
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).filter(|&id| !self.is_orphaned(id))
    }

    pub fn orphan_report(&self) -> OrphanReport {
        let mut report = OrphanReport::default();
        for (id, node) in self.nodes.iter().enumerate() {
            match node.neighbors.as_slice() {
                [] => report.isolated.push(id),
                [only] if id < *only && self.is_orphaned(id) => report.pairs.push((id, *only)),
                _ => {}
            }
        }
        report
    }

    /// Bounding box of every node, orphaned or not.
    pub fn extent_bounds(&self) -> Option<Bounds> {
        let first = self.nodes.first()?;
        let seed = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.nodes.iter().fold(seed, |bounds, node| Bounds {
            min_x: bounds.min_x.min(node.x),
            min_y: bounds.min_y.min(node.y),
            max_x: bounds.max_x.max(node.x),
            max_y: bounds.max_y.max(node.y),
        }))
    }

    pub fn find_nearest_visible(
        &self,
        point: (f64, f64),
        view: &ViewTransform,
        viewport: Viewport,
    ) -> Option<NodeId> {
        // Projected positions snap to whole pixels toward zero, as drawn. A
        // non-finite distance never beats the seed.
        let mut closest: Option<NodeId> = None;
        let mut closest_distance = f64::MAX;
        for id in self.visible_nodes() {
            let node = &self.nodes[id];
            let (sx, sy) = view.to_screen((node.x, node.y), viewport);
            let distance = (sx.trunc() - point.0).hypot(sy.trunc() - point.1);
            if distance < closest_distance {
                closest_distance = distance;
                closest = Some(id);
            }
        }

        closest.filter(|_| closest_distance < PICK_DISTANCE)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Returns true when the selection changed.
    pub fn set_selection(&mut self, selected: Option<NodeId>) -> bool {
        let selected = selected.filter(|&id| id < self.nodes.len());
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }

    pub fn selected_display_name(&self) -> Option<&str> {
        self.selected
            .and_then(|id| self.nodes.get(id))
            .map(|node| node.display_name.as_str())
    }

    pub fn selected_image_handle(&self) -> Option<ImageHandle> {
        let node = self.selected?;
        Some(ImageHandle {
            node,
            display_name: self.nodes.get(node)?.display_name.clone(),
        })
    }

    pub fn drag_box(&self) -> Option<DragBox> {
        self.drag_box
    }

    pub fn set_drag_box(&mut self, drag_box: Option<DragBox>) {
        self.drag_box = drag_box;
    }

    /// Drawn circle diameter in pixels, `None` for orphaned nodes, which are
    /// never drawn.
    pub fn node_diameter(&self, id: NodeId) -> Option<f64> {
        if self.is_orphaned(id) {
            return None;
        }
        self.nodes.get(id).map(|node| render_radius(node.degree()))
    }

    pub fn report(&self) -> GraphReport {
        let weight_range = self.weight_range();
        GraphReport {
            node_count: self.nodes.len(),
            edge_count: self.edge_count,
            neighbor_entries: self.nodes.iter().map(Node::degree).sum(),
            visible_node_count: self.visible_nodes().count(),
            min_weight: weight_range.map(|(min, _)| min),
            max_weight: weight_range.map(|(_, max)| max),
            extent: self.extent_bounds(),
            orphans: self.orphan_report(),
        }
    }
}
