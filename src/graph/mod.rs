mod error;
mod load;
mod model;
mod parse;
mod shading;
mod transform;

pub use load::load_graph;
pub use model::{DragBox, Graph, ImageHandle, NodeId};
pub use shading::EdgeShading;
pub use transform::{ScreenRect, ViewTransform, Viewport};
