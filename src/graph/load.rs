use tracing::debug;

use crate::source::Location;

use super::error::ParseError;
use super::model::Graph;
use super::parse::parse_graph;

fn read_text(location: &Location) -> Result<String, ParseError> {
    debug!(%location, "reading input");
    location
        .read_text()
        .map_err(|source| ParseError::IoFailure {
            location: location.to_string(),
            source,
        })
}

/// Reads the image list, whose line order defines image indices, then the graph text.
pub fn load_graph(graph: &Location, list: &Location) -> Result<Graph, ParseError> {
    let image_names = read_text(list)?
        .lines()
        .map(str::to_owned)
        .collect::<Vec<_>>();
    let text = read_text(graph)?;
    parse_graph(&image_names, &text)
}
