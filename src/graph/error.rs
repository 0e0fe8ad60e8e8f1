use thiserror::Error;

use crate::source::ReadError;

/// Reasons a graph could not be built. Any of these aborts construction.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {location}")]
    IoFailure {
        location: String,
        #[source]
        source: ReadError,
    },
    #[error("malformed node declaration on line {line}: {reason}")]
    MalformedNode { line: usize, reason: String },
    #[error("malformed edge declaration on line {line}: {reason}")]
    MalformedEdge { line: usize, reason: String },
    #[error("edge on line {line} references undeclared image{image_index}")]
    UnknownNode { line: usize, image_index: usize },
}
