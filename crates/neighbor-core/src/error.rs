use crate::VertexIndex;
use thiserror::Error;

/// Errors raised while turning a neighbor graph into a tree.
///
/// Both variants are precondition violations: the builder checks the whole
/// graph before inserting anything, so a failed build never yields a
/// half-populated tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("graph has no vertices")]
    EmptyGraph,
    #[error("malformed graph: {0}")]
    MalformedGraph(MalformedGraph),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedGraph {
    #[error("expected {expected} titles, got {actual}")]
    TitleCount { expected: usize, actual: usize },
    #[error("expected {expected} successor lists, got {actual}")]
    SuccessorCount { expected: usize, actual: usize },
    #[error("vertex {from} has successor {to} outside 0..{vertex_count}")]
    VertexOutOfRange {
        from: VertexIndex,
        to: VertexIndex,
        vertex_count: usize,
    },
}

impl From<MalformedGraph> for TreeError {
    fn from(value: MalformedGraph) -> Self {
        TreeError::MalformedGraph(value)
    }
}
