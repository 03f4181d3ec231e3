//! Adjacency-store errors.

use super::error_code::{self, PcErrorCode};

/// Malformed graph operations. These indicate programming errors, not data problems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("invalid edge {{{i}, {j}}}: not present in the graph")]
    InvalidEdge { i: usize, j: usize },

    #[error("vertex {vertex} out of range for a graph of {n} vertices")]
    VertexOutOfRange { vertex: usize, n: usize },

    #[error("self loop on vertex {vertex}")]
    SelfLoop { vertex: usize },

    #[error("graph has {actual} vertices, expected {expected}")]
    VertexCountMismatch { expected: usize, actual: usize },
}

impl PcErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEdge { .. } => error_code::INVALID_EDGE,
            _ => error_code::GRAPH_ERROR,
        }
    }
}
