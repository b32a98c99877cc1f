//! Error types for graph construction from raw parts.
//!
//! The graph operations themselves never fail; these errors only surface
//! when a graph is assembled from externally supplied containers.

use thiserror::Error;

use crate::graph::{EdgeId, VertexId};

/// Errors raised while validating the containers behind a [`crate::DirectedGraph`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The adjacency table does not hold exactly one set per vertex.
    #[error("adjacency table has {adjacency} sets but there are {vertices} vertices")]
    AdjacencyMismatch { adjacency: usize, vertices: usize },

    /// A vertex sequence entry is not equal to its insertion index.
    #[error("vertex at position {index} has descriptor {found}")]
    VertexOutOfOrder { index: usize, found: VertexId },

    /// An adjacency set or edge refers to a vertex that does not exist.
    #[error("descriptor {0} does not refer to an existing vertex")]
    UnknownVertex(VertexId),

    /// The edge set and the adjacency relation disagree on this edge.
    #[error("edge {0} is not present in both the edge set and the adjacency table")]
    EdgeMismatch(EdgeId),
}

/// Convenience result type for graph construction.
pub type GraphResult<T> = Result<T, GraphError>;
