//! Digraph Core Library
//!
//! This library provides a minimal directed graph data type with dense
//! vertex descriptors, a trait describing the operations generic graph code
//! may rely on, and a `petgraph`-backed implementation of that trait used as
//! a reference for comparison.

pub mod adt;
pub mod error;
pub mod graph;
pub mod reference;

// Re-export commonly used types
pub use adt::Digraph;
pub use error::{GraphError, GraphResult};
pub use graph::{DirectedGraph, EdgeId, VertexId};
pub use reference::PetgraphDigraph;
