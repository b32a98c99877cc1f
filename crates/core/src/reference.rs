//! Reference backend built on `petgraph`
//!
//! `PetgraphDigraph` wraps a `petgraph::Graph` and shapes it into the same
//! contract as [`DirectedGraph`](crate::DirectedGraph): a set-based adjacency
//! list with dense indices. It exists so the hand-built structure can be
//! checked query-for-query against an established graph library.

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::adt::Digraph;
use crate::graph::{EdgeId, VertexId};

/// A `Digraph` backed by `petgraph::Graph<(), ()>`.
///
/// Parallel edges are suppressed on insertion, and enumeration results are
/// sorted so ordering matches a set-based adjacency list.
#[derive(Debug, Clone, Default)]
pub struct PetgraphDigraph {
    /// The underlying petgraph graph (private to enforce encapsulation)
    inner: Graph<(), ()>,
}

impl PetgraphDigraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the wrapped petgraph graph
    pub fn as_petgraph(&self) -> &Graph<(), ()> {
        &self.inner
    }
}

impl Digraph for PetgraphDigraph {
    type Vertices<'a> = std::ops::Range<VertexId>;
    type Edges<'a> = std::vec::IntoIter<EdgeId>;
    type AdjacentVertices<'a> = std::vec::IntoIter<VertexId>;

    fn add_vertex(&mut self) -> VertexId {
        self.inner.add_node(()).index()
    }

    fn add_edge(&mut self, source: VertexId, target: VertexId) -> (EdgeId, bool) {
        while self.inner.node_count() <= source.max(target) {
            self.inner.add_node(());
        }

        let edge = EdgeId::new(source, target);
        let (from, to) = (NodeIndex::new(source), NodeIndex::new(target));
        if self.inner.find_edge(from, to).is_some() {
            return (edge, false);
        }
        self.inner.add_edge(from, to, ());
        (edge, true)
    }

    /// Node indices are dense, so every position is its own descriptor.
    fn vertex(&self, index: usize) -> VertexId {
        index
    }

    fn vertices(&self) -> Self::Vertices<'_> {
        0..self.inner.node_count()
    }

    fn edges(&self) -> Self::Edges<'_> {
        let mut edges: Vec<EdgeId> = self
            .inner
            .edge_references()
            .map(|e| EdgeId::new(e.source().index(), e.target().index()))
            .collect();
        edges.sort_unstable();
        edges.into_iter()
    }

    fn adjacent_vertices(&self, vertex: VertexId) -> Self::AdjacentVertices<'_> {
        let mut targets: Vec<VertexId> = self
            .inner
            .neighbors_directed(NodeIndex::new(vertex), Direction::Outgoing)
            .map(|n| n.index())
            .collect();
        targets.sort_unstable();
        targets.into_iter()
    }

    fn edge(&self, source: VertexId, target: VertexId) -> (EdgeId, bool) {
        let edge = EdgeId::new(source, target);
        let found = source < self.inner.node_count()
            && target < self.inner.node_count()
            && self
                .inner
                .find_edge(NodeIndex::new(source), NodeIndex::new(target))
                .is_some();
        (edge, found)
    }

    fn num_vertices(&self) -> usize {
        self.inner.node_count()
    }

    fn num_edges(&self) -> usize {
        self.inner.edge_count()
    }
}
