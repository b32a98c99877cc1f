//! Directed graph data structure
//!
//! `DirectedGraph` keeps three views of the same state in lockstep: the
//! insertion-ordered vertex sequence, one out-neighbour set per vertex, and
//! the global set of edges ordered by (source, target). Vertices and edges
//! are never removed, so descriptors stay valid for the life of the graph.

use std::collections::{btree_set, BTreeSet};
use std::fmt;
use std::iter::Copied;
use std::slice;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Dense, zero-based vertex descriptor assigned in creation order.
pub type VertexId = usize;

/// An edge, identified by its ordered pair of endpoints.
///
/// The derived ordering is lexicographic on (source, target), which is the
/// order the global edge set enumerates in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgeId {
    pub source: VertexId,
    pub target: VertexId,
}

impl EdgeId {
    pub fn new(source: VertexId, target: VertexId) -> Self {
        Self { source, target }
    }
}

impl From<(VertexId, VertexId)> for EdgeId {
    fn from((source, target): (VertexId, VertexId)) -> Self {
        Self::new(source, target)
    }
}

impl From<EdgeId> for (VertexId, VertexId) {
    fn from(edge: EdgeId) -> Self {
        (edge.source, edge.target)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.source, self.target)
    }
}

/// Iterator over vertex descriptors in insertion order.
pub type Vertices<'a> = Copied<slice::Iter<'a, VertexId>>;

/// Iterator over edges in (source, target) order.
pub type Edges<'a> = Copied<btree_set::Iter<'a, EdgeId>>;

/// Iterator over the out-neighbours of one vertex in ascending order.
pub type AdjacentVertices<'a> = Copied<btree_set::Iter<'a, VertexId>>;

/// A simple directed graph: no parallel edges, self-loops allowed.
///
/// Cloning produces an independent graph with no shared storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectedGraph {
    /// Out-neighbour set per vertex, indexed by descriptor
    adjacency: Vec<BTreeSet<VertexId>>,
    /// Vertex descriptors in insertion order
    vertices: Vec<VertexId>,
    /// Every edge, ordered by source then target
    edges: BTreeSet<EdgeId>,
}

impl DirectedGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from its three containers, checking they agree.
    ///
    /// # Errors
    /// - [`GraphError::AdjacencyMismatch`] if there is not one adjacency set per vertex
    /// - [`GraphError::VertexOutOfOrder`] if `vertices` is not `0..n`
    /// - [`GraphError::UnknownVertex`] if any endpoint is `>= n`
    /// - [`GraphError::EdgeMismatch`] if the edge set and adjacency relation differ
    pub fn from_parts(
        adjacency: Vec<BTreeSet<VertexId>>,
        vertices: Vec<VertexId>,
        edges: BTreeSet<EdgeId>,
    ) -> GraphResult<Self> {
        if adjacency.len() != vertices.len() {
            return Err(GraphError::AdjacencyMismatch {
                adjacency: adjacency.len(),
                vertices: vertices.len(),
            });
        }

        if let Some((index, &found)) = vertices.iter().enumerate().find(|&(i, &v)| i != v) {
            return Err(GraphError::VertexOutOfOrder { index, found });
        }

        let count = vertices.len();
        for (source, targets) in adjacency.iter().enumerate() {
            for &target in targets {
                if target >= count {
                    return Err(GraphError::UnknownVertex(target));
                }
                if !edges.contains(&EdgeId::new(source, target)) {
                    return Err(GraphError::EdgeMismatch(EdgeId::new(source, target)));
                }
            }
        }

        for &edge in &edges {
            if edge.source >= count {
                return Err(GraphError::UnknownVertex(edge.source));
            }
            if edge.target >= count {
                return Err(GraphError::UnknownVertex(edge.target));
            }
            if !adjacency[edge.source].contains(&edge.target) {
                return Err(GraphError::EdgeMismatch(edge));
            }
        }

        Ok(Self {
            adjacency,
            vertices,
            edges,
        })
    }

    /// True when there is exactly one adjacency set per vertex.
    pub fn is_valid(&self) -> bool {
        self.adjacency.len() == self.vertices.len()
    }

    /// Append a new vertex and return its descriptor.
    ///
    /// The descriptor equals the vertex count before insertion.
    pub fn add_vertex(&mut self) -> VertexId {
        let vertex = self.adjacency.len();
        self.vertices.push(vertex);
        self.adjacency.push(BTreeSet::new());
        debug_assert!(self.is_valid());
        vertex
    }

    /// Descriptor at position `index` in the vertex sequence.
    ///
    /// Out-of-range positions are passed through unchanged rather than
    /// reported, so `vertex(k) == k` for every `k`.
    pub fn vertex(&self, index: usize) -> VertexId {
        self.vertices.get(index).copied().unwrap_or(index)
    }

    /// Insert the edge `(source, target)`.
    ///
    /// Missing endpoints are created first: the vertex set grows until both
    /// descriptors are valid. Returns the edge and `true` if it was newly
    /// inserted, or `false` if the pair was already present.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> (EdgeId, bool) {
        let needed = source.max(target).saturating_add(1);
        if self.vertices.len() < needed {
            debug!(
                "auto-extending graph from {} to {} vertices for edge ({}, {})",
                self.vertices.len(),
                needed,
                source,
                target
            );
        }
        while self.vertices.len() <= source {
            self.add_vertex();
        }
        while self.vertices.len() <= target {
            self.add_vertex();
        }

        let edge = EdgeId::new(source, target);
        let inserted = self.adjacency[source].insert(target);
        if inserted {
            self.edges.insert(edge);
        } else {
            trace!("edge {} already present", edge);
        }
        debug_assert!(self.is_valid());
        (edge, inserted)
    }

    /// Get the number of vertices in the graph
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges in the graph
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over vertex descriptors in insertion order
    pub fn vertices(&self) -> Vertices<'_> {
        self.vertices.iter().copied()
    }

    /// Iterate over all edges ordered by source, then target
    pub fn edges(&self) -> Edges<'_> {
        self.edges.iter().copied()
    }

    /// Iterate over the out-neighbours of `vertex` in ascending order.
    ///
    /// # Panics
    /// Panics if `vertex` is not a vertex of this graph.
    pub fn adjacent_vertices(&self, vertex: VertexId) -> AdjacentVertices<'_> {
        self.adjacency[vertex].iter().copied()
    }

    /// Look up the edge `(source, target)`.
    ///
    /// Always returns the edge descriptor; the flag reports whether the edge
    /// exists. Unknown endpoints simply yield `false`.
    pub fn edge(&self, source: VertexId, target: VertexId) -> (EdgeId, bool) {
        let edge = EdgeId::new(source, target);
        let found = self
            .adjacency
            .get(source)
            .is_some_and(|targets| targets.contains(&target));
        (edge, found)
    }

    /// Source vertex of an edge
    pub fn source(&self, edge: EdgeId) -> VertexId {
        edge.source
    }

    /// Target vertex of an edge
    pub fn target(&self, edge: EdgeId) -> VertexId {
        edge.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_is_empty() {
        let graph = DirectedGraph::new();

        assert_eq!(graph.num_vertices(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert!(graph.is_valid());
        assert_eq!(graph, DirectedGraph::default());
    }

    #[test]
    fn test_add_vertex_assigns_dense_descriptors() {
        let mut graph = DirectedGraph::new();

        assert_eq!(graph.add_vertex(), 0);
        assert_eq!(graph.add_vertex(), 1);
        assert_eq!(graph.add_vertex(), 2);
        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_vertex_passes_through_out_of_range() {
        let mut graph = DirectedGraph::new();
        graph.add_vertex();
        graph.add_vertex();

        assert_eq!(graph.vertex(1), 1);
        assert_eq!(graph.vertex(2), 2);
        assert_eq!(graph.vertex(500), 500);
        assert_eq!(graph.num_vertices(), 2);
    }

    #[test]
    fn test_add_edge_stores_target_under_source() {
        let mut graph = DirectedGraph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();

        let (edge, inserted) = graph.add_edge(a, b);

        assert!(inserted);
        assert_eq!(edge, EdgeId::new(a, b));
        assert_eq!(graph.adjacent_vertices(a).collect::<Vec<_>>(), vec![b]);
        assert_eq!(graph.adjacent_vertices(b).count(), 0);
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let mut graph = DirectedGraph::new();

        assert_eq!(graph.add_edge(0, 1), (EdgeId::new(0, 1), true));
        assert_eq!(graph.add_edge(0, 1), (EdgeId::new(0, 1), false));
        assert_eq!(graph.add_edge(0, 1), (EdgeId::new(0, 1), false));
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_add_edge_auto_extends_source_and_target() {
        let mut graph = DirectedGraph::new();

        graph.add_edge(3, 1);
        assert_eq!(graph.num_vertices(), 4);

        graph.add_edge(0, 6);
        assert_eq!(graph.num_vertices(), 7);
        assert_eq!(graph.vertices().collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
        assert!(graph.is_valid());
    }

    #[test]
    fn test_edge_lookup() {
        let mut graph = DirectedGraph::new();
        graph.add_edge(0, 1);

        assert_eq!(graph.edge(0, 1), (EdgeId::new(0, 1), true));
        assert_eq!(graph.edge(1, 0), (EdgeId::new(1, 0), false));
        assert_eq!(graph.edge(9, 9), (EdgeId::new(9, 9), false));
    }

    #[test]
    fn test_source_and_target_projections() {
        let graph = DirectedGraph::new();
        let edge = EdgeId::new(4, 2);

        assert_eq!(graph.source(edge), 4);
        assert_eq!(graph.target(edge), 2);
    }

    #[test]
    #[should_panic]
    fn test_adjacent_vertices_of_missing_vertex_panics() {
        let graph = DirectedGraph::new();
        let _ = graph.adjacent_vertices(0);
    }

    #[test]
    fn test_from_parts_accepts_consistent_containers() {
        let adjacency = vec![BTreeSet::from([1, 2]), BTreeSet::new(), BTreeSet::from([2])];
        let edges = BTreeSet::from([EdgeId::new(0, 1), EdgeId::new(0, 2), EdgeId::new(2, 2)]);

        let graph = DirectedGraph::from_parts(adjacency, vec![0, 1, 2], edges).unwrap();

        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 3);
        assert!(graph.edge(2, 2).1);
    }

    #[test]
    fn test_from_parts_empty() {
        let graph = DirectedGraph::from_parts(Vec::new(), Vec::new(), BTreeSet::new()).unwrap();
        assert_eq!(graph, DirectedGraph::new());
    }

    #[test]
    fn test_from_parts_rejects_adjacency_mismatch() {
        let result = DirectedGraph::from_parts(vec![BTreeSet::new()], vec![0, 1], BTreeSet::new());

        assert_eq!(
            result,
            Err(GraphError::AdjacencyMismatch {
                adjacency: 1,
                vertices: 2
            })
        );
    }

    #[test]
    fn test_from_parts_rejects_out_of_order_vertices() {
        let result = DirectedGraph::from_parts(
            vec![BTreeSet::new(), BTreeSet::new()],
            vec![1, 0],
            BTreeSet::new(),
        );

        assert_eq!(result, Err(GraphError::VertexOutOfOrder { index: 0, found: 1 }));
    }

    #[test]
    fn test_from_parts_rejects_unknown_vertex() {
        let result = DirectedGraph::from_parts(
            vec![BTreeSet::from([5])],
            vec![0],
            BTreeSet::from([EdgeId::new(0, 5)]),
        );

        assert_eq!(result, Err(GraphError::UnknownVertex(5)));
    }

    #[test]
    fn test_from_parts_rejects_edge_missing_from_adjacency() {
        let result = DirectedGraph::from_parts(
            vec![BTreeSet::new(), BTreeSet::new()],
            vec![0, 1],
            BTreeSet::from([EdgeId::new(1, 0)]),
        );

        assert_eq!(result, Err(GraphError::EdgeMismatch(EdgeId::new(1, 0))));
    }

    #[test]
    fn test_from_parts_rejects_adjacency_missing_from_edges() {
        let result = DirectedGraph::from_parts(
            vec![BTreeSet::from([1]), BTreeSet::new()],
            vec![0, 1],
            BTreeSet::new(),
        );

        assert_eq!(result, Err(GraphError::EdgeMismatch(EdgeId::new(0, 1))));
    }

    #[test]
    fn test_edge_id_ordering_and_display() {
        let mut edges = vec![EdgeId::new(1, 0), EdgeId::new(0, 2), EdgeId::new(0, 1)];
        edges.sort();

        assert_eq!(edges, vec![EdgeId::new(0, 1), EdgeId::new(0, 2), EdgeId::new(1, 0)]);
        assert_eq!(EdgeId::new(3, 4).to_string(), "(3, 4)");
        assert_eq!(<(usize, usize)>::from(EdgeId::from((3, 4))), (3, 4));
    }

    #[test]
    fn test_edge_id_serialization() {
        let edge = EdgeId::new(0, 7);

        let serialized = serde_json::to_string(&edge).unwrap();
        assert_eq!(serialized, r#"{"source":0,"target":7}"#);

        let deserialized: EdgeId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(edge, deserialized);
    }
}
