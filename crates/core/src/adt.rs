//! The operation set generic graph code may depend on.
//!
//! Algorithms written against [`Digraph`] (traversals, orderings, comparisons
//! between backends) only ever see descriptors and iterators; they never
//! reach into a backend's storage. Both [`DirectedGraph`] and
//! [`PetgraphDigraph`](crate::reference::PetgraphDigraph) implement it.

use crate::graph::{self, DirectedGraph, EdgeId, VertexId};

/// A growable simple directed graph addressed by dense vertex descriptors.
///
/// Implementations must uphold:
/// - `add_vertex` returns `0, 1, 2, ...` in creation order
/// - `add_edge` creates missing endpoints and never stores a pair twice
/// - `edges` yields edges ordered by (source, target)
/// - `adjacent_vertices` yields out-neighbours in ascending order
///
/// `Clone` must produce an independent graph.
pub trait Digraph: Default + Clone {
    /// Iterator over all vertices in insertion order.
    type Vertices<'a>: Iterator<Item = VertexId>
    where
        Self: 'a;

    /// Iterator over all edges in (source, target) order.
    type Edges<'a>: Iterator<Item = EdgeId>
    where
        Self: 'a;

    /// Iterator over the out-neighbours of a vertex.
    type AdjacentVertices<'a>: Iterator<Item = VertexId>
    where
        Self: 'a;

    /// Appends a vertex and returns its descriptor.
    fn add_vertex(&mut self) -> VertexId;

    /// Inserts the edge `(source, target)`, growing the vertex set as needed.
    ///
    /// The flag is `true` only if the edge was not already present.
    fn add_edge(&mut self, source: VertexId, target: VertexId) -> (EdgeId, bool);

    /// Descriptor at position `index`, or `index` itself when out of range.
    fn vertex(&self, index: usize) -> VertexId;

    /// Returns an iterator over all vertices.
    fn vertices(&self) -> Self::Vertices<'_>;

    /// Returns an iterator over all edges.
    fn edges(&self) -> Self::Edges<'_>;

    /// Returns an iterator over the out-neighbours of `vertex`.
    ///
    /// `vertex` must exist in the graph.
    fn adjacent_vertices(&self, vertex: VertexId) -> Self::AdjacentVertices<'_>;

    /// Looks up `(source, target)`; the flag reports whether it exists.
    fn edge(&self, source: VertexId, target: VertexId) -> (EdgeId, bool);

    /// Returns the number of vertices.
    fn num_vertices(&self) -> usize;

    /// Returns the number of edges.
    fn num_edges(&self) -> usize;

    /// Source vertex of an edge.
    fn source(&self, edge: EdgeId) -> VertexId {
        edge.source
    }

    /// Target vertex of an edge.
    fn target(&self, edge: EdgeId) -> VertexId {
        edge.target
    }
}

impl Digraph for DirectedGraph {
    type Vertices<'a> = graph::Vertices<'a>;
    type Edges<'a> = graph::Edges<'a>;
    type AdjacentVertices<'a> = graph::AdjacentVertices<'a>;

    fn add_vertex(&mut self) -> VertexId {
        DirectedGraph::add_vertex(self)
    }

    fn add_edge(&mut self, source: VertexId, target: VertexId) -> (EdgeId, bool) {
        DirectedGraph::add_edge(self, source, target)
    }

    fn vertex(&self, index: usize) -> VertexId {
        DirectedGraph::vertex(self, index)
    }

    fn vertices(&self) -> Self::Vertices<'_> {
        DirectedGraph::vertices(self)
    }

    fn edges(&self) -> Self::Edges<'_> {
        DirectedGraph::edges(self)
    }

    fn adjacent_vertices(&self, vertex: VertexId) -> Self::AdjacentVertices<'_> {
        DirectedGraph::adjacent_vertices(self, vertex)
    }

    fn edge(&self, source: VertexId, target: VertexId) -> (EdgeId, bool) {
        DirectedGraph::edge(self, source, target)
    }

    fn num_vertices(&self) -> usize {
        DirectedGraph::num_vertices(self)
    }

    fn num_edges(&self) -> usize {
        DirectedGraph::num_edges(self)
    }
}

/// Build a graph of any backend from a sequence of edges.
pub fn from_edges<G, I>(edges: I) -> G
where
    G: Digraph,
    I: IntoIterator<Item = (VertexId, VertexId)>,
{
    let mut graph = G::default();
    for (source, target) in edges {
        graph.add_edge(source, target);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts edges through the trait only, the way a generic algorithm would.
    fn out_degree_sum<G: Digraph>(graph: &G) -> usize {
        graph
            .vertices()
            .map(|v| graph.adjacent_vertices(v).count())
            .sum()
    }

    #[test]
    fn test_trait_dispatch_matches_inherent() {
        let mut graph = DirectedGraph::new();
        let a = Digraph::add_vertex(&mut graph);
        let (edge, inserted) = Digraph::add_edge(&mut graph, a, 2);

        assert!(inserted);
        assert_eq!(Digraph::num_vertices(&graph), 3);
        assert_eq!(Digraph::source(&graph, edge), 0);
        assert_eq!(Digraph::target(&graph, edge), 2);
        assert_eq!(out_degree_sum(&graph), Digraph::num_edges(&graph));
    }

    #[test]
    fn test_from_edges() {
        let graph: DirectedGraph = from_edges([(0, 1), (1, 2), (0, 1)]);

        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(out_degree_sum(&graph), 2);
    }
}
