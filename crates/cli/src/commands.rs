//! CLI command implementations.
//!
//! Every command writes to the supplied writer so output can be captured in
//! tests; `main` passes stdout.

use std::io::Write;

use anyhow::{bail, Context};
use digraph_core::{Digraph, DirectedGraph, EdgeId, PetgraphDigraph, VertexId};
use serde::Serialize;

use crate::input::{build_graph, Entry};

#[derive(Debug, Serialize)]
struct Stats {
    vertices: usize,
    edges: usize,
}

#[derive(Debug, Serialize)]
struct Adjacency {
    vertex: VertexId,
    adjacent: Vec<VertexId>,
}

#[derive(Debug, Serialize)]
struct EdgeLookup {
    edge: EdgeId,
    exists: bool,
}

#[derive(Debug, Serialize)]
struct Comparison {
    agree: bool,
    mismatches: Vec<String>,
}

/// Print vertex and edge counts.
pub fn cmd_stats<W: Write>(out: &mut W, entries: &[Entry], json: bool) -> anyhow::Result<()> {
    let graph: DirectedGraph = build_graph(entries);
    let stats = Stats {
        vertices: graph.num_vertices(),
        edges: graph.num_edges(),
    };

    if json {
        write_json(out, &stats)
    } else {
        writeln!(out, "Vertices: {}", stats.vertices)?;
        writeln!(out, "Edges: {}", stats.edges)?;
        Ok(())
    }
}

/// Print every vertex in insertion order.
pub fn cmd_vertices<W: Write>(out: &mut W, entries: &[Entry], json: bool) -> anyhow::Result<()> {
    let graph: DirectedGraph = build_graph(entries);
    let vertices: Vec<VertexId> = graph.vertices().collect();

    if json {
        write_json(out, &vertices)
    } else {
        for vertex in vertices {
            writeln!(out, "{}", vertex)?;
        }
        Ok(())
    }
}

/// Print every edge in (source, target) order.
pub fn cmd_edges<W: Write>(out: &mut W, entries: &[Entry], json: bool) -> anyhow::Result<()> {
    let graph: DirectedGraph = build_graph(entries);
    let edges: Vec<EdgeId> = graph.edges().collect();

    if json {
        write_json(out, &edges)
    } else {
        for edge in edges {
            writeln!(out, "{} -> {}", graph.source(edge), graph.target(edge))?;
        }
        Ok(())
    }
}

/// Print the out-neighbours of one vertex.
///
/// The graph treats a missing vertex as a caller error, so it is checked
/// here and reported instead of reaching the lookup.
pub fn cmd_adjacent<W: Write>(
    out: &mut W,
    entries: &[Entry],
    vertex: VertexId,
    json: bool,
) -> anyhow::Result<()> {
    let graph: DirectedGraph = build_graph(entries);
    if vertex >= graph.num_vertices() {
        bail!(
            "Vertex {} does not exist (graph has {} vertices)",
            vertex,
            graph.num_vertices()
        );
    }

    let adjacency = Adjacency {
        vertex,
        adjacent: graph.adjacent_vertices(vertex).collect(),
    };

    if json {
        write_json(out, &adjacency)
    } else {
        let listed: Vec<String> = adjacency.adjacent.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}: {}", adjacency.vertex, listed.join(" "))?;
        Ok(())
    }
}

/// Report whether the edge `(source, target)` exists.
pub fn cmd_edge<W: Write>(
    out: &mut W,
    entries: &[Entry],
    source: VertexId,
    target: VertexId,
    json: bool,
) -> anyhow::Result<()> {
    let graph: DirectedGraph = build_graph(entries);
    let (edge, exists) = graph.edge(source, target);
    let lookup = EdgeLookup { edge, exists };

    if json {
        write_json(out, &lookup)
    } else {
        let verdict = if lookup.exists { "exists" } else { "not found" };
        writeln!(out, "{} {}", lookup.edge, verdict)?;
        Ok(())
    }
}

/// Build both backends from the same entries and check every query agrees.
///
/// # Errors
/// Returns an error after printing the report if any query disagrees.
pub fn cmd_compare<W: Write>(out: &mut W, entries: &[Entry], json: bool) -> anyhow::Result<()> {
    let ours: DirectedGraph = build_graph(entries);
    let reference: PetgraphDigraph = build_graph(entries);

    let mismatches = compare_graphs(&ours, &reference);
    let comparison = Comparison {
        agree: mismatches.is_empty(),
        mismatches,
    };

    if json {
        write_json(out, &comparison)?;
    } else if comparison.agree {
        writeln!(
            out,
            "Backends agree on {} vertices and {} edges",
            ours.num_vertices(),
            ours.num_edges()
        )?;
    } else {
        for mismatch in &comparison.mismatches {
            writeln!(out, "Mismatch: {}", mismatch)?;
        }
    }

    if !comparison.agree {
        bail!("Backends disagree on {} queries", comparison.mismatches.len());
    }
    Ok(())
}

/// Compare two backends query by query, describing each difference.
pub fn compare_graphs<A: Digraph, B: Digraph>(a: &A, b: &B) -> Vec<String> {
    let mut mismatches = Vec::new();

    if a.num_vertices() != b.num_vertices() {
        mismatches.push(format!(
            "vertex count {} != {}",
            a.num_vertices(),
            b.num_vertices()
        ));
    }
    if a.num_edges() != b.num_edges() {
        mismatches.push(format!("edge count {} != {}", a.num_edges(), b.num_edges()));
    }
    if !a.vertices().eq(b.vertices()) {
        mismatches.push("vertex sequences differ".to_string());
    }
    if !a.edges().eq(b.edges()) {
        mismatches.push("edge sequences differ".to_string());
    }

    let shared = a.num_vertices().min(b.num_vertices());
    for vertex in 0..shared {
        if a.vertex(vertex) != b.vertex(vertex) {
            mismatches.push(format!("vertex({}) differs", vertex));
        }
        if !a.adjacent_vertices(vertex).eq(b.adjacent_vertices(vertex)) {
            mismatches.push(format!("out-neighbours of {} differ", vertex));
        }
    }

    for edge in a.edges() {
        if !b.edge(a.source(edge), a.target(edge)).1 {
            mismatches.push(format!("edge {} missing from second graph", edge));
        }
    }

    mismatches
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}
