//! Edge-list input
//!
//! The CLI reads graphs from a plain text edge list: one `source target`
//! pair per line, or a single descriptor to declare a vertex. Blank lines
//! and `#` comments are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context};
use digraph_core::{Digraph, VertexId};

/// One meaningful line of an edge list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Declares that the vertex exists
    Vertex(VertexId),
    /// A directed edge `(source, target)`
    Edge(VertexId, VertexId),
}

/// Parse an edge list from any buffered reader.
///
/// # Errors
/// Returns an error naming the 1-based line number for any line that is not
/// one or two non-negative integers, or if reading fails.
pub fn parse_edge_list<R: BufRead>(reader: R) -> anyhow::Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", number))?;

        let content = match line.split_once('#') {
            Some((before, _)) => before,
            None => line.as_str(),
        };

        let fields: Vec<&str> = content.split_whitespace().collect();
        let entry = match fields.as_slice() {
            [] => continue,
            [vertex] => Entry::Vertex(parse_vertex(vertex, number)?),
            [source, target] => Entry::Edge(parse_vertex(source, number)?, parse_vertex(target, number)?),
            _ => bail!(
                "Line {}: expected `source target` or a single vertex, found {} fields",
                number,
                fields.len()
            ),
        };
        entries.push(entry);
    }

    Ok(entries)
}

/// Read an edge list from `path`, or from stdin when `path` is `-`.
pub fn read_edge_list(path: &Path) -> anyhow::Result<Vec<Entry>> {
    if path == Path::new("-") {
        return parse_edge_list(io::stdin().lock());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open edge list: {}", path.display()))?;
    parse_edge_list(BufReader::new(file))
        .with_context(|| format!("Failed to parse edge list: {}", path.display()))
}

/// Build a graph from parsed entries.
///
/// A vertex declaration grows the graph until the descriptor exists, the
/// same way an edge endpoint would.
pub fn build_graph<G: Digraph>(entries: &[Entry]) -> G {
    let mut graph = G::default();
    for entry in entries {
        match *entry {
            Entry::Vertex(vertex) => {
                while graph.num_vertices() <= vertex {
                    graph.add_vertex();
                }
            }
            Entry::Edge(source, target) => {
                graph.add_edge(source, target);
            }
        }
    }
    log::debug!(
        "built graph with {} vertices and {} edges from {} entries",
        graph.num_vertices(),
        graph.num_edges(),
        entries.len()
    );
    graph
}

fn parse_vertex(field: &str, line: usize) -> anyhow::Result<VertexId> {
    field
        .parse::<VertexId>()
        .with_context(|| format!("Line {}: invalid vertex descriptor `{}`", line, field))
}
