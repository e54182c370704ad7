//! Local dependency graph export
//!
//! Renders the file-to-file edges of a dependency map as a Graphviz DOT
//! document. Edges inside an import cycle are drawn in red.

use crate::error::{ReqwalkerError, Result};
use crate::models::DependencyMap;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Build a directed graph with one node per file and one edge per distinct import.
///
/// Files without local edges are left out.
pub fn build_graph(dependencies: &DependencyMap) -> DiGraph<String, ()> {
    let mut graph = DiGraph::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

    for (source, targets) in dependencies {
        for target in targets {
            let from = *nodes
                .entry(source.as_str())
                .or_insert_with(|| graph.add_node(source.clone()));
            let to = *nodes
                .entry(target.as_str())
                .or_insert_with(|| graph.add_node(target.clone()));
            graph.update_edge(from, to, ());
        }
    }

    graph
}

/// Edges whose endpoints sit on a common cycle, self-imports included
fn cyclic_edges(graph: &DiGraph<String, ()>) -> HashSet<(NodeIndex, NodeIndex)> {
    let mut component_of = HashMap::new();
    for (i, component) in tarjan_scc(graph).into_iter().enumerate() {
        if component.len() > 1 {
            for node in component {
                component_of.insert(node, i);
            }
        }
    }

    graph
        .edge_references()
        .filter(|e| {
            e.source() == e.target()
                || matches!(
                    (component_of.get(&e.source()), component_of.get(&e.target())),
                    (Some(a), Some(b)) if a == b
                )
        })
        .map(|e| (e.source(), e.target()))
        .collect()
}

/// DOT rendering of the local dependency graph
pub fn to_dot(dependencies: &DependencyMap) -> String {
    let graph = build_graph(dependencies);
    let cycles = cyclic_edges(&graph);

    let mut dot = String::from("digraph dependencies {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box, style=filled, fillcolor=lightblue];\n\n");

    for index in graph.node_indices() {
        dot.push_str(&format!("  \"{}\";\n", escape(&graph[index])));
    }

    if graph.edge_count() > 0 {
        dot.push('\n');
    }

    for edge in graph.edge_references() {
        let attrs = if cycles.contains(&(edge.source(), edge.target())) {
            " [color=red, style=bold]"
        } else {
            ""
        };
        dot.push_str(&format!(
            "  \"{}\" -> \"{}\"{};\n",
            escape(&graph[edge.source()]),
            escape(&graph[edge.target()]),
            attrs
        ));
    }

    dot.push_str("}\n");
    dot
}

/// Write the DOT rendering to `path`
pub fn write_graph(path: &Path, dependencies: &DependencyMap) -> Result<()> {
    fs::write(path, to_dot(dependencies)).map_err(|e| ReqwalkerError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
