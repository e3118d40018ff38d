//! Dependency cycle reporting using petgraph.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::manifest::Manifest;

/// Returns the groups of packages that depend on each other in a cycle.
///
/// Only edges between the given manifests count. Names inside a group are
/// sorted, and groups are sorted by their first name. A package that lists
/// itself as a dependency forms a group of one.
pub fn find_cycles(manifests: &[Manifest]) -> Vec<Vec<String>> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    for manifest in manifests {
        node_map
            .entry(manifest.name.as_str())
            .or_insert_with(|| graph.add_node(manifest.name.as_str()));
    }

    for manifest in manifests {
        let from = node_map[manifest.name.as_str()];
        for dep in &manifest.dependency_names {
            if let Some(&to) = node_map.get(dep.as_str()) {
                graph.update_edge(from, to, ());
            }
        }
    }

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .map(|&idx| graph.contains_edge(idx, idx))
                    .unwrap_or(false)
        })
        .map(|component| {
            let mut names: Vec<String> =
                component.into_iter().map(|idx| graph[idx].to_string()).collect();
            names.sort();
            names
        })
        .collect();

    cycles.sort();
    cycles
}
