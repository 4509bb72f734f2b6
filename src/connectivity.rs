//! Connectivity filter over an induced subgraph
//!
//! Keeps only those candidate nodes that share a connected component of size
//! at least two with another candidate, using only edges whose endpoints are
//! both candidates. Isolated candidates are dropped.

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use std::collections::HashSet;

/// Restrict `nodes` to its non-singleton components under `edges`
///
/// The relative order of `nodes` is preserved and duplicates are removed.
/// Returns an empty vector when every component is a singleton.
pub fn restrict<S: AsRef<str>>(nodes: &[S], edges: &[(String, String)]) -> Vec<String> {
    let graph = induced_subgraph(nodes, edges);

    let mut kept: HashSet<&str> = HashSet::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for start in graph.nodes() {
        if seen.contains(start) {
            continue;
        }
        let mut component = Vec::new();
        let mut bfs = Bfs::new(&graph, start);
        while let Some(node) = bfs.next(&graph) {
            seen.insert(node);
            component.push(node);
        }
        if component.len() >= 2 {
            kept.extend(component);
        }
    }

    tracing::debug!(
        candidates = graph.node_count(),
        kept = kept.len(),
        "connectivity filter"
    );

    let mut emitted = HashSet::new();
    nodes
        .iter()
        .map(|node| node.as_ref())
        .filter(|node| kept.contains(node) && emitted.insert(*node))
        .map(str::to_string)
        .collect()
}

/// Apply [`restrict`] when an edge list is supplied, pass `nodes` through otherwise
pub fn restrict_optional(nodes: Vec<String>, edges: Option<&[(String, String)]>) -> Vec<String> {
    match edges {
        Some(edges) => restrict(&nodes, edges),
        None => nodes,
    }
}

/// Undirected simple graph on `nodes` with the edges joining two of them
fn induced_subgraph<'a, S: AsRef<str>>(
    nodes: &'a [S],
    edges: &'a [(String, String)],
) -> UnGraphMap<&'a str, ()> {
    let mut graph = UnGraphMap::new();
    for node in nodes {
        graph.add_node(node.as_ref());
    }
    for (u, v) in edges {
        let (u, v) = (u.as_str(), v.as_str());
        if u != v && graph.contains_node(u) && graph.contains_node(v) {
            graph.add_edge(u, v, ());
        }
    }
    graph
}
