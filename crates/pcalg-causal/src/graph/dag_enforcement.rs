//! Cycle detection over the directed part of a PDAG.
//! Used to reject orientations that would close a directed cycle.

use pcalg_core::VarIndex;
use petgraph::algo::{has_path_connecting, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};

use super::pdag::Pdag;

/// Directed arcs only; undirected edges are ignored.
fn directed_part(pdag: &Pdag) -> DiGraph<VarIndex, ()> {
    let mut graph = DiGraph::with_capacity(pdag.num_vertices(), 0);
    for v in 0..pdag.num_vertices() {
        graph.add_node(v);
    }
    for (from, to) in pdag.directed_edges() {
        graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
    }
    graph
}

/// Check whether orienting `from -> to` would create a directed cycle,
/// i.e. whether `to` already reaches `from` along directed edges.
pub fn would_create_cycle(pdag: &Pdag, from: VarIndex, to: VarIndex) -> bool {
    // Self-loops are always cycles.
    if from == to {
        return true;
    }
    let graph = directed_part(pdag);
    has_path_connecting(&graph, NodeIndex::new(to), NodeIndex::new(from), None)
}

/// Returns every strongly connected component with more than one vertex,
/// i.e. the directed cycles present in the PDAG.
pub fn find_cycles(pdag: &Pdag) -> Vec<Vec<VarIndex>> {
    let graph = directed_part(pdag);
    tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut vertices: Vec<VarIndex> = scc.into_iter().map(NodeIndex::index).collect();
            vertices.sort_unstable();
            vertices
        })
        .collect()
}
