//! Undirected simple graph over `0..n`, stored as sorted neighbor sets.

use std::collections::BTreeSet;

use pcalg_core::errors::GraphError;
use pcalg_core::VarIndex;
use serde::Serialize;

/// Adjacency store mutated by the skeleton search.
///
/// Always symmetric and loop-free. Vertices are plain indices so both phases can
/// rescan the structure without aliasing concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjacencyGraph {
    adjacency: Vec<BTreeSet<VarIndex>>,
}

impl AdjacencyGraph {
    /// Graph with `n` vertices and no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); n],
        }
    }

    /// Complete graph on `n` vertices.
    pub fn complete(n: usize) -> Self {
        let adjacency = (0..n)
            .map(|v| (0..n).filter(|&u| u != v).collect())
            .collect();
        Self { adjacency }
    }

    /// Build from an edge list. Duplicate edges are merged.
    pub fn from_edges(n: usize, edges: &[(VarIndex, VarIndex)]) -> Result<Self, GraphError> {
        let mut graph = Self::empty(n);
        for &(i, j) in edges {
            graph.add_edge(i, j)?;
        }
        Ok(graph)
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Current neighbors of `v`.
    ///
    /// # Panics
    /// Panics if `v` is not a vertex of the graph.
    pub fn neighbors(&self, v: VarIndex) -> &BTreeSet<VarIndex> {
        &self.adjacency[v]
    }

    pub fn degree(&self, v: VarIndex) -> usize {
        self.adjacency.get(v).map_or(0, BTreeSet::len)
    }

    pub fn has_edge(&self, i: VarIndex, j: VarIndex) -> bool {
        self.adjacency.get(i).is_some_and(|adj| adj.contains(&j))
    }

    /// Insert `{i, j}`. Only used while building a starting graph.
    pub fn add_edge(&mut self, i: VarIndex, j: VarIndex) -> Result<(), GraphError> {
        self.check_pair(i, j)?;
        self.adjacency[i].insert(j);
        self.adjacency[j].insert(i);
        Ok(())
    }

    /// Remove `{i, j}`, which must be present.
    pub fn remove_edge(&mut self, i: VarIndex, j: VarIndex) -> Result<(), GraphError> {
        self.check_pair(i, j)?;
        if !self.adjacency[i].remove(&j) {
            return Err(GraphError::InvalidEdge { i, j });
        }
        self.adjacency[j].remove(&i);
        Ok(())
    }

    /// All edges as `(i, j)` with `i < j`, in ascending order.
    pub fn edges(&self) -> Vec<(VarIndex, VarIndex)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, adj)| adj.range(i + 1..).map(move |&j| (i, j)))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Frozen copy of every neighbor set, sorted ascending.
    pub fn snapshot(&self) -> Vec<Vec<VarIndex>> {
        self.adjacency
            .iter()
            .map(|adj| adj.iter().copied().collect())
            .collect()
    }

    pub(crate) fn check_vertex(&self, v: VarIndex) -> Result<(), GraphError> {
        if v >= self.adjacency.len() {
            return Err(GraphError::VertexOutOfRange {
                vertex: v,
                n: self.adjacency.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_pair(&self, i: VarIndex, j: VarIndex) -> Result<(), GraphError> {
        self.check_vertex(i)?;
        self.check_vertex(j)?;
        if i == j {
            return Err(GraphError::SelfLoop { vertex: i });
        }
        Ok(())
    }
}
