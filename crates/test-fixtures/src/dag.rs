//! Ground-truth DAGs and d-separation.

use std::collections::BTreeSet;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::{Bfs, Dfs, Reversed};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A DAG over `0..n` used as the data-generating structure in tests.
#[derive(Debug, Clone)]
pub struct TrueDag {
    graph: DiGraph<usize, ()>,
}

impl TrueDag {
    /// # Panics
    /// Panics if an edge is out of range or the edges contain a cycle.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        for &(from, to) in edges {
            assert!(from < n && to < n && from != to, "bad edge {from} -> {to}");
        }
        Self::try_from_edges(n, edges).expect("edges contain a cycle")
    }

    /// `None` when the edges contain a cycle.
    pub fn try_from_edges(n: usize, edges: &[(usize, usize)]) -> Option<Self> {
        let mut graph = DiGraph::with_capacity(n, edges.len());
        for v in 0..n {
            graph.add_node(v);
        }
        for &(from, to) in edges {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
        toposort(&graph, None).ok()?;
        Some(Self { graph })
    }

    /// Random DAG: each forward pair `i < j` gets `i -> j` with probability `p`.
    pub fn random(n: usize, p: f64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut edges = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                if rng.gen_bool(p) {
                    edges.push((i, j));
                }
            }
        }
        Self::from_edges(n, &edges)
    }

    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (a.index(), b.index()))
            .collect();
        edges.sort_unstable();
        edges
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.graph
            .find_edge(NodeIndex::new(from), NodeIndex::new(to))
            .is_some()
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.has_edge(a, b) || self.has_edge(b, a)
    }

    pub fn parents(&self, v: usize) -> Vec<usize> {
        let mut parents: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(v), petgraph::Direction::Incoming)
            .map(NodeIndex::index)
            .collect();
        parents.sort_unstable();
        parents
    }

    /// Undirected skeleton edges `(i, j)`, `i < j`.
    pub fn skeleton(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self
            .edges()
            .into_iter()
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    /// Unshielded colliders `(i, k, j)` with `i < j`.
    pub fn v_structures(&self) -> Vec<(usize, usize, usize)> {
        let mut found = Vec::new();
        for k in 0..self.num_vertices() {
            let parents = self.parents(k);
            for (pos, &i) in parents.iter().enumerate() {
                for &j in &parents[pos + 1..] {
                    if !self.is_adjacent(i, j) {
                        found.push((i, k, j));
                    }
                }
            }
        }
        found
    }

    /// Every DAG on the same skeleton with the same unshielded colliders,
    /// found by brute force over all orientations. Only for small graphs.
    pub fn markov_equivalence_class(&self) -> Vec<TrueDag> {
        let n = self.num_vertices();
        let skeleton = self.skeleton();
        let mut colliders = self.v_structures();
        colliders.sort_unstable();
        assert!(skeleton.len() < 20, "too many edges to enumerate");

        (0u32..1 << skeleton.len())
            .filter_map(|mask| {
                let edges: Vec<(usize, usize)> = skeleton
                    .iter()
                    .enumerate()
                    .map(|(bit, &(a, b))| if mask >> bit & 1 == 1 { (b, a) } else { (a, b) })
                    .collect();
                TrueDag::try_from_edges(n, &edges)
            })
            .filter(|candidate| {
                let mut found = candidate.v_structures();
                found.sort_unstable();
                found == colliders
            })
            .collect()
    }

    /// Topological order of the vertices.
    pub fn topological_order(&self) -> Vec<usize> {
        toposort(&self.graph, None)
            .map(|order| order.into_iter().map(NodeIndex::index).collect())
            .unwrap_or_default()
    }

    fn ancestors_of(&self, seeds: &BTreeSet<usize>) -> BTreeSet<usize> {
        let reversed = Reversed(&self.graph);
        let mut ancestors = BTreeSet::new();
        for &seed in seeds {
            let mut dfs = Dfs::new(reversed, NodeIndex::new(seed));
            while let Some(node) = dfs.next(reversed) {
                ancestors.insert(node.index());
            }
        }
        ancestors
    }

    /// `x ⟂ y | given` in the DAG, via the moralized ancestral graph.
    pub fn d_separated(&self, x: usize, y: usize, given: &[usize]) -> bool {
        let conditioned: BTreeSet<usize> = given.iter().copied().collect();
        let mut seeds = conditioned.clone();
        seeds.insert(x);
        seeds.insert(y);
        let ancestral = self.ancestors_of(&seeds);

        let n = self.num_vertices();
        let mut moral = UnGraph::<usize, ()>::with_capacity(n, 0);
        for v in 0..n {
            moral.add_node(v);
        }
        let mut link = |a: usize, b: usize| {
            if !conditioned.contains(&a) && !conditioned.contains(&b) {
                moral.update_edge(NodeIndex::new(a), NodeIndex::new(b), ());
            }
        };
        for &v in &ancestral {
            let parents = self.parents(v);
            for (pos, &p) in parents.iter().enumerate() {
                link(p, v);
                for &q in &parents[pos + 1..] {
                    link(p, q);
                }
            }
        }

        let mut bfs = Bfs::new(&moral, NodeIndex::new(x));
        while let Some(node) = bfs.next(&moral) {
            if node.index() == y {
                return false;
            }
        }
        true
    }
}
