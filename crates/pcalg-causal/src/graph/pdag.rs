//! Partially directed graph built once from the skeleton and oriented in place.

use std::collections::BTreeSet;

use pcalg_core::errors::OrientationError;
use pcalg_core::VarIndex;
use serde::{Serialize, Serializer};

use super::adjacency::AdjacencyGraph;

/// Relation between an ordered pair `(i, j)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairRelation {
    NoEdge,
    Undirected,
    /// `i -> j`
    Forward,
    /// `j -> i`
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Directed,
    Undirected,
}

/// One edge of the output graph. Undirected edges are reported with `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CpdagEdge {
    pub from: VarIndex,
    pub to: VarIndex,
    pub kind: EdgeKind,
}

/// Graph whose edges are either undirected or oriented.
///
/// An undirected edge `i - j` is stored as the arc pair `i -> j`, `j -> i`;
/// orienting it drops the reverse arc. Adjacency never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdag {
    succ: Vec<BTreeSet<VarIndex>>,
    pred: Vec<BTreeSet<VarIndex>>,
}

/// The PDAG once no orientation rule applies any more.
pub type Cpdag = Pdag;

impl Pdag {
    /// Every skeleton edge becomes undirected.
    pub fn from_skeleton(skeleton: &AdjacencyGraph) -> Self {
        let succ: Vec<BTreeSet<VarIndex>> = (0..skeleton.num_vertices())
            .map(|v| skeleton.neighbors(v).clone())
            .collect();
        let pred = succ.clone();
        Self { succ, pred }
    }

    pub fn num_vertices(&self) -> usize {
        self.succ.len()
    }

    fn has_arc(&self, from: VarIndex, to: VarIndex) -> bool {
        self.succ.get(from).is_some_and(|s| s.contains(&to))
    }

    pub fn relation(&self, i: VarIndex, j: VarIndex) -> PairRelation {
        match (self.has_arc(i, j), self.has_arc(j, i)) {
            (true, true) => PairRelation::Undirected,
            (true, false) => PairRelation::Forward,
            (false, true) => PairRelation::Backward,
            (false, false) => PairRelation::NoEdge,
        }
    }

    pub fn is_adjacent(&self, i: VarIndex, j: VarIndex) -> bool {
        self.has_arc(i, j) || self.has_arc(j, i)
    }

    pub fn is_undirected(&self, i: VarIndex, j: VarIndex) -> bool {
        self.has_arc(i, j) && self.has_arc(j, i)
    }

    /// `true` iff the edge is oriented `from -> to`.
    pub fn is_directed(&self, from: VarIndex, to: VarIndex) -> bool {
        self.has_arc(from, to) && !self.has_arc(to, from)
    }

    /// Vertices joined to `v` by an undirected edge.
    pub fn undirected_neighbors(&self, v: VarIndex) -> impl Iterator<Item = VarIndex> + '_ {
        self.succ[v].intersection(&self.pred[v]).copied()
    }

    /// Vertices `p` with `p -> v`.
    pub fn parents(&self, v: VarIndex) -> impl Iterator<Item = VarIndex> + '_ {
        self.pred[v].difference(&self.succ[v]).copied()
    }

    /// Vertices `c` with `v -> c`.
    pub fn children(&self, v: VarIndex) -> impl Iterator<Item = VarIndex> + '_ {
        self.succ[v].difference(&self.pred[v]).copied()
    }

    /// Every vertex adjacent to `v`, whatever the edge mark.
    pub fn adjacent(&self, v: VarIndex) -> impl Iterator<Item = VarIndex> + '_ {
        self.succ[v].union(&self.pred[v]).copied()
    }

    /// Orient `from - to` as `from -> to`.
    ///
    /// Returns `Ok(true)` if the edge changed and `Ok(false)` if it was already
    /// oriented that way. Orienting against an existing orientation, or a pair
    /// that is not adjacent, is an `InconsistentOrientation`.
    pub fn orient(
        &mut self,
        from: VarIndex,
        to: VarIndex,
        rule: &str,
    ) -> Result<bool, OrientationError> {
        match self.relation(from, to) {
            PairRelation::Undirected => {
                self.succ[to].remove(&from);
                self.pred[from].remove(&to);
                Ok(true)
            }
            PairRelation::Forward => Ok(false),
            PairRelation::Backward => Err(OrientationError::InconsistentOrientation {
                from,
                to,
                rule: rule.to_string(),
                details: format!("edge is already oriented {to} -> {from}"),
            }),
            PairRelation::NoEdge => Err(OrientationError::InconsistentOrientation {
                from,
                to,
                rule: rule.to_string(),
                details: "vertices are not adjacent".to_string(),
            }),
        }
    }

    /// Oriented edges `(from, to)`, ascending.
    pub fn directed_edges(&self) -> Vec<(VarIndex, VarIndex)> {
        (0..self.num_vertices())
            .flat_map(|v| self.children(v).map(move |c| (v, c)))
            .collect()
    }

    /// Undirected edges `(i, j)` with `i < j`, ascending.
    pub fn undirected_edges(&self) -> Vec<(VarIndex, VarIndex)> {
        (0..self.num_vertices())
            .flat_map(|v| {
                self.undirected_neighbors(v)
                    .filter(move |&u| u > v)
                    .map(move |u| (v, u))
            })
            .collect()
    }

    pub fn undirected_count(&self) -> usize {
        self.undirected_edges().len()
    }

    pub fn edge_count(&self) -> usize {
        (0..self.num_vertices())
            .map(|v| self.adjacent(v).filter(|&u| u > v).count())
            .sum()
    }

    /// Every edge with its kind, ordered by `(from, to)`.
    pub fn edges(&self) -> Vec<CpdagEdge> {
        let mut edges: Vec<CpdagEdge> = self
            .directed_edges()
            .into_iter()
            .map(|(from, to)| CpdagEdge {
                from,
                to,
                kind: EdgeKind::Directed,
            })
            .chain(
                self.undirected_edges()
                    .into_iter()
                    .map(|(from, to)| CpdagEdge {
                        from,
                        to,
                        kind: EdgeKind::Undirected,
                    }),
            )
            .collect();
        edges.sort_unstable_by_key(|e| (e.from, e.to));
        edges
    }

    /// Underlying undirected skeleton.
    pub fn skeleton(&self) -> AdjacencyGraph {
        let mut graph = AdjacencyGraph::empty(self.num_vertices());
        for v in 0..self.num_vertices() {
            for u in self.succ[v].iter().copied() {
                // Arcs come from a valid skeleton, so insertion cannot fail.
                let _ = graph.add_edge(v, u);
            }
        }
        graph
    }
}

impl Serialize for Pdag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr {
            vertices: usize,
            edges: Vec<CpdagEdge>,
        }
        Repr {
            vertices: self.num_vertices(),
            edges: self.edges(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path3() -> Pdag {
        Pdag::from_skeleton(&AdjacencyGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap())
    }

    #[test]
    fn starts_fully_undirected() {
        let pdag = path3();
        assert_eq!(pdag.relation(0, 1), PairRelation::Undirected);
        assert_eq!(pdag.relation(0, 2), PairRelation::NoEdge);
        assert_eq!(pdag.undirected_edges(), vec![(0, 1), (1, 2)]);
        assert!(pdag.directed_edges().is_empty());
    }

    #[test]
    fn orient_drops_reverse_arc() {
        let mut pdag = path3();
        assert!(pdag.orient(0, 1, "test").unwrap());
        assert_eq!(pdag.relation(0, 1), PairRelation::Forward);
        assert_eq!(pdag.relation(1, 0), PairRelation::Backward);
        assert_eq!(pdag.parents(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(pdag.children(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(pdag.undirected_neighbors(1).collect::<Vec<_>>(), vec![2]);
        assert!(!pdag.orient(0, 1, "test").unwrap());
        assert_eq!(pdag.edge_count(), 2);
    }

    #[test]
    fn orient_against_existing_direction_fails() {
        let mut pdag = path3();
        pdag.orient(0, 1, "test").unwrap();
        let err = pdag.orient(1, 0, "R1").unwrap_err();
        assert!(matches!(
            err,
            OrientationError::InconsistentOrientation { from: 1, to: 0, .. }
        ));
        assert!(pdag.orient(0, 2, "R1").is_err());
    }

    #[test]
    fn skeleton_is_preserved() {
        let skeleton = AdjacencyGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let mut pdag = Pdag::from_skeleton(&skeleton);
        pdag.orient(2, 1, "test").unwrap();
        assert_eq!(pdag.skeleton(), skeleton);
        assert_eq!(
            pdag.edges(),
            vec![
                CpdagEdge { from: 0, to: 1, kind: EdgeKind::Undirected },
                CpdagEdge { from: 2, to: 1, kind: EdgeKind::Directed },
            ]
        );
    }
}
