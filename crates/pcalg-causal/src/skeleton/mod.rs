//! Skeleton search: shrink a starting graph by conditional-independence tests on
//! conditioning sets of growing size.
//!
//! At level `ℓ` every remaining edge `{i, j}` is tested against each `ℓ`-subset of
//! `adj(i) \ {j}`, then of `adj(j) \ {i}`. The first independent answer removes
//! the edge and its conditioning set becomes the separation set. The search stops
//! once no edge has enough neighbors to form a set of the current size.

pub mod combinations;

mod budget;

use std::collections::BTreeSet;

use pcalg_core::config::{SkeletonConfig, SkeletonMethod};
use pcalg_core::errors::GraphError;
use pcalg_core::{
    skeleton_span, Cancellable, CancellationToken, ConditioningSet, IndependenceOracle, PcResult,
    VarIndex,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use self::budget::TestBudget;
use self::combinations::Combinations;
use crate::graph::{AdjacencyGraph, SeparationSets};

/// Counters collected during one skeleton search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkeletonStats {
    pub tests_performed: u64,
    pub edges_removed: usize,
    /// Highest level whose edges were examined.
    pub max_level: usize,
    /// Edge count after each level, starting with level 0.
    pub edges_after_level: Vec<usize>,
}

/// Result of the skeleton phase.
#[derive(Debug, Clone, Serialize)]
pub struct Skeleton {
    pub graph: AdjacencyGraph,
    pub separation_sets: SeparationSets,
    pub stats: SkeletonStats,
}

/// Drives the level loop against an injected oracle.
pub struct SkeletonEstimator<'o, O: IndependenceOracle + ?Sized> {
    oracle: &'o O,
    config: SkeletonConfig,
    initial_graph: Option<AdjacencyGraph>,
    fixed_edges: Vec<(VarIndex, VarIndex)>,
    cancellation: Option<CancellationToken>,
}

/// Removal found for one edge during a level.
type Removal = (VarIndex, VarIndex, ConditioningSet);

impl<'o, O: IndependenceOracle + ?Sized> SkeletonEstimator<'o, O> {
    pub fn new(oracle: &'o O, config: SkeletonConfig) -> Self {
        Self {
            oracle,
            config,
            initial_graph: None,
            fixed_edges: Vec::new(),
            cancellation: None,
        }
    }

    /// Start from `graph` instead of the complete graph. Pairs missing from it
    /// get no separation set.
    pub fn with_initial_graph(mut self, graph: AdjacencyGraph) -> Self {
        self.initial_graph = Some(graph);
        self
    }

    /// Edges that are never tested and never removed.
    pub fn with_fixed_edges(mut self, edges: impl IntoIterator<Item = (VarIndex, VarIndex)>) -> Self {
        self.fixed_edges.extend(edges);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Run the search over variables `0..n`.
    pub fn estimate(&self, n: usize) -> PcResult<Skeleton> {
        let span = skeleton_span!(n, self.config.method);
        let _guard = span.enter();

        let mut graph = self.starting_graph(n)?;
        let fixed = self.fixed_pairs(&graph)?;
        let mut separation_sets = SeparationSets::new();
        let mut stats = SkeletonStats::default();
        let budget = TestBudget::new(self.config.max_tests);

        if n < 2 {
            return Ok(Skeleton {
                graph,
                separation_sets,
                stats,
            });
        }

        let starting_edges = graph.edge_count();
        let mut level = 0;
        loop {
            self.check_cancelled()?;
            let testable = match self.config.method {
                SkeletonMethod::Stable => self.stable_level(
                    level,
                    &mut graph,
                    &mut separation_sets,
                    &fixed,
                    &budget,
                )?,
                SkeletonMethod::Original => self.original_level(
                    level,
                    &mut graph,
                    &mut separation_sets,
                    &fixed,
                    &budget,
                )?,
            };

            if !testable {
                break;
            }
            stats.max_level = level;
            stats.edges_after_level.push(graph.edge_count());
            info!(
                level,
                edges = graph.edge_count(),
                tests = budget.used(),
                "skeleton level complete"
            );
            level += 1;
            if self.config.max_level.is_some_and(|max| level > max) {
                break;
            }
        }

        stats.tests_performed = budget.used();
        stats.edges_removed = starting_edges - graph.edge_count();
        info!(
            edges = graph.edge_count(),
            removed = stats.edges_removed,
            tests = stats.tests_performed,
            "skeleton estimated"
        );

        Ok(Skeleton {
            graph,
            separation_sets,
            stats,
        })
    }

    fn starting_graph(&self, n: usize) -> Result<AdjacencyGraph, GraphError> {
        match &self.initial_graph {
            Some(graph) if graph.num_vertices() != n => Err(GraphError::VertexCountMismatch {
                expected: n,
                actual: graph.num_vertices(),
            }),
            Some(graph) => Ok(graph.clone()),
            None => Ok(AdjacencyGraph::complete(n)),
        }
    }

    /// Normalize fixed edges to `(min, max)`; each must exist in the starting graph.
    fn fixed_pairs(&self, graph: &AdjacencyGraph) -> Result<BTreeSet<(VarIndex, VarIndex)>, GraphError> {
        let mut pairs = BTreeSet::new();
        for &(i, j) in &self.fixed_edges {
            graph.check_pair(i, j)?;
            if !graph.has_edge(i, j) {
                return Err(GraphError::InvalidEdge { i, j });
            }
            pairs.insert((i.min(j), i.max(j)));
        }
        Ok(pairs)
    }

    fn check_cancelled(&self) -> PcResult<()> {
        self.cancellation.as_ref().map_or(Ok(()), Cancellable::check)
    }

    /// Query the oracle for `x ⟂ y | given`, charging the budget.
    fn independent(
        &self,
        x: VarIndex,
        y: VarIndex,
        given: &ConditioningSet,
        budget: &TestBudget,
    ) -> PcResult<bool> {
        budget.charge()?;
        let decision = self.oracle.test(x, y, given.as_slice())?;
        debug!(
            oracle = self.oracle.name(),
            x,
            y,
            given = %given,
            decision = ?decision,
            "ci test"
        );
        Ok(decision.is_independent())
    }

    /// First separating subset of `candidates` of size `level`. When `tried` is
    /// set, subsets lying entirely inside it were already queried and are skipped.
    fn first_separating_set(
        &self,
        x: VarIndex,
        y: VarIndex,
        candidates: &[VarIndex],
        tried: Option<&[VarIndex]>,
        level: usize,
        budget: &TestBudget,
    ) -> PcResult<Option<ConditioningSet>> {
        for subset in Combinations::new(candidates, level) {
            if tried.is_some_and(|tried| subset.iter().all(|v| tried.contains(&v))) {
                continue;
            }
            if self.independent(x, y, &subset, budget)? {
                return Ok(Some(subset));
            }
        }
        Ok(None)
    }

    /// Test edge `{i, j}` from side `i`, then from side `j`, against the frozen
    /// neighbor lists of the current level. A subset drawn from both sides is
    /// only queried once.
    fn test_frozen_edge(
        &self,
        i: VarIndex,
        j: VarIndex,
        level: usize,
        snapshot: &[Vec<VarIndex>],
        budget: &TestBudget,
    ) -> PcResult<Option<ConditioningSet>> {
        self.check_cancelled()?;
        let side_i: Vec<VarIndex> = snapshot[i].iter().copied().filter(|&v| v != j).collect();
        let side_j: Vec<VarIndex> = snapshot[j].iter().copied().filter(|&v| v != i).collect();

        if side_i.len() >= level {
            if let Some(set) = self.first_separating_set(i, j, &side_i, None, level, budget)? {
                return Ok(Some(set));
            }
        }
        if side_j.len() >= level {
            let tried = (side_i.len() >= level).then_some(side_i.as_slice());
            if let Some(set) = self.first_separating_set(j, i, &side_j, tried, level, budget)? {
                return Ok(Some(set));
            }
        }
        Ok(None)
    }

    /// One level with neighbor sets frozen at its start. Removals are applied
    /// after every edge of the level has been tested.
    fn stable_level(
        &self,
        level: usize,
        graph: &mut AdjacencyGraph,
        separation_sets: &mut SeparationSets,
        fixed: &BTreeSet<(VarIndex, VarIndex)>,
        budget: &TestBudget,
    ) -> PcResult<bool> {
        let snapshot = graph.snapshot();
        let edges: Vec<(VarIndex, VarIndex)> = graph
            .edges()
            .into_iter()
            .filter(|pair| !fixed.contains(pair))
            .filter(|&(i, j)| snapshot[i].len() > level || snapshot[j].len() > level)
            .collect();
        if edges.is_empty() {
            return Ok(false);
        }

        let found: Vec<Option<Removal>> = if self.config.parallel {
            edges
                .par_iter()
                .map(|&(i, j)| {
                    self.test_frozen_edge(i, j, level, &snapshot, budget)
                        .map(|set| set.map(|set| (i, j, set)))
                })
                .collect::<PcResult<_>>()?
        } else {
            edges
                .iter()
                .map(|&(i, j)| {
                    self.test_frozen_edge(i, j, level, &snapshot, budget)
                        .map(|set| set.map(|set| (i, j, set)))
                })
                .collect::<PcResult<_>>()?
        };

        for (i, j, set) in found.into_iter().flatten() {
            graph.remove_edge(i, j)?;
            debug!(i, j, separation_set = %set, level, "edge removed");
            separation_sets.insert(i, j, set);
        }
        Ok(true)
    }

    /// One level with live neighbor lookups over ordered pairs `(i, j)`.
    /// Removals take effect immediately, so later pairs see a smaller graph.
    fn original_level(
        &self,
        level: usize,
        graph: &mut AdjacencyGraph,
        separation_sets: &mut SeparationSets,
        fixed: &BTreeSet<(VarIndex, VarIndex)>,
        budget: &TestBudget,
    ) -> PcResult<bool> {
        let n = graph.num_vertices();
        let mut testable = false;
        for i in 0..n {
            for j in 0..n {
                if i == j || !graph.has_edge(i, j) || fixed.contains(&(i.min(j), i.max(j))) {
                    continue;
                }
                self.check_cancelled()?;
                let candidates: Vec<VarIndex> =
                    graph.neighbors(i).iter().copied().filter(|&v| v != j).collect();
                if candidates.len() < level {
                    continue;
                }
                testable = true;
                if let Some(set) = self.first_separating_set(i, j, &candidates, None, level, budget)? {
                    graph.remove_edge(i, j)?;
                    debug!(i, j, separation_set = %set, level, "edge removed");
                    separation_sets.insert(i, j, set);
                }
            }
        }
        Ok(testable)
    }
}
