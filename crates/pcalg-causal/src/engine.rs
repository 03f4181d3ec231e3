//! End-to-end PC run: skeleton search followed by orientation.

use pcalg_core::{CancellationToken, IndependenceOracle, PcConfig, PcResult, VarIndex};
use serde::Serialize;
use tracing::info;

use crate::graph::{AdjacencyGraph, Cpdag, PairRelation};
use crate::orientation::{Orientation, OrientationEngine, OrientationStats};
use crate::skeleton::{Skeleton, SkeletonEstimator};

/// Everything a run produces.
#[derive(Debug, Clone, Serialize)]
pub struct PcOutput {
    pub skeleton: Skeleton,
    pub cpdag: Cpdag,
    pub orientation: OrientationStats,
}

impl PcOutput {
    pub fn relation(&self, i: VarIndex, j: VarIndex) -> PairRelation {
        self.cpdag.relation(i, j)
    }
}

/// Owns the oracle and configuration for structure-learning runs.
///
/// Each run builds its own graph and separation-set registry; nothing is
/// shared between runs.
pub struct PcEngine<O: IndependenceOracle> {
    oracle: O,
    config: PcConfig,
    initial_graph: Option<AdjacencyGraph>,
    fixed_edges: Vec<(VarIndex, VarIndex)>,
    cancellation: Option<CancellationToken>,
}

impl<O: IndependenceOracle> PcEngine<O> {
    pub fn new(oracle: O, config: PcConfig) -> Self {
        Self {
            oracle,
            config,
            initial_graph: None,
            fixed_edges: Vec::new(),
            cancellation: None,
        }
    }

    pub fn with_initial_graph(mut self, graph: AdjacencyGraph) -> Self {
        self.initial_graph = Some(graph);
        self
    }

    pub fn with_fixed_edges(mut self, edges: impl IntoIterator<Item = (VarIndex, VarIndex)>) -> Self {
        self.fixed_edges.extend(edges);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn config(&self) -> &PcConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Skeleton phase only.
    pub fn estimate_skeleton(&self, n: usize) -> PcResult<Skeleton> {
        PcConfig::validate(&self.config)?;
        let mut estimator = SkeletonEstimator::new(&self.oracle, self.config.skeleton.clone())
            .with_fixed_edges(self.fixed_edges.iter().copied());
        if let Some(graph) = &self.initial_graph {
            estimator = estimator.with_initial_graph(graph.clone());
        }
        if let Some(token) = &self.cancellation {
            estimator = estimator.with_cancellation(token.clone());
        }
        estimator.estimate(n)
    }

    /// Orientation phase only.
    pub fn estimate_cpdag(&self, skeleton: &Skeleton) -> PcResult<Orientation> {
        let engine = OrientationEngine::new(self.config.orientation.clone());
        Ok(engine.orient_skeleton(skeleton)?)
    }

    /// Both phases over variables `0..n`.
    pub fn run(&self, n: usize) -> PcResult<PcOutput> {
        let span = tracing::info_span!("pc.run", variables = n, oracle = self.oracle.name());
        let _guard = span.enter();

        let skeleton = self.estimate_skeleton(n)?;
        let Orientation { cpdag, stats } = self.estimate_cpdag(&skeleton)?;
        info!(
            edges = cpdag.edge_count(),
            directed = stats.directed_edges,
            tests = skeleton.stats.tests_performed,
            "pc run complete"
        );
        Ok(PcOutput {
            skeleton,
            cpdag,
            orientation: stats,
        })
    }
}
