//! Orientation phase: turn a skeleton plus separation sets into a CPDAG.

pub mod colliders;
pub mod meek;

use pcalg_core::config::OrientationConfig;
use pcalg_core::errors::OrientationError;
use pcalg_core::orientation_span;
use serde::Serialize;
use tracing::info;

pub use self::meek::{MeekRule, RuleCounts};
use crate::graph::{AdjacencyGraph, Cpdag, Pdag, SeparationSets};
use crate::skeleton::Skeleton;

/// Counters collected during orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrientationStats {
    pub colliders: usize,
    pub rules: RuleCounts,
    pub directed_edges: usize,
    pub undirected_edges: usize,
}

/// Result of the orientation phase.
#[derive(Debug, Clone, Serialize)]
pub struct Orientation {
    pub cpdag: Cpdag,
    pub stats: OrientationStats,
}

/// Collider detection followed by Meek-rule propagation.
#[derive(Debug, Clone, Default)]
pub struct OrientationEngine {
    config: OrientationConfig,
}

impl OrientationEngine {
    pub fn new(config: OrientationConfig) -> Self {
        Self { config }
    }

    /// Orient a skeleton produced by `SkeletonEstimator`.
    pub fn orient_skeleton(&self, skeleton: &Skeleton) -> Result<Orientation, OrientationError> {
        self.orient(&skeleton.graph, &skeleton.separation_sets)
    }

    /// Orient `graph` using `separation_sets`. The graph is converted once into a
    /// PDAG, which is then oriented in place.
    pub fn orient(
        &self,
        graph: &AdjacencyGraph,
        separation_sets: &SeparationSets,
    ) -> Result<Orientation, OrientationError> {
        let span = orientation_span!(graph.edge_count());
        let _guard = span.enter();

        let mut pdag = Pdag::from_skeleton(graph);
        let colliders = colliders::orient_colliders(&mut pdag, graph, separation_sets)?;
        let rules = self.propagate(&mut pdag)?;

        let stats = OrientationStats {
            colliders,
            rules,
            directed_edges: pdag.directed_edges().len(),
            undirected_edges: pdag.undirected_count(),
        };
        info!(
            colliders,
            propagated = rules.total(),
            directed = stats.directed_edges,
            undirected = stats.undirected_edges,
            "cpdag oriented"
        );
        Ok(Orientation { cpdag: pdag, stats })
    }

    /// Apply Meek's rules to a fixed point. On a completed CPDAG this orients
    /// nothing.
    pub fn propagate(&self, pdag: &mut Pdag) -> Result<RuleCounts, OrientationError> {
        meek::propagate(pdag, self.config.apply_rule4)
    }
}
