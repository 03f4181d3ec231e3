//! Graph substrates shared by both phases: the mutable skeleton, the
//! separation-set registry, and the partially directed graph.

pub mod adjacency;
pub mod dag_enforcement;
pub mod pdag;
pub mod separation;

pub use adjacency::AdjacencyGraph;
pub use pdag::{Cpdag, CpdagEdge, EdgeKind, PairRelation, Pdag};
pub use separation::SeparationSets;
