//! # pcalg-causal
//!
//! The structure-learning engine. Shrinks the complete graph into a skeleton by
//! conditional-independence testing, then orients it into a CPDAG with collider
//! detection and Meek's rules.

pub mod engine;
pub mod graph;
pub mod orientation;
pub mod skeleton;

pub use engine::{PcEngine, PcOutput};
pub use graph::{AdjacencyGraph, Cpdag, PairRelation, Pdag, SeparationSets};
pub use orientation::{MeekRule, Orientation, OrientationEngine, OrientationStats};
pub use skeleton::{Skeleton, SkeletonEstimator, SkeletonStats};
