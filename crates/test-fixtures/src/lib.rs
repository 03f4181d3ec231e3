//! Shared fixtures for pcalg tests and benchmarks: ground-truth DAGs, oracles with
//! known answers, and seeded data samplers.

pub mod dag;
pub mod oracles;
pub mod sampling;

pub use dag::TrueDag;
pub use oracles::{DagOracle, FailingOracle, HashedOracle, PermutedOracle, ScriptedOracle};
