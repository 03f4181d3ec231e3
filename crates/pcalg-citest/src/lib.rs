//! # pcalg-citest
//!
//! Conditional-independence tests computed from observational data.
//! Each test implements `pcalg_core::IndependenceOracle` and can be handed
//! directly to the skeleton search.

pub mod data;
pub mod fisher_z;
pub mod gsquare;
mod linalg;

pub use data::{DataMatrix, DiscreteMatrix};
pub use fisher_z::FisherZTest;
pub use gsquare::{BinaryGSquareTest, DiscreteGSquareTest};
