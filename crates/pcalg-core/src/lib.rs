//! # pcalg-core
//!
//! Foundation crate for the pcalg workspace.
//! Defines the variable/conditioning-set types, the independence-oracle trait,
//! errors, config, and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod observability;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::PcConfig;
pub use errors::{PcError, PcResult};
pub use traits::{Cancellable, CancellationToken, IndependenceOracle};
pub use types::{ConditioningSet, Decision, VarIndex};
