//! Top-level error for a structure-learning run.

use super::error_code::{self, PcErrorCode};
use super::{ConfigError, GraphError, OracleError, OrientationError};

/// Errors that can abort a run. Aggregates subsystem errors via `From` conversions.
/// Every variant is terminal: partial skeletons or CPDAGs are never returned.
#[derive(Debug, thiserror::Error)]
pub enum PcError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("orientation error: {0}")]
    Orientation(#[from] OrientationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("test budget exhausted after {limit} independence tests")]
    BudgetExhausted { limit: u64 },

    #[error("run cancelled")]
    Cancelled,
}

impl PcErrorCode for PcError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
            Self::Orientation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::BudgetExhausted { .. } => error_code::BUDGET_EXHAUSTED,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}

pub type PcResult<T> = Result<T, PcError>;
