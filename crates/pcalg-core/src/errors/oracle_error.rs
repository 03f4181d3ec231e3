//! Independence-oracle errors.

use super::error_code::{self, PcErrorCode};

/// The independence test could not produce an answer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("singular correlation matrix for ({x}, {y}) given {given:?}")]
    SingularMatrix {
        x: usize,
        y: usize,
        given: Vec<usize>,
    },

    #[error("insufficient samples: have {rows} rows, need at least {required}")]
    InsufficientSamples { rows: usize, required: usize },

    #[error("variable {variable} out of range for {columns} columns")]
    VariableOutOfRange { variable: usize, columns: usize },

    #[error("value {value} in column {column} exceeds level count {levels}")]
    InvalidValue {
        column: usize,
        value: usize,
        levels: usize,
    },

    #[error("dimension mismatch: {details}")]
    DimensionMismatch { details: String },

    #[error("independence test failed: {reason}")]
    Failed { reason: String },
}

impl PcErrorCode for OracleError {
    fn error_code(&self) -> &'static str {
        error_code::ORACLE_ERROR
    }
}
