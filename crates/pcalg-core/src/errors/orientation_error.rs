//! Orientation-phase errors.
//!
//! Both variants mean the CI-test results cannot be satisfied by any DAG. They are
//! surfaced as data-quality signals and never patched over.

use super::error_code::{self, PcErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrientationError {
    #[error("inconsistent separation sets around collider {collider}: {details}")]
    InconsistentSeparation { collider: usize, details: String },

    #[error("inconsistent orientation of {from} -> {to} by {rule}: {details}")]
    InconsistentOrientation {
        from: usize,
        to: usize,
        rule: String,
        details: String,
    },
}

impl PcErrorCode for OrientationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InconsistentSeparation { .. } => error_code::INCONSISTENT_SEPARATION,
            Self::InconsistentOrientation { .. } => error_code::INCONSISTENT_ORIENTATION,
        }
    }
}
