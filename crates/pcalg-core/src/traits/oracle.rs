use std::sync::Arc;

use crate::errors::OracleError;
use crate::types::{Decision, VarIndex};

/// Conditional-independence test consumed by the skeleton search.
///
/// Implementations decide `x ⟂ y | given` at a significance level fixed when they
/// are constructed, and must answer identically for identical inputs. `given`
/// is sorted and never contains `x` or `y`.
pub trait IndependenceOracle: Send + Sync {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError>;

    /// Short name used in log fields.
    fn name(&self) -> &str {
        "oracle"
    }
}

impl<T: IndependenceOracle + ?Sized> IndependenceOracle for &T {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        (**self).test(x, y, given)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: IndependenceOracle + ?Sized> IndependenceOracle for Box<T> {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        (**self).test(x, y, given)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: IndependenceOracle + ?Sized> IndependenceOracle for Arc<T> {
    fn test(&self, x: VarIndex, y: VarIndex, given: &[VarIndex]) -> Result<Decision, OracleError> {
        (**self).test(x, y, given)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
