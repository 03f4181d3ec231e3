//! Variable indices, conditioning sets, and oracle decisions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index of an observed variable, `0..n`.
pub type VarIndex = usize;

/// Outcome of a single conditional-independence query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Independent,
    Dependent,
}

impl Decision {
    pub fn is_independent(self) -> bool {
        matches!(self, Decision::Independent)
    }

    /// Decision rule shared by the p-value based tests: independent iff `p > alpha`.
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value > alpha {
            Decision::Independent
        } else {
            Decision::Dependent
        }
    }
}

/// A sorted, duplicate-free set of conditioning variables.
///
/// Conditioning sets are small in practice (bounded by the level reached by the
/// skeleton search), so they live inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConditioningSet(SmallVec<[VarIndex; 8]>);

impl ConditioningSet {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Build from arbitrary indices; the result is sorted and deduplicated.
    pub fn from_slice(vars: &[VarIndex]) -> Self {
        let mut inner: SmallVec<[VarIndex; 8]> = SmallVec::from_slice(vars);
        inner.sort_unstable();
        inner.dedup();
        Self(inner)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, v: VarIndex) -> bool {
        self.0.binary_search(&v).is_ok()
    }

    pub fn as_slice(&self) -> &[VarIndex] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = VarIndex> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<VarIndex> for ConditioningSet {
    fn from_iter<T: IntoIterator<Item = VarIndex>>(iter: T) -> Self {
        let collected: SmallVec<[VarIndex; 8]> = iter.into_iter().collect();
        Self::from_slice(&collected)
    }
}

impl std::fmt::Display for ConditioningSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (pos, v) in self.0.iter().enumerate() {
            if pos > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}
