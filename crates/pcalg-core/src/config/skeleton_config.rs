use serde::{Deserialize, Serialize};

/// How neighbor sets are read while a level is being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkeletonMethod {
    /// Neighbor sets are frozen at the start of each level; removals land at the
    /// end of the level. The surviving edges do not depend on iteration order.
    #[default]
    Stable,
    /// Live neighbor lookups with immediate removal. Order dependent.
    Original,
}

impl std::str::FromStr for SkeletonMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stable" => Ok(Self::Stable),
            "original" => Ok(Self::Original),
            other => Err(format!("unknown skeleton method '{other}'")),
        }
    }
}

/// Skeleton-search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    pub method: SkeletonMethod,
    /// Largest conditioning-set size to try. `None` runs until no edge is testable.
    pub max_level: Option<usize>,
    /// Test the edges of one level on the rayon pool. Stable method only.
    pub parallel: bool,
    /// Abort with `BudgetExhausted` once this many oracle calls have been made.
    pub max_tests: Option<u64>,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            method: SkeletonMethod::Stable,
            max_level: None,
            parallel: false,
            max_tests: None,
        }
    }
}
