use serde::{Deserialize, Serialize};

/// Orientation-phase configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Apply Meek's fourth rule during propagation.
    pub apply_rule4: bool,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self { apply_rule4: true }
    }
}
