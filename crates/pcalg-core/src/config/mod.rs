//! Configuration system for pcalg.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod observability_config;
pub mod orientation_config;
pub mod pc_config;
pub mod skeleton_config;

pub use observability_config::ObservabilityConfig;
pub use orientation_config::OrientationConfig;
pub use pc_config::{CliOverrides, PcConfig};
pub use skeleton_config::{SkeletonConfig, SkeletonMethod};
