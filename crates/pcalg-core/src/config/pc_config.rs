//! Top-level configuration with layered resolution.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ObservabilityConfig, OrientationConfig, SkeletonConfig, SkeletonMethod};
use crate::constants::{CONFIG_FILE_NAME, ENV_PREFIX, LOG_LEVELS};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PCALG_*`)
/// 3. Project config (`pcalg.toml` in the given root)
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PcConfig {
    pub skeleton: SkeletonConfig,
    pub orientation: OrientationConfig,
    pub observability: ObservabilityConfig,
}

/// Override arguments a host can apply on top of file and environment config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub method: Option<SkeletonMethod>,
    pub max_level: Option<usize>,
    pub parallel: Option<bool>,
    pub max_tests: Option<u64>,
    pub apply_rule4: Option<bool>,
    pub log_level: Option<String>,
}

impl PcConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(CONFIG_FILE_NAME);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load a single TOML file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &PcConfig) -> Result<(), ConfigError> {
        if config.skeleton.parallel && config.skeleton.method != SkeletonMethod::Stable {
            return Err(ConfigError::ValidationFailed {
                field: "skeleton.parallel".to_string(),
                message: "parallel testing requires the stable method".to_string(),
            });
        }
        if config.skeleton.max_tests == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "skeleton.max_tests".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let level = config.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!("must be one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }

    /// `PCALG_SKELETON_METHOD`, `PCALG_SKELETON_MAX_LEVEL`, and so on.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut PcConfig) {
        if let Some(v) = env_value("SKELETON_METHOD") {
            config.skeleton.method = v;
        }
        if let Some(v) = env_value("SKELETON_MAX_LEVEL") {
            config.skeleton.max_level = Some(v);
        }
        if let Some(v) = env_value("SKELETON_PARALLEL") {
            config.skeleton.parallel = v;
        }
        if let Some(v) = env_value("SKELETON_MAX_TESTS") {
            config.skeleton.max_tests = Some(v);
        }
        if let Some(v) = env_value("ORIENTATION_APPLY_RULE4") {
            config.orientation.apply_rule4 = v;
        }
        if let Some(v) = env_value("LOG_LEVEL") {
            config.observability.log_level = v;
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_cli_overrides(config: &mut PcConfig, cli: &CliOverrides) {
        if let Some(v) = cli.method {
            config.skeleton.method = v;
        }
        if let Some(v) = cli.max_level {
            config.skeleton.max_level = Some(v);
        }
        if let Some(v) = cli.parallel {
            config.skeleton.parallel = v;
        }
        if let Some(v) = cli.max_tests {
            config.skeleton.max_tests = Some(v);
        }
        if let Some(v) = cli.apply_rule4 {
            config.orientation.apply_rule4 = v;
        }
        if let Some(ref v) = cli.log_level {
            config.observability.log_level = v.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_value<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(format!("{ENV_PREFIX}{name}"))
        .ok()?
        .parse()
        .ok()
}
