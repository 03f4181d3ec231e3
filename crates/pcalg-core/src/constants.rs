/// Significance level used by the bundled statistical tests when none is given.
pub const DEFAULT_ALPHA: f64 = 0.01;

/// Minimum rows per degree of freedom before a G-square test is trusted.
pub const MIN_ROWS_PER_DOF: usize = 10;

/// Name of the project-level config file looked up by `PcConfig::load`.
pub const CONFIG_FILE_NAME: &str = "pcalg.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "PCALG_";

/// Log levels accepted by `ObservabilityConfig`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
