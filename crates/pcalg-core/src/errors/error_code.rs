//! Stable string codes for every error, for hosts that map errors onto their own surfaces.

pub const INVALID_EDGE: &str = "INVALID_EDGE";
pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const ORACLE_ERROR: &str = "ORACLE_ERROR";
pub const INCONSISTENT_SEPARATION: &str = "INCONSISTENT_SEPARATION";
pub const INCONSISTENT_ORIENTATION: &str = "INCONSISTENT_ORIENTATION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const BUDGET_EXHAUSTED: &str = "BUDGET_EXHAUSTED";
pub const CANCELLED: &str = "CANCELLED";

/// Implemented by every error enum in the workspace.
pub trait PcErrorCode {
    fn error_code(&self) -> &'static str;
}
