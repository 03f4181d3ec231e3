//! Error handling for pcalg.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod oracle_error;
pub mod orientation_error;
pub mod pc_error;

pub use config_error::ConfigError;
pub use error_code::PcErrorCode;
pub use graph_error::GraphError;
pub use oracle_error::OracleError;
pub use orientation_error::OrientationError;
pub use pc_error::{PcError, PcResult};
