//! Tracing initialization and span helpers.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Environment variable holding per-target filter directives,
/// e.g. `PCALG_LOG=pcalg_causal=debug,pcalg_citest=warn`.
pub const LOG_ENV: &str = "PCALG_LOG";

/// Initialize the tracing subscriber.
///
/// `PCALG_LOG` takes precedence over `config.log_level`. Idempotent; if the host
/// already installed a global subscriber, that one is kept.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let registry = tracing_subscriber::registry().with(filter);
        let _ = if config.json {
            registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
    });
}

/// Create the span wrapping a skeleton search.
#[macro_export]
macro_rules! skeleton_span {
    ($variables:expr, $method:expr) => {
        tracing::info_span!("pc.skeleton", variables = $variables, method = ?$method)
    };
}

/// Create the span wrapping the orientation phase.
#[macro_export]
macro_rules! orientation_span {
    ($edges:expr) => {
        tracing::info_span!("pc.orientation", edges = $edges)
    };
}
