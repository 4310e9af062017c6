//! Diagnostic case pipeline: packages multi-modal patient intake into
//! durable case records, runs two-stage analysis against a local model
//! server, and persists the extracted diagnosis, success or failure,
//! under the case's directory.

pub mod config;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`, falling back to the built-in
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
