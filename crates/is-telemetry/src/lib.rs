//! Logging initialisation for InsightStream binaries.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize human-readable logging.
///
/// Honours `RUST_LOG` when set, otherwise uses `default_level` (e.g.
/// "warn", "is_intelligence=debug,warn"). Safe to call repeatedly; later
/// calls are no-ops, which keeps tests independent of ordering.
pub fn init_logging(service_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    tracing::debug!(service = service_name, "logging initialised");
}

/// Initialize JSON logging for log shippers.
pub fn init_logging_json(service_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    tracing::debug!(service = service_name, "logging initialised (json)");
}
