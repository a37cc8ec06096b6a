//! Logging setup.
//!
//! stdout carries the protoc response, so every log line goes to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `debug` or
/// `protogen_core=trace`.
pub const LOG_ENV: &str = "PROTOC_GEN_TEMPLATE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Filter from [`LOG_ENV`], falling back to `warn`.
pub fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global stderr subscriber. Later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
