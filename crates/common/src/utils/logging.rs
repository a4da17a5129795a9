use std::io;

use tracing_subscriber::{fmt, EnvFilter};

/// Filter applied when `RUST_LOG` is unset: our crates and the HTTP stack at
/// info, which keeps the trace layer at one line per request.
const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// Compact human-readable logs on stdout. Safe to call more than once; later
/// calls are no-ops because a global subscriber is already installed.
pub fn init_logging_default() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Structured JSON logs on stdout for log shippers; the binary selects this
/// when `LOG_FORMAT=json`.
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}
