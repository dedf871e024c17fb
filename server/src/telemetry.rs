//! Tracing subscriber setup for the server binary.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,todo_server=debug,tower_http=debug";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `DEFAULT_FILTER` when the variable is unset or invalid.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_target(false)
        .compact()
        .init();
}
