//! Tracing setup shared by both binaries.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter. Falls back to `RUST_LOG`.
pub const LOG_ENV: &str = "LINKSHELF_LOG";

/// Installs a stderr `fmt` subscriber. Stdout is reserved for program output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
