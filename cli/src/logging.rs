//! Diagnostic logging setup.
//!
//! Diagnostics are `tracing` events written to stderr, separate from the
//! user-facing lines printed through `OutputContext`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive that overrides `-v`.
pub const LOG_ENV: &str = "NOMAD_LOG";

/// Filter directive used when `NOMAD_LOG` is unset or invalid.
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .try_init();
}
