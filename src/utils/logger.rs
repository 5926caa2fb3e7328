//! Diagnostic logging for the benchmark
//!
//! Events go to stderr so stdout carries nothing but the report.

use tracing_subscriber::EnvFilter;

/// Filter used for every run; the process reads no environment variables.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber. Calling this more than once is harmless.
pub fn init_logging() {
    init_logging_with(DEFAULT_DIRECTIVE);
}

/// Install the global subscriber with an explicit filter directive.
pub fn init_logging_with(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // Fails only when a subscriber is already set, which is fine to keep.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
