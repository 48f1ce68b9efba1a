//! Tracing/logging initialization.
//!
//! Both formats honour `RUST_LOG`; the argument is only the fallback filter.

use tracing_subscriber::EnvFilter;

fn filter_or(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// JSON logs + timestamps. Safe to call multiple times (subsequent calls are no-ops).
pub fn init_json(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or(default_directive))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Compact single-line logs on stderr, so stdout stays clean for command output.
pub fn init_compact(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or(default_directive))
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
