//! Tracing/logging setup shared by the server and the CLI.

/// Initialize server-side observability (JSON logs).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_json("info");
}

/// Initialize human-readable logging on stderr for interactive tools.
pub fn init_cli() {
    tracing::init_compact("warn");
}

/// Tracing configuration (filters, formats).
pub mod tracing;
