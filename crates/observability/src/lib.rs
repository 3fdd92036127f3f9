//! Tracing/logging setup shared by hosts embedding the engine.
//!
//! The engine itself only emits `tracing` events (appends, regulator
//! findings, recovery); wiring a subscriber is the host's call. These
//! helpers cover the common cases.

use tracing_subscriber::EnvFilter;

/// Initialize JSON logging for a long-running host, filtered by
/// `RUST_LOG` (default `info`).
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with_default_filter("info");
}

/// Like [`init`], with an explicit fallback filter directive for when
/// `RUST_LOG` is unset. Useful for simulation drivers that want
/// `spincycle_engine=debug` without touching the environment.
pub fn init_with_default_filter(directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Compact human-readable output for tests and local runs.
pub fn init_for_tests() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_test_writer()
        .try_init();
}
