//! Tracing subscriber setup for hosts and tests
//!
//! The evaluator only emits `tracing` events: tree construction at `debug`
//! and buffer growth at `trace`. Without the `logging` feature every
//! function here is a no-op, and installing a subscriber stays the host's job.

#[cfg(feature = "logging")]
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used by [`init_test`] when `RUST_LOG` is unset
pub const TEST_FILTER: &str = "tfx_core=trace";

/// Install a subscriber at `info`, or at whatever `RUST_LOG` asks for.
///
/// ```rust
/// tfx_core::logging::init();
/// ```
pub fn init() {
    init_with_level("info")
}

/// Install a subscriber with `level` as the fallback filter.
///
/// Calling this after a subscriber is already installed does nothing.
#[cfg(feature = "logging")]
pub fn init_with_level(level: &str) {
    let _ = fmt()
        .with_env_filter(filter_or(level))
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .try_init();
}

/// Route every `tfx_core` event, buffer growth included, to the test
/// harness's captured output. Safe to call from each test.
#[cfg(feature = "logging")]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(filter_or(TEST_FILTER))
        .with_test_writer()
        .try_init();
}

#[cfg(feature = "logging")]
fn filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

#[cfg(not(feature = "logging"))]
pub fn init_with_level(_level: &str) {}

#[cfg(not(feature = "logging"))]
pub fn init_test() {}
