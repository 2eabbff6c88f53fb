//! `tracing` subscriber set-up.
//!
//! Library code only emits events. The `mux-upload` binary installs the
//! subscriber once, after the settings file has been read, so the
//! `[logging]` level can apply.
//!
//! ```no_run
//! use mux_upload_core::logging::{init_tracing, LogLevel};
//!
//! init_tracing(LogLevel::Debug);
//! tracing::info!("ready");
//! ```

mod types;

pub use types::LogLevel;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides `level` when set.
///
/// Events go to stderr; stdout carries the request JSON.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level.to_tracing_level()).into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(level <= LogLevel::Debug);

    tracing_subscriber::registry().with(filter).with(layer).init();
}

/// Subscriber for unit tests, captured by the test harness.
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(LogLevel::Debug.as_filter_str())
        .with_test_writer()
        .try_init();
}
