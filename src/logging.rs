//! # Logging
//!
//! Diagnostic logging for both binaries.
//!
//! Logs go to stderr; stdout is reserved for the per-Secret status lines and
//! the printer's output so either can be piped.

use crate::constants::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// `RUST_LOG` takes precedence; otherwise [`DEFAULT_LOG_FILTER`] applies.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
