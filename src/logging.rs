//! Logging setup for the provider process.
//!
//! All logs are written to **stderr**; stdout carries the handshake line and
//! nothing else.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: log filter (e.g. `info`, `meraki_provider=debug`)
//!
//! ```bash
//! # Trace every Dashboard request the adapters make
//! RUST_LOG=meraki_provider::client=debug ./hemmer-provider-meraki
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Install the global subscriber, defaulting to `info`.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default(DEFAULT_FILTER);
}

/// Install the global subscriber with a custom default filter.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(stderr_layer())
        .init();
}

/// Install the global subscriber unless one is already set.
///
/// Returns `false` when a subscriber was already installed.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    // The global subscriber can only be set once per process, so only the
    // filter parsing is exercised here.

    use super::*;

    #[test]
    fn test_env_filter_parsing() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        assert!(EnvFilter::try_new("meraki_provider=debug").is_ok());
        assert!(EnvFilter::try_new("warn,meraki_provider::client=debug").is_ok());
    }

    #[test]
    fn test_try_init_is_idempotent() {
        let _ = try_init_logging();
        assert!(!try_init_logging());
    }
}
