//! Telemetry initialisation for the `cryptohelper` CLI.
//!
//! Structured JSON logs only, written to stderr so stdout carries nothing but
//! command output.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext or nonces** may appear in any log field.
//!   Only lengths and error codes are logged.
//! - Log level is configurable via `CRYPTOHELPER_LOG_LEVEL` (default: `warn`);
//!   `RUST_LOG` takes precedence when set.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise cryptohelper tracing subscriber: {e}"))
}
