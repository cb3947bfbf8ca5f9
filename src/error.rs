//! Error types used by the relay and its collaborators.
//!
//! Three enums cover the three failure surfaces:
//!
//! - [`TransportError`] — raised by [`Transport`](crate::Transport)
//!   implementations (only the liveness probe is fallible).
//! - [`ConfigError`] — configuration loading/persistence failures.
//! - [`RelayError`] — errors surfaced to the caller of
//!   [`Relay::start`](crate::Relay::start).

use std::path::PathBuf;

use thiserror::Error;

/// # Errors raised by a transport implementation.
///
/// Decoding misses and empty message queues are *not* errors; they are
/// expressed as `None` at the trait level. Only genuine transport faults
/// surface here.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    /// The remote endpoint could not be reached.
    #[error("connection failed: {error}")]
    Connect {
        /// The underlying failure message.
        error: String,
    },

    /// A request reached the endpoint but failed.
    #[error("request failed: {error}")]
    Request {
        /// The underlying failure message.
        error: String,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::Connect { .. } => "transport_connect",
            TransportError::Request { .. } => "transport_request",
        }
    }
}

/// # Errors raised while loading or persisting configuration.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config {}: {source}", path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file exists but no longer matches the expected shape.
    ///
    /// There is no automatic migration; the operator must delete the file.
    #[error("config file {} is outdated; delete it manually and restart", path.display())]
    Stale {
        /// Path of the configuration file.
        path: PathBuf,
        /// The parse failure that revealed the mismatch.
        #[source]
        source: serde_json::Error,
    },

    /// Default configuration could not be encoded for first-run persistence.
    #[error("failed to encode default config: {source}")]
    Encode {
        /// The underlying serialization failure.
        #[source]
        source: serde_json::Error,
    },
}

/// # Errors returned by the relay runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RelayError {
    /// The transport never answered a liveness probe within the configured
    /// attempt budget. Carries the last underlying failure.
    #[error("transport did not answer after {attempts} ping attempts")]
    ConnectExhausted {
        /// Total probes performed before giving up.
        attempts: u32,
        /// The final probe failure.
        #[source]
        source: TransportError,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
