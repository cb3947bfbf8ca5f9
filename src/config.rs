//! # Relay configuration.
//!
//! [`RelayConfig`] centralizes the two polling knobs:
//! - `max_ping_attempts`: retry budget for connection establishment;
//! - `refresh_interval_secs`: delay between polling cycles.
//!
//! [`load_or_default`] makes first-run behavior explicit: an existing file is
//! parsed strictly (unknown fields are fatal, no migration), a missing file
//! is created with the defaults. Call it once at process start and pass the
//! result down; there is no ambient global.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Polling configuration for the relay.
///
/// ## Field semantics
/// - `max_ping_attempts`: number of *retries* after the initial liveness
///   probe fails; the total probe count is `max_ping_attempts + 1`.
/// - `refresh_interval_secs`: seconds slept between polling cycles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Retry budget for connection establishment.
    pub max_ping_attempts: u32,
    /// Inter-cycle delay in seconds.
    pub refresh_interval_secs: f64,
}

impl Default for RelayConfig {
    /// Defaults: `max_ping_attempts = 10`, `refresh_interval_secs = 0.05`.
    fn default() -> Self {
        Self {
            max_ping_attempts: 10,
            refresh_interval_secs: 0.05,
        }
    }
}

impl RelayConfig {
    /// The inter-cycle delay as a [`Duration`].
    ///
    /// Non-finite or negative values collapse to zero rather than panic.
    pub fn refresh_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.refresh_interval_secs).unwrap_or(Duration::ZERO)
    }
}

/// Loads configuration from `path`, or creates the file with defaults.
///
/// - Existing file: parsed strictly. A shape mismatch (unknown or malformed
///   fields) returns [`ConfigError::Stale`], whose message instructs the
///   operator to delete the file — there is no automatic migration.
/// - Missing file: the defaults are written back (parent directories are
///   created) and returned.
pub fn load_or_default(path: &Path) -> Result<RelayConfig, ConfigError> {
    if path.exists() {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = serde_json::from_str(&text).map_err(|source| ConfigError::Stale {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        return Ok(cfg);
    }

    let cfg = RelayConfig::default();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    let text = serde_json::to_string_pretty(&cfg)
        .map_err(|source| ConfigError::Encode { source })?;
    fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "wrote default config");
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RelayConfig::default();
        assert_eq!(cfg.max_ping_attempts, 10);
        assert_eq!(cfg.refresh_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_refresh_interval_never_panics() {
        let cfg = RelayConfig {
            refresh_interval_secs: -1.0,
            ..RelayConfig::default()
        };
        assert_eq!(cfg.refresh_interval(), Duration::ZERO);

        let cfg = RelayConfig {
            refresh_interval_secs: f64::NAN,
            ..RelayConfig::default()
        };
        assert_eq!(cfg.refresh_interval(), Duration::ZERO);
    }

    #[test]
    fn test_load_creates_file_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs").join("relay.json");

        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg, RelayConfig::default());
        assert!(path.exists());

        // Second load reads the persisted file.
        let again = load_or_default(&path).unwrap();
        assert_eq!(again, cfg);
    }

    #[test]
    fn test_load_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.json");
        fs::write(&path, r#"{ "max_ping_attempts": 3 }"#).unwrap();

        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg.max_ping_attempts, 3);
        assert_eq!(cfg.refresh_interval_secs, 0.05);
    }

    #[test]
    fn test_stale_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.json");
        fs::write(&path, r#"{ "max_ping_count": 3 }"#).unwrap();

        let err = load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Stale { .. }));
        assert!(err.to_string().contains("delete it manually"));
    }
}
