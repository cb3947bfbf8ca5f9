//! # Connection establishment with bounded retry.
//!
//! [`ConnectionSupervisor`] pings the transport until it answers or the
//! retry budget runs out. The delay between probes is fixed; there is no
//! backoff growth and no wall-clock cap beyond `attempts × delay`.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::RelayError;
use crate::transport::Transport;

/// Delay between liveness probes while the transport is down.
pub(crate) const PING_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Establishes transport liveness before polling begins.
pub(crate) struct ConnectionSupervisor {
    max_retries: u32,
    retry_delay: Duration,
}

impl ConnectionSupervisor {
    pub(crate) fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Probes the transport until it answers.
    ///
    /// Performs one initial probe plus up to `max_retries` retries, so the
    /// total attempt count is `max_retries + 1`. Exhausting the budget
    /// returns [`RelayError::ConnectExhausted`] carrying the last probe
    /// failure; the caller must abort startup.
    pub(crate) async fn establish(&self, transport: &dyn Transport) -> Result<(), RelayError> {
        let mut retries = 0u32;
        loop {
            match transport.ping().await {
                Ok(()) => {
                    debug!(retries, "transport answered ping");
                    return Ok(());
                }
                Err(source) => {
                    if retries >= self.max_retries {
                        return Err(RelayError::ConnectExhausted {
                            attempts: retries + 1,
                            source,
                        });
                    }
                    retries += 1;
                    warn!(retry = retries, error = %source, "transport ping failed; retrying");
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}
