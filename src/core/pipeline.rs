//! # Per-flow message pipeline: receive → decode → translate → publish.
//!
//! [`MessagePipeline`] drains one flow at a time, exhaustively: it keeps
//! pulling raw messages until the transport reports none pending, and only
//! then does the control loop move on to the next flow.
//!
//! ```text
//!   next_message(flow) ──► raw log
//!          │
//!          ▼
//!   decode ── None ──► skip (irrelevant payload; raw log only)
//!          │
//!          ▼
//!   parsed log ──► message observers
//!          │
//!          ▼
//!   translator ── None ──► done (still accumulating context)
//!          │
//!          ▼
//!   translated log ──► translated observers
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::core::registry::FlowState;
use crate::messages::FlowId;
use crate::observers::ObserverBus;
use crate::transport::{Decode, Transport};

/// Drains, decodes, translates, and publishes messages for one flow.
pub(crate) struct MessagePipeline {
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn Decode>,
}

impl MessagePipeline {
    pub(crate) fn new(transport: Arc<dyn Transport>, decoder: Arc<dyn Decode>) -> Self {
        Self { transport, decoder }
    }

    /// Pulls raw messages for `flow` until the transport reports none.
    ///
    /// Every payload lands in the raw log; only decoder hits reach the
    /// parsed log and the message observers; only translator outputs reach
    /// the translated log and the translated observers.
    pub(crate) async fn drain(&self, flow: &FlowId, state: &mut FlowState, bus: &ObserverBus) {
        while let Some(raw) = self.transport.next_message(flow).await {
            // Decide relevance before anything touches the record's fields.
            let parsed = self.decoder.parse(flow, &raw.payload);
            state.raw.push(raw);
            let Some(parsed) = parsed else {
                continue;
            };

            debug!(%flow, seq = parsed.seq, method = %parsed.method, "message received");
            state.parsed.push(parsed.clone());
            bus.notify_message(flow, &parsed).await;

            if let Some(translated) = state.translator.input(&parsed) {
                state.translated.push(translated.clone());
                bus.notify_translated(flow, &translated).await;
            }
        }
    }
}
