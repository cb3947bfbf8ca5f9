//! # Simple tracing-backed observer for debugging and demos.
//!
//! [`LogObserver`] implements all three observer traits and logs every event
//! through `tracing`. Register one instance on whichever channels you want
//! traced.
//!
//! Not intended for production use - implement your own observers for
//! structured output or metrics collection.

use async_trait::async_trait;
use tracing::info;

use crate::messages::{FlowId, ParsedMessage, TranslatedMessage};

use super::{FlowsObserver, MessageObserver, TranslatedObserver};

/// Logs relay events at `info` level.
///
/// Enabled via the `logging` feature.
pub struct LogObserver;

#[async_trait]
impl FlowsObserver for LogObserver {
    async fn on_flows_changed(&self, flows: &[FlowId]) {
        info!(?flows, "active flows changed");
    }
}

#[async_trait]
impl MessageObserver for LogObserver {
    async fn on_message(&self, flow: &FlowId, msg: &ParsedMessage) {
        info!(%flow, seq = msg.seq, method = %msg.method, "message received");
    }
}

#[async_trait]
impl TranslatedObserver for LogObserver {
    async fn on_translated(&self, flow: &FlowId, msg: &TranslatedMessage) {
        info!(%flow, data = %msg.0, "message translated");
    }
}
