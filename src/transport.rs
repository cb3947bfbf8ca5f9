//! # External collaborator seams: transport, decoder, translator.
//!
//! The relay itself never talks to the wire. Three traits mark the seams:
//!
//! - [`Transport`] — the remote polling client (async: real transports do
//!   I/O). Only [`Transport::ping`] is fallible; an empty message queue is
//!   `None`, not an error.
//! - [`Decode`] — pure function from a raw payload to a structured record,
//!   or `None` when the payload is not domain-relevant.
//! - [`Translate`] — stateful per-flow translator. One boxed instance is
//!   created per flow through a [`TranslatorFactory`] and dropped with it.
//!
//! Blanket impls let plain closures serve as decoders and translators, so a
//! stateful translator can be a `FnMut` closure capturing its own context.
//!
//! ## Example
//! ```rust
//! use flowrelay::{Decode, FlowId, MessageKind, ParsedMessage};
//!
//! let decoder = |_flow: &FlowId, payload: &[u8]| {
//!     if payload.is_empty() {
//!         return None; // not domain-relevant
//!     }
//!     Some(ParsedMessage {
//!         seq: 0,
//!         kind: MessageKind::Notify,
//!         method: "heartbeat".into(),
//!         data: serde_json::Value::Null,
//!     })
//! };
//! assert!(decoder.parse(&FlowId::new("f1"), b"").is_none());
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::messages::{FlowId, ParsedMessage, RawMessage, TranslatedMessage};

/// # Remote polling client.
///
/// Implementations hold whatever connection state they need; all methods
/// take `&self` because the relay drives them from a single task.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Liveness probe. The relay retries this with a fixed delay during
    /// connection establishment.
    async fn ping(&self) -> Result<(), TransportError>;

    /// The current session set as the transport sees it, in the transport's
    /// own order. Compared by value between cycles.
    async fn list_active_flows(&self) -> Vec<FlowId>;

    /// The next buffered raw payload for `flow`, or `None` if nothing is
    /// pending right now.
    async fn next_message(&self, flow: &FlowId) -> Option<RawMessage>;
}

/// # Payload decoder.
///
/// Pure: same payload, same result. Returns `None` for payloads that are
/// recognized but irrelevant *and* for malformed ones — the relay does not
/// distinguish the two.
pub trait Decode: Send + Sync + 'static {
    /// Decodes one payload into a structured record, or `None`.
    fn parse(&self, flow: &FlowId, payload: &[u8]) -> Option<ParsedMessage>;
}

impl<F> Decode for F
where
    F: Fn(&FlowId, &[u8]) -> Option<ParsedMessage> + Send + Sync + 'static,
{
    fn parse(&self, flow: &FlowId, payload: &[u8]) -> Option<ParsedMessage> {
        self(flow, payload)
    }
}

/// # Stateful per-flow translator.
///
/// Accumulates internal context across calls for one flow; `None` means "no
/// output for this input" (e.g. still gathering state), which is normal.
pub trait Translate: Send + 'static {
    /// Feeds one structured record in; possibly produces domain output.
    fn input(&mut self, msg: &ParsedMessage) -> Option<TranslatedMessage>;
}

impl<F> Translate for F
where
    F: FnMut(&ParsedMessage) -> Option<TranslatedMessage> + Send + 'static,
{
    fn input(&mut self, msg: &ParsedMessage) -> Option<TranslatedMessage> {
        self(msg)
    }
}

/// Creates one fresh translator per flow. Invoked by the registry whenever a
/// flow becomes active; the instance is dropped when the flow disappears.
pub type TranslatorFactory = Arc<dyn Fn() -> Box<dyn Translate> + Send + Sync>;
