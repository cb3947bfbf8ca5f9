//! # Message data model for the relay.
//!
//! Three record shapes flow through the pipeline, one per stage:
//! - [`RawMessage`] opaque transport payload, tagged with its [`FlowId`];
//! - [`ParsedMessage`] structured protocol record produced by a decoder;
//! - [`TranslatedMessage`] domain output produced by a per-flow translator.
//!
//! Absence ("not a relevant message", "no output yet") is always expressed
//! as `Option::None`, never as a sentinel record.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Identifier of one tracked transport session ("flow").
///
/// Opaque and value-comparable; cheap to clone (`Arc<str>` internally).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlowId(Arc<str>);

impl FlowId {
    /// Creates a flow id from anything string-like.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FlowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FlowId {
    fn from(id: String) -> Self {
        Self(id.into())
    }
}

/// Opaque byte payload as received from the transport, plus its flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMessage {
    /// The flow this payload belongs to.
    pub flow: FlowId,
    /// The undecoded wire bytes.
    pub payload: Vec<u8>,
}

impl RawMessage {
    /// Bundles a payload with its flow id.
    pub fn new(flow: FlowId, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            flow,
            payload: payload.into(),
        }
    }
}

/// Kind tag of a structured protocol record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Client-initiated call.
    Request,
    /// Reply to an earlier request.
    Response,
    /// Unsolicited server push.
    Notify,
}

/// Structured protocol record produced by a [`Decode`](crate::Decode)
/// implementation from a raw payload.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedMessage {
    /// Protocol sequence index of this record.
    pub seq: u32,
    /// Kind tag.
    pub kind: MessageKind,
    /// Protocol method name.
    pub method: String,
    /// Loosely-shaped payload data.
    pub data: Value,
}

/// Domain output produced by a per-flow [`Translate`](crate::Translate)
/// instance. Opaque to the relay; only appended to the per-flow log and
/// handed to observers.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslatedMessage(pub Value);
