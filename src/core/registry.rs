//! # Flow registry: the active set and all per-flow state.
//!
//! [`FlowRegistry`] owns one [`FlowState`] per currently active flow and
//! nothing for inactive ones. Each reconciliation compares the transport's
//! freshly reported set against the stored one **by value**; identical sets
//! short-circuit with no side effects, so observers are not renotified every
//! cycle.
//!
//! ## Rules
//! - New flows get fresh state (translator + empty logs) before vanished
//!   flows are dropped.
//! - A flow's three logs grow monotonically while it is active and are
//!   discarded atomically with it.
//! - Flow observers are notified at most once per reconciliation, with the
//!   new set.

use std::collections::HashMap;

use tracing::debug;

use crate::messages::{FlowId, ParsedMessage, RawMessage, TranslatedMessage};
use crate::observers::ObserverBus;
use crate::transport::{Translate, TranslatorFactory};

/// Per-flow state: one translator plus three append-only message logs.
pub(crate) struct FlowState {
    pub(crate) translator: Box<dyn Translate>,
    pub(crate) raw: Vec<RawMessage>,
    pub(crate) parsed: Vec<ParsedMessage>,
    pub(crate) translated: Vec<TranslatedMessage>,
}

impl FlowState {
    pub(crate) fn new(translator: Box<dyn Translate>) -> Self {
        Self {
            translator,
            raw: Vec::new(),
            parsed: Vec::new(),
            translated: Vec::new(),
        }
    }
}

/// Tracks the currently active flow set and owns all per-flow state.
///
/// Mutation happens only through [`reconcile`](FlowRegistry::reconcile) and
/// the pipeline; hosts get read access via
/// [`Relay::registry`](crate::Relay::registry).
pub struct FlowRegistry {
    active: Vec<FlowId>,
    states: HashMap<FlowId, FlowState>,
}

impl FlowRegistry {
    pub(crate) fn new() -> Self {
        Self {
            active: Vec::new(),
            states: HashMap::new(),
        }
    }

    /// Currently active flows, in the order the transport reported them.
    pub fn active(&self) -> &[FlowId] {
        &self.active
    }

    /// Raw payloads received for `flow`, or `None` if it is not active.
    pub fn raw_log(&self, flow: &FlowId) -> Option<&[RawMessage]> {
        self.states.get(flow).map(|s| s.raw.as_slice())
    }

    /// Decoded records for `flow`, or `None` if it is not active.
    pub fn parsed_log(&self, flow: &FlowId) -> Option<&[ParsedMessage]> {
        self.states.get(flow).map(|s| s.parsed.as_slice())
    }

    /// Translator outputs for `flow`, or `None` if it is not active.
    pub fn translated_log(&self, flow: &FlowId) -> Option<&[TranslatedMessage]> {
        self.states.get(flow).map(|s| s.translated.as_slice())
    }

    pub(crate) fn state_mut(&mut self, flow: &FlowId) -> Option<&mut FlowState> {
        self.states.get_mut(flow)
    }

    /// Reconciles against a freshly reported active set.
    ///
    /// Returns `false` (and does nothing) when the reported set equals the
    /// stored one. Otherwise creates state for new flows, drops state for
    /// vanished ones (creations first), stores the new set, notifies flow
    /// observers once, and returns `true`.
    pub(crate) async fn reconcile(
        &mut self,
        reported: Vec<FlowId>,
        translators: &TranslatorFactory,
        bus: &ObserverBus,
    ) -> bool {
        if self.active == reported {
            return false;
        }

        for flow in &reported {
            if !self.states.contains_key(flow) {
                self.states
                    .insert(flow.clone(), FlowState::new(translators()));
            }
        }
        self.states.retain(|flow, _| reported.contains(flow));
        self.active = reported;

        debug!(flows = ?self.active, "active flows changed");
        bus.notify_flows_changed(&self.active).await;
        true
    }
}
