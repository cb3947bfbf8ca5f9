//! # ObserverBus: sequential fan-out over three typed channels.
//!
//! Unlike a broadcast channel, the bus awaits every observer **in place**:
//! dispatch happens on the caller's task, in registration order, and the
//! next observer only runs once the previous one returned. That makes
//! observer effects strictly ordered relative to the pipeline, at the cost
//! of letting one observer stall everything behind it.
//!
//! ```text
//!   notify_message(flow, msg)
//!        │
//!        ├─► observer 1 .on_message(..).await
//!        ├─► observer 2 .on_message(..).await
//!        └─► observer N .on_message(..).await
//! ```

use std::sync::Arc;

use crate::messages::{FlowId, ParsedMessage, TranslatedMessage};

use super::{FlowsObserver, MessageObserver, TranslatedObserver};

/// Registered observers, one list per event channel.
///
/// Registration order is dispatch order. Multiple registrations per channel
/// are permitted and all are invoked.
#[derive(Default)]
pub struct ObserverBus {
    flows: Vec<Arc<dyn FlowsObserver>>,
    messages: Vec<Arc<dyn MessageObserver>>,
    translated: Vec<Arc<dyn TranslatedObserver>>,
}

impl ObserverBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer on the flow-set channel.
    pub fn register_flows(&mut self, observer: Arc<dyn FlowsObserver>) {
        self.flows.push(observer);
    }

    /// Registers an observer on the decoded-message channel.
    pub fn register_messages(&mut self, observer: Arc<dyn MessageObserver>) {
        self.messages.push(observer);
    }

    /// Registers an observer on the translated-message channel.
    pub fn register_translated(&mut self, observer: Arc<dyn TranslatedObserver>) {
        self.translated.push(observer);
    }

    /// Notifies all flow-set observers, in registration order.
    pub async fn notify_flows_changed(&self, flows: &[FlowId]) {
        for observer in &self.flows {
            observer.on_flows_changed(flows).await;
        }
    }

    /// Notifies all decoded-message observers, in registration order.
    pub async fn notify_message(&self, flow: &FlowId, msg: &ParsedMessage) {
        for observer in &self.messages {
            observer.on_message(flow, msg).await;
        }
    }

    /// Notifies all translated-message observers, in registration order.
    pub async fn notify_translated(&self, flow: &FlowId, msg: &TranslatedMessage) {
        for observer in &self.translated {
            observer.on_translated(flow, msg).await;
        }
    }
}
