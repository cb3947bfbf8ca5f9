//! # Observer traits, one per event channel.
//!
//! An observer registers on exactly one channel and holds no relay state of
//! its own; it receives read-only views of the relay's records. One type may
//! implement several of these traits and be registered on several channels.

use async_trait::async_trait;

use crate::messages::{FlowId, ParsedMessage, TranslatedMessage};

/// Notified when the active flow set changes.
///
/// # Example
/// ```rust
/// use async_trait::async_trait;
/// use flowrelay::{FlowId, FlowsObserver};
///
/// struct Printer;
///
/// #[async_trait]
/// impl FlowsObserver for Printer {
///     async fn on_flows_changed(&self, flows: &[FlowId]) {
///         println!("active: {flows:?}");
///     }
/// }
/// ```
#[async_trait]
pub trait FlowsObserver: Send + Sync + 'static {
    /// Called once per reconciliation that changed the set, with the new
    /// active set in transport order.
    async fn on_flows_changed(&self, flows: &[FlowId]);
}

/// Notified for every successfully decoded message.
#[async_trait]
pub trait MessageObserver: Send + Sync + 'static {
    /// Called once per decoded record, before the translator sees it.
    async fn on_message(&self, flow: &FlowId, msg: &ParsedMessage);
}

/// Notified for every translator output.
#[async_trait]
pub trait TranslatedObserver: Send + Sync + 'static {
    /// Called once per non-empty translator result.
    async fn on_translated(&self, flow: &FlowId, msg: &TranslatedMessage);
}
