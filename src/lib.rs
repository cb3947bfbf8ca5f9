//! # flowrelay
//!
//! **flowrelay** relays messages from a polled transport session to
//! downstream consumers. It tracks concurrently active sessions ("flows"),
//! decodes each raw payload into a structured protocol record, feeds it
//! through a per-flow stateful translator, and publishes three classes of
//! events to registered observers.
//!
//! ## Architecture
//! ```text
//!              ┌───────────────────────────────────────────────┐
//!              │  Relay (control loop)                         │
//!              │  - ConnectionSupervisor (bounded ping retry)  │
//!              │  - FlowRegistry (active set + per-flow state) │
//!              │  - MessagePipeline (per-flow drain)           │
//!              │  - ObserverBus (three typed channels)         │
//!              └───────┬───────────────────────┬───────────────┘
//!                      │ polls                 │ notifies
//!                      ▼                       ▼
//!              ┌───────────────┐      ┌──────────────────────┐
//!              │  Transport    │      │ FlowsObserver        │
//!              │  (ping/list/  │      │ MessageObserver      │
//!              │   next)       │      │ TranslatedObserver   │
//!              └───────────────┘      └──────────────────────┘
//!
//! Per flow, each polling cycle:
//!   next_message ─► raw log ─► Decode ─► parsed log ─► observers
//!                                 │
//!                                 └─► Translate (stateful, per flow)
//!                                          └─► translated log ─► observers
//! ```
//!
//! ## Model
//! - **Single writer**: the registry, all per-flow state, and the transport
//!   are driven exclusively from the task awaiting [`Relay::start`]. No
//!   locks, no concurrent mutation.
//! - **Cooperative stop**: [`RelayHandle::stop`] flips a token that the loop
//!   checks only between full reconcile-and-drain passes.
//! - **Synchronous observers**: dispatched in registration order on the
//!   relay's task; a slow observer slows the relay, a panicking one takes it
//!   down. No isolation by design.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use flowrelay::{
//!     Decode, FlowId, MessageKind, ParsedMessage, RawMessage, Relay, RelayConfig,
//!     Translate, TranslatedMessage, Transport, TransportError, TranslatorFactory,
//! };
//!
//! struct Poller;
//!
//! #[async_trait]
//! impl Transport for Poller {
//!     async fn ping(&self) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//!     async fn list_active_flows(&self) -> Vec<FlowId> {
//!         vec![FlowId::new("f1")]
//!     }
//!     async fn next_message(&self, _flow: &FlowId) -> Option<RawMessage> {
//!         None
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let decoder: Arc<dyn Decode> = Arc::new(|_flow: &FlowId, _payload: &[u8]| {
//!         Some(ParsedMessage {
//!             seq: 0,
//!             kind: MessageKind::Notify,
//!             method: "noop".into(),
//!             data: serde_json::Value::Null,
//!         })
//!     });
//!     let translators: TranslatorFactory = Arc::new(|| -> Box<dyn Translate> {
//!         Box::new(|msg: &ParsedMessage| Some(TranslatedMessage(msg.data.clone())))
//!     });
//!
//!     let mut relay = Relay::new(RelayConfig::default(), Arc::new(Poller), decoder, translators);
//!     let handle = relay.handle();
//!     // call handle.stop() from elsewhere to wind the relay down
//!     relay.start().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod messages;
mod observers;
mod transport;

// ---- Public re-exports ----

pub use config::{load_or_default, RelayConfig};
pub use crate::core::{FlowRegistry, Relay, RelayHandle, RelayState};
pub use error::{ConfigError, RelayError, TransportError};
pub use messages::{FlowId, MessageKind, ParsedMessage, RawMessage, TranslatedMessage};
pub use observers::{FlowsObserver, MessageObserver, ObserverBus, TranslatedObserver};
pub use transport::{Decode, Translate, Transport, TranslatorFactory};

// Optional: a simple tracing-backed observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogObserver;
