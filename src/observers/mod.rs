//! # Typed observers and their fan-out bus.
//!
//! Three independent channels, distinguished by payload shape:
//! - [`FlowsObserver`] — the active flow set changed;
//! - [`MessageObserver`] — a structured message was decoded;
//! - [`TranslatedObserver`] — a translator produced domain output.
//!
//! [`ObserverBus`] holds the registered observers and dispatches to each
//! channel **sequentially, in registration order, on the relay's own task**.
//! There is deliberately no isolation: a slow observer slows the relay and a
//! panicking one takes it down.

mod bus;
mod observer;

#[cfg(feature = "logging")]
mod log;

pub use bus::ObserverBus;
pub use observer::{FlowsObserver, MessageObserver, TranslatedObserver};

#[cfg(feature = "logging")]
pub use log::LogObserver;
