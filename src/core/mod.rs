//! Relay core: orchestration and lifecycle.
//!
//! The public API from this module is [`Relay`] (with its handle and state)
//! plus the read-only [`FlowRegistry`] view.
//!
//! Internal modules:
//! - [`connect`]: connection establishment with bounded retry;
//! - [`registry`]: the active flow set and per-flow state;
//! - [`pipeline`]: per-flow receive → decode → translate → publish;
//! - [`control`]: the cooperative polling loop that drives the above.

mod connect;
mod control;
mod pipeline;
mod registry;

pub use control::{Relay, RelayHandle, RelayState};
pub use registry::FlowRegistry;
