//! # Relay control loop.
//!
//! [`Relay`] is the cooperative scheduler that drives everything else:
//!
//! ```text
//! start()
//!   │
//!   ├─ Connecting: ConnectionSupervisor::establish()
//!   │      └─ exhausted → return Err (never enters Polling)
//!   │
//!   └─ Polling: loop {
//!        ├─ stop token observed at the TOP of the iteration → Stopped
//!        ├─ reconcile(transport.list_active_flows())
//!        ├─ for each active flow: pipeline.drain(flow)   (exhaustive)
//!        └─ sleep(refresh_interval)
//!      }
//! ```
//!
//! Everything runs on the one task that awaits [`Relay::start`]; the two
//! suspension points are the connect backoff and the inter-cycle sleep.
//! [`RelayHandle::stop`] cancels a token that is only checked between
//! cycles, so a stop request never interrupts a reconcile-and-drain pass
//! already in progress.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::RelayConfig;
use crate::core::connect::{ConnectionSupervisor, PING_RETRY_DELAY};
use crate::core::pipeline::MessagePipeline;
use crate::core::registry::FlowRegistry;
use crate::error::RelayError;
use crate::messages::FlowId;
use crate::observers::{FlowsObserver, MessageObserver, ObserverBus, TranslatedObserver};
use crate::transport::{Decode, Transport, TranslatorFactory};

/// Lifecycle phase of the relay. There is no way back to `Connecting`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayState {
    /// Establishing transport liveness.
    Connecting,
    /// Reconcile-and-drain cycles are running.
    Polling,
    /// Terminal; the stop token was observed.
    Stopped,
}

/// Cheap cloneable handle for requesting a cooperative stop.
#[derive(Clone)]
pub struct RelayHandle {
    stop: CancellationToken,
}

impl RelayHandle {
    /// Requests a stop and returns immediately.
    ///
    /// The relay finishes the pass currently in progress before observing
    /// the flag, so actual termination is eventual, not immediate.
    pub fn stop(&self) {
        self.stop.cancel();
    }
}

/// The relay orchestrator: flow lifecycle, message pipeline, observers.
pub struct Relay {
    cfg: RelayConfig,
    transport: Arc<dyn Transport>,
    pipeline: MessagePipeline,
    registry: FlowRegistry,
    translators: TranslatorFactory,
    bus: ObserverBus,
    stop: CancellationToken,
    state: RelayState,
}

impl Relay {
    /// Wires up a relay from its collaborators. Nothing runs until
    /// [`start`](Relay::start).
    pub fn new(
        cfg: RelayConfig,
        transport: Arc<dyn Transport>,
        decoder: Arc<dyn Decode>,
        translators: TranslatorFactory,
    ) -> Self {
        let pipeline = MessagePipeline::new(Arc::clone(&transport), decoder);
        Self {
            cfg,
            transport,
            pipeline,
            registry: FlowRegistry::new(),
            translators,
            bus: ObserverBus::new(),
            stop: CancellationToken::new(),
            state: RelayState::Connecting,
        }
    }

    /// Returns a stop handle; valid before and during [`start`](Relay::start).
    pub fn handle(&self) -> RelayHandle {
        RelayHandle {
            stop: self.stop.clone(),
        }
    }

    /// Current lifecycle phase.
    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Read-only view of the active flows and their message logs.
    pub fn registry(&self) -> &FlowRegistry {
        &self.registry
    }

    /// Registers an observer on the flow-set channel.
    pub fn observe_flows(&mut self, observer: Arc<dyn FlowsObserver>) {
        self.bus.register_flows(observer);
    }

    /// Registers an observer on the decoded-message channel.
    pub fn observe_messages(&mut self, observer: Arc<dyn MessageObserver>) {
        self.bus.register_messages(observer);
    }

    /// Registers an observer on the translated-message channel.
    pub fn observe_translated(&mut self, observer: Arc<dyn TranslatedObserver>) {
        self.bus.register_translated(observer);
    }

    /// Runs the relay until stopped.
    ///
    /// Establishes the connection first; if the retry budget is exhausted
    /// the error propagates and polling never starts. Afterwards the loop
    /// checks the stop token only at the top of each iteration.
    pub async fn start(&mut self) -> Result<(), RelayError> {
        info!("starting relay");
        self.state = RelayState::Connecting;
        ConnectionSupervisor::new(self.cfg.max_ping_attempts, PING_RETRY_DELAY)
            .establish(self.transport.as_ref())
            .await?;
        info!("transport connected; polling");
        self.state = RelayState::Polling;

        while !self.stop.is_cancelled() {
            self.cycle().await;
            tokio::time::sleep(self.cfg.refresh_interval()).await;
        }

        info!("relay stopped");
        self.state = RelayState::Stopped;
        Ok(())
    }

    /// One full pass: reconcile the active set, then drain every flow in it.
    async fn cycle(&mut self) {
        let reported = self.transport.list_active_flows().await;
        self.registry
            .reconcile(reported, &self.translators, &self.bus)
            .await;

        let flows: Vec<FlowId> = self.registry.active().to_vec();
        for flow in &flows {
            if let Some(state) = self.registry.state_mut(flow) {
                self.pipeline.drain(flow, state, &self.bus).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::messages::{MessageKind, ParsedMessage, RawMessage, TranslatedMessage};
    use crate::transport::Translate;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Reports a fixed flow set and a scripted message queue per flow.
    struct ScriptTransport {
        flows: Vec<FlowId>,
        queue: Mutex<VecDeque<RawMessage>>,
        ping_ok: bool,
    }

    impl ScriptTransport {
        fn new(flows: Vec<FlowId>, messages: Vec<RawMessage>) -> Self {
            Self {
                flows,
                queue: Mutex::new(messages.into()),
                ping_ok: true,
            }
        }

        fn unreachable_transport() -> Self {
            Self {
                flows: Vec::new(),
                queue: Mutex::new(VecDeque::new()),
                ping_ok: false,
            }
        }
    }

    #[async_trait]
    impl Transport for ScriptTransport {
        async fn ping(&self) -> Result<(), TransportError> {
            if self.ping_ok {
                Ok(())
            } else {
                Err(TransportError::Connect {
                    error: "refused".into(),
                })
            }
        }

        async fn list_active_flows(&self) -> Vec<FlowId> {
            self.flows.clone()
        }

        async fn next_message(&self, flow: &FlowId) -> Option<RawMessage> {
            let mut queue = self.queue.lock().unwrap();
            if queue.front().is_some_and(|raw| raw.flow == *flow) {
                queue.pop_front()
            } else {
                None
            }
        }
    }

    /// Stops the relay as soon as a translated message is published.
    struct StopOnTranslated {
        handle: RelayHandle,
    }

    #[async_trait]
    impl TranslatedObserver for StopOnTranslated {
        async fn on_translated(&self, _flow: &FlowId, _msg: &TranslatedMessage) {
            self.handle.stop();
        }
    }

    fn record(seq: u32) -> ParsedMessage {
        ParsedMessage {
            seq,
            kind: MessageKind::Notify,
            method: "action".into(),
            data: serde_json::json!({ "seq": seq }),
        }
    }

    fn byte_decoder() -> Arc<dyn Decode> {
        Arc::new(|_flow: &FlowId, payload: &[u8]| {
            let first = *payload.first()?;
            (first != 0xff).then(|| record(first as u32))
        })
    }

    fn echo_factory() -> TranslatorFactory {
        Arc::new(|| -> Box<dyn Translate> {
            Box::new(|msg: &ParsedMessage| Some(TranslatedMessage(msg.data.clone())))
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_failure_aborts_startup() {
        let cfg = RelayConfig {
            max_ping_attempts: 2,
            ..RelayConfig::default()
        };
        let transport = Arc::new(ScriptTransport::unreachable_transport());
        let mut relay = Relay::new(cfg, transport, byte_decoder(), echo_factory());

        let err = relay.start().await.unwrap_err();
        assert!(matches!(
            err,
            RelayError::ConnectExhausted { attempts: 3, .. }
        ));
        // Never reached polling.
        assert_eq!(relay.state(), RelayState::Connecting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_start_never_polls() {
        let f1 = FlowId::new("f1");
        let transport = Arc::new(ScriptTransport::new(
            vec![f1.clone()],
            vec![RawMessage::new(f1.clone(), vec![1])],
        ));
        let mut relay = Relay::new(
            RelayConfig::default(),
            transport,
            byte_decoder(),
            echo_factory(),
        );
        relay.handle().stop();

        relay.start().await.unwrap();
        assert_eq!(relay.state(), RelayState::Stopped);
        // The loop body never ran, so the flow was never registered.
        assert!(relay.registry().active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_relay_end_to_end() {
        let f1 = FlowId::new("f1");
        let transport = Arc::new(ScriptTransport::new(
            vec![f1.clone()],
            vec![
                RawMessage::new(f1.clone(), vec![1]),
                RawMessage::new(f1.clone(), vec![0xff]),
            ],
        ));
        let mut relay = Relay::new(
            RelayConfig::default(),
            transport,
            byte_decoder(),
            echo_factory(),
        );
        relay.observe_translated(Arc::new(StopOnTranslated {
            handle: relay.handle(),
        }));

        let relay = tokio::spawn(async move {
            relay.start().await.expect("relay run");
            relay
        })
        .await
        .unwrap();

        assert_eq!(relay.state(), RelayState::Stopped);
        let registry = relay.registry();
        assert_eq!(registry.active(), &[f1.clone()]);
        assert_eq!(registry.raw_log(&f1).unwrap().len(), 2);
        assert_eq!(registry.parsed_log(&f1).unwrap(), &[record(1)]);
        assert_eq!(
            registry.translated_log(&f1).unwrap(),
            &[TranslatedMessage(record(1).data)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_completes_current_pass() {
        // Both messages are queued before the stop request lands, and the
        // drain loop is exhaustive, so one cycle processes them all.
        let f1 = FlowId::new("f1");
        let transport = Arc::new(ScriptTransport::new(
            vec![f1.clone()],
            vec![
                RawMessage::new(f1.clone(), vec![1]),
                RawMessage::new(f1.clone(), vec![2]),
            ],
        ));
        let mut relay = Relay::new(
            RelayConfig::default(),
            transport,
            byte_decoder(),
            echo_factory(),
        );
        relay.observe_translated(Arc::new(StopOnTranslated {
            handle: relay.handle(),
        }));

        let relay = tokio::spawn(async move {
            relay.start().await.expect("relay run");
            relay
        })
        .await
        .unwrap();

        // The stop was requested on the first translated message, but the
        // in-progress pass still drained the second one.
        assert_eq!(relay.registry().parsed_log(&f1).unwrap().len(), 2);
    }
}
