//! In-process event bus for local dev and tests.
//!
//! Built on a broadcast channel. The bus emulates the delay the external
//! bus would apply: `send` resolves immediately with a receipt, and
//! delayed events are published once their delay elapses.

use std::sync::Arc;
use std::time::Duration;

use task_core::TaskTriggerEvent;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::config::EventBusConfig;
use crate::plugin::TransportPlugin;
use crate::transport::{DeliveryReceipt, SendFuture, TransportError, TriggerTransport};

/// Name the memory transport plugin is registered under.
pub const MEMORY_TRANSPORT: &str = "memory-event-bus";

const CHANNEL_CAPACITY: usize = 1024;

/// Transport publishing trigger events on an in-process broadcast bus.
pub struct MemoryEventBusTransport {
    tx: broadcast::Sender<TaskTriggerEvent>,
    // Held so publishing succeeds before the first subscriber attaches.
    _keepalive: broadcast::Receiver<TaskTriggerEvent>,
}

impl MemoryEventBusTransport {
    /// Create a new in-process bus.
    pub fn new() -> Self {
        let (tx, keepalive) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            _keepalive: keepalive,
        }
    }

    /// Subscribe to the events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<TaskTriggerEvent> {
        self.tx.subscribe()
    }
}

impl Default for MemoryEventBusTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerTransport for MemoryEventBusTransport {
    fn name(&self) -> &str {
        MEMORY_TRANSPORT
    }

    fn send(&self, event: &TaskTriggerEvent) -> SendFuture<'_> {
        let event = event.clone();
        Box::pin(async move {
            let event_id = Ulid::new().to_string();
            if event.is_immediate() {
                self.tx
                    .send(event)
                    .map_err(|_| TransportError::Closed)?;
            } else {
                let tx = self.tx.clone();
                let delay = Duration::from_secs(event.delay_seconds as u64);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if tx.send(event).is_err() {
                        tracing::warn!("delayed trigger event dropped: bus closed");
                    }
                });
            }
            Ok(DeliveryReceipt::new(MEMORY_TRANSPORT, Some(event_id)))
        })
    }
}

/// Plugin exposing a shared in-process bus.
///
/// All transports created by one plugin instance publish to the same
/// bus, so subscribers obtained from [`MemoryEventBusPlugin::bus`] see
/// every event.
pub struct MemoryEventBusPlugin {
    bus: Arc<MemoryEventBusTransport>,
}

impl Default for MemoryEventBusPlugin {
    fn default() -> Self {
        Self {
            bus: Arc::new(MemoryEventBusTransport::new()),
        }
    }
}

impl MemoryEventBusPlugin {
    /// The shared bus behind this plugin.
    pub fn bus(&self) -> Arc<MemoryEventBusTransport> {
        self.bus.clone()
    }
}

impl TransportPlugin for MemoryEventBusPlugin {
    fn name(&self) -> &str {
        MEMORY_TRANSPORT
    }

    fn create_transport(
        &self,
        _config: &EventBusConfig,
    ) -> Result<Arc<dyn TriggerTransport>, TransportError> {
        Ok(self.bus.clone())
    }
}
