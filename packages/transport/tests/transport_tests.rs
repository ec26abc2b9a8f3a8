#![allow(clippy::disallowed_methods)]

use std::sync::Arc;

use task_core::{DefinitionId, Locale, TaskId, TaskRef, TaskTriggerEvent, Tenant};
use task_transport::{
    DeliveryReceipt, EventBusConfig, HTTP_TRANSPORT, MEMORY_TRANSPORT, MemoryEventBusPlugin,
    SendFuture, TransportError, TransportPlugin, TriggerTransport,
    builtin_registry,
};

fn sample_event(delay_seconds: i64) -> TaskTriggerEvent {
    let task = TaskRef::new(TaskId::new(), DefinitionId::new("export-pages").unwrap());
    TaskTriggerEvent::new(&task, Tenant::new("acme"), Locale::new("en-US"), delay_seconds)
}

#[tokio::test]
async fn memory_bus_delivers_to_subscribers() {
    let plugin = MemoryEventBusPlugin::default();
    let bus = plugin.bus();
    let transport = plugin.create_transport(&EventBusConfig::memory()).unwrap();
    let mut rx = bus.subscribe();

    let event = sample_event(0);
    let receipt = transport.send(&event).await.unwrap();
    assert_eq!(receipt.transport, MEMORY_TRANSPORT);
    assert!(receipt.event_id.is_some());

    let received = rx.recv().await.unwrap();
    assert_eq!(received, event);
}

#[tokio::test]
async fn memory_bus_accepts_events_without_subscribers() {
    let plugin = MemoryEventBusPlugin::default();
    let transport = plugin.create_transport(&EventBusConfig::memory()).unwrap();

    let receipt = transport.send(&sample_event(0)).await;
    assert!(receipt.is_ok());
}

#[tokio::test(start_paused = true)]
async fn delayed_send_resolves_before_the_delay_elapses() {
    let plugin = MemoryEventBusPlugin::default();
    let bus = plugin.bus();
    let transport = plugin.create_transport(&EventBusConfig::memory()).unwrap();
    let mut rx = bus.subscribe();

    let event = sample_event(30);
    let receipt = transport.send(&event).await.unwrap();
    assert!(receipt.event_id.is_some());

    // The receipt is in hand but the event is still held by the bus.
    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));

    // Paused-clock auto-advance runs the delay out.
    let received = rx.recv().await.unwrap();
    assert_eq!(received, event);
}

#[tokio::test]
async fn transports_created_by_one_memory_plugin_share_the_bus() {
    let plugin = MemoryEventBusPlugin::default();
    let first = plugin.create_transport(&EventBusConfig::memory()).unwrap();
    let second = plugin.create_transport(&EventBusConfig::memory()).unwrap();
    let mut rx = plugin.bus().subscribe();

    first.send(&sample_event(0)).await.unwrap();
    second.send(&sample_event(0)).await.unwrap();

    assert!(rx.recv().await.is_ok());
    assert!(rx.recv().await.is_ok());
}

#[test]
fn builtin_registry_resolves_both_backends() {
    let registry = builtin_registry();
    assert!(registry.contains(MEMORY_TRANSPORT));
    assert!(registry.contains(HTTP_TRANSPORT));
    assert_eq!(registry.names().len(), 2);

    let memory = registry
        .create(MEMORY_TRANSPORT, &EventBusConfig::memory())
        .unwrap();
    assert_eq!(memory.name(), MEMORY_TRANSPORT);

    let http = registry
        .create(HTTP_TRANSPORT, &EventBusConfig::http("https://bus.internal/events"))
        .unwrap();
    assert_eq!(http.name(), HTTP_TRANSPORT);
}

#[test]
fn config_backend_selects_the_builtin_plugin() {
    assert_eq!(
        EventBusConfig::memory().builtin_plugin_name(),
        MEMORY_TRANSPORT
    );
    assert_eq!(
        EventBusConfig::http("https://bus.internal/events").builtin_plugin_name(),
        HTTP_TRANSPORT
    );
}

#[test]
fn unknown_plugin_name_fails() {
    let registry = builtin_registry();
    let err = registry
        .create("kafka-event-bus", &EventBusConfig::memory())
        .unwrap_err();
    assert!(matches!(err, TransportError::InvalidConfig(_)));
}

struct RecordingTransport;

impl TriggerTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    fn send(&self, _event: &TaskTriggerEvent) -> SendFuture<'_> {
        Box::pin(async { Ok(DeliveryReceipt::new("recording", None)) })
    }
}

struct RecordingPlugin;

impl TransportPlugin for RecordingPlugin {
    fn name(&self) -> &str {
        MEMORY_TRANSPORT
    }

    fn create_transport(
        &self,
        _config: &EventBusConfig,
    ) -> Result<Arc<dyn TriggerTransport>, TransportError> {
        Ok(Arc::new(RecordingTransport))
    }
}

#[test]
fn last_registration_wins() {
    let mut registry = builtin_registry();
    registry.register(RecordingPlugin);

    let transport = registry
        .create(MEMORY_TRANSPORT, &EventBusConfig::memory())
        .unwrap();
    assert_eq!(transport.name(), "recording");
}
