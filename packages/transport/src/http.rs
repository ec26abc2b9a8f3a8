//! HTTP event-bus transport.
//!
//! Posts a PutEvents-shaped JSON envelope to a configured endpoint and
//! interprets the entry-level result. One event per request; partial
//! failure of the single entry is a rejection.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use task_core::TaskTriggerEvent;

use crate::config::{EventBusBackend, EventBusConfig, HttpBusConfig};
use crate::plugin::TransportPlugin;
use crate::transport::{DeliveryReceipt, SendFuture, TransportError, TriggerTransport};

/// Name the HTTP transport plugin is registered under.
pub const HTTP_TRANSPORT: &str = "http-event-bus";

/// Envelope posted to the event-bus endpoint.
#[derive(Serialize)]
struct PutEventsRequest<'a> {
    entries: Vec<PutEventsEntry<'a>>,
}

/// A single event entry in the envelope.
#[derive(Serialize)]
struct PutEventsEntry<'a> {
    source: &'a str,
    detail_type: &'a str,
    event_bus: &'a str,
    detail: String,
}

/// Response returned by the event-bus endpoint.
#[derive(Default, Deserialize)]
struct PutEventsResponse {
    #[serde(default)]
    failed_entry_count: u32,
    #[serde(default)]
    entries: Vec<PutEventsResultEntry>,
}

/// Per-entry result in the response.
#[derive(Default, Deserialize)]
struct PutEventsResultEntry {
    event_id: Option<String>,
    error_code: Option<String>,
    error_message: Option<String>,
}

/// Transport that delivers trigger events to an HTTP event-bus endpoint.
#[derive(Debug)]
pub struct HttpEventBusTransport {
    client: Client,
    config: EventBusConfig,
    http: HttpBusConfig,
}

impl HttpEventBusTransport {
    /// Create a transport from a config with an HTTP backend.
    pub fn new(config: EventBusConfig) -> Result<Self, TransportError> {
        let http = match &config.backend {
            EventBusBackend::Http(http) => http.clone(),
            EventBusBackend::Memory => {
                return Err(TransportError::InvalidConfig(
                    "http transport requires an http backend".to_string(),
                ));
            }
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .map_err(|e| TransportError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            client,
            config,
            http,
        })
    }

    fn envelope(&self, detail: String) -> PutEventsRequest<'_> {
        PutEventsRequest {
            entries: vec![PutEventsEntry {
                source: &self.config.source,
                detail_type: &self.config.detail_type,
                event_bus: &self.config.bus_name,
                detail,
            }],
        }
    }
}

impl TriggerTransport for HttpEventBusTransport {
    fn name(&self) -> &str {
        HTTP_TRANSPORT
    }

    fn send(&self, event: &TaskTriggerEvent) -> SendFuture<'_> {
        let event = event.clone();
        Box::pin(async move {
            let detail = serde_json::to_string(&event)?;
            let body = self.envelope(detail);

            let mut request = self.client.post(&self.http.endpoint).json(&body);
            if let Some(token) = &self.http.auth_token {
                request = request.bearer_auth(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            let event_id = interpret_response(status, &text)?;
            tracing::debug!(
                "event bus accepted trigger for task {} (event_id={:?})",
                event.task_id,
                event_id
            );
            Ok(DeliveryReceipt::new(HTTP_TRANSPORT, event_id))
        })
    }
}

/// Turn an endpoint response into the bus-assigned event ID or a
/// typed rejection.
fn interpret_response(status: u16, body: &str) -> Result<Option<String>, TransportError> {
    if !(200..300).contains(&status) {
        let message = if body.trim().is_empty() {
            "event bus returned an error".to_string()
        } else {
            body.trim().to_string()
        };
        return Err(TransportError::Rejected { status, message });
    }

    // Some buses acknowledge with an empty body.
    if body.trim().is_empty() {
        return Ok(None);
    }

    let parsed: PutEventsResponse = serde_json::from_str(body)
        .map_err(|e| TransportError::Request(format!("unexpected event bus response: {e}")))?;

    if parsed.failed_entry_count > 0 {
        let message = parsed
            .entries
            .iter()
            .find(|e| e.error_code.is_some() || e.error_message.is_some())
            .map(|e| {
                format!(
                    "{}: {}",
                    e.error_code.as_deref().unwrap_or("unknown"),
                    e.error_message.as_deref().unwrap_or("entry failed")
                )
            })
            .unwrap_or_else(|| "entry failed".to_string());
        return Err(TransportError::Rejected { status, message });
    }

    Ok(parsed.entries.into_iter().next().and_then(|e| e.event_id))
}

/// Plugin constructing the HTTP event-bus transport.
pub struct HttpEventBusPlugin;

impl TransportPlugin for HttpEventBusPlugin {
    fn name(&self) -> &str {
        HTTP_TRANSPORT
    }

    fn create_transport(
        &self,
        config: &EventBusConfig,
    ) -> Result<Arc<dyn TriggerTransport>, TransportError> {
        Ok(Arc::new(HttpEventBusTransport::new(config.clone())?))
    }
}
