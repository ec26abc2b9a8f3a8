//! The transport port and its result/error types.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use task_core::{TaskTriggerEvent, codes};
use thiserror::Error;

/// Future type returned by [`TriggerTransport::send`].
pub type SendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<DeliveryReceipt, TransportError>> + Send + 'a>>;

/// A transport delivers a trigger event to an event bus.
///
/// Implementations serialize the event once and hand it to the bus in a
/// single call. Retry, backpressure and scheduling are the bus's job,
/// not the transport's.
pub trait TriggerTransport: Send + Sync + 'static {
    /// Stable name of this transport, reported in receipts.
    fn name(&self) -> &str;

    /// Deliver the event to the bus.
    fn send(&self, event: &TaskTriggerEvent) -> SendFuture<'_>;
}

impl std::fmt::Debug for dyn TriggerTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerTransport")
            .field("name", &self.name())
            .finish()
    }
}

/// Acknowledgement returned by the bus for an accepted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Bus-assigned event ID, when the bus reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Name of the transport that delivered the event.
    pub transport: String,
    /// When the bus accepted the event.
    pub delivered_at: DateTime<Utc>,
}

impl DeliveryReceipt {
    /// Create a receipt stamped with the current time.
    pub fn new(transport: impl Into<String>, event_id: Option<String>) -> Self {
        Self {
            event_id,
            transport: transport.into(),
            delivered_at: Utc::now(),
        }
    }
}

/// Transport failures.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid event bus config: {0}")]
    InvalidConfig(String),
    #[error("event bus request failed: {0}")]
    Request(String),
    #[error("event bus rejected the event ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("failed to serialize trigger event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("event bus is closed")]
    Closed,
}

impl TransportError {
    /// Stable error code for this failure, falling back to the generic
    /// trigger code for unclassified request failures.
    pub fn code(&self) -> &'static str {
        match self {
            TransportError::InvalidConfig(_) => codes::TRIGGER_CONFIG_INVALID,
            TransportError::Request(_) => codes::TRIGGER_TASK_ERROR,
            TransportError::Rejected { .. } => codes::TRIGGER_BUS_REJECTED,
            TransportError::Serialize(_) => codes::TRIGGER_EVENT_SERIALIZE,
            TransportError::Closed => codes::TRIGGER_BUS_CLOSED,
        }
    }
}
