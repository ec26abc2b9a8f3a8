//! Domain error raised when a trigger cannot be dispatched.

use task_core::TaskTriggerEvent;
use task_transport::TransportError;
use thiserror::Error;

/// A trigger dispatch failure.
///
/// Carries a stable error code and the event payload that was being
/// dispatched, so callers and log pipelines see exactly what failed.
/// The failure is re-raised, never swallowed; there is no retry.
#[derive(Debug, Error)]
#[error("{message} (code {code})")]
pub struct TriggerError {
    /// Human-readable failure description from the transport.
    pub message: String,
    /// Stable error code (see [`task_core::codes`]).
    pub code: &'static str,
    /// The event that was being dispatched.
    pub event: Box<TaskTriggerEvent>,
}

impl TriggerError {
    pub(crate) fn from_transport(err: &TransportError, event: TaskTriggerEvent) -> Self {
        Self {
            message: err.to_string(),
            code: err.code(),
            event: Box::new(event),
        }
    }
}
