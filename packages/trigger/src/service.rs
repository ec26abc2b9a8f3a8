//! The trigger service.

use std::sync::Arc;

use task_core::{TaskRef, TaskTriggerEvent};
use task_transport::{DeliveryReceipt, TriggerTransport};

use crate::error::TriggerError;
use crate::tenancy::TenancyProvider;

/// Dispatches trigger events for background tasks.
pub struct TaskTriggerer {
    transport: Arc<dyn TriggerTransport>,
    tenancy: Arc<dyn TenancyProvider>,
}

impl TaskTriggerer {
    /// Create a trigger service over the given transport and tenancy.
    pub fn new(transport: Arc<dyn TriggerTransport>, tenancy: Arc<dyn TenancyProvider>) -> Self {
        Self { transport, tenancy }
    }

    /// Dispatch a trigger event for the task.
    ///
    /// Tenant and locale are resolved now, the event is built with
    /// exactly the trigger fields, and the delay travels inside the
    /// payload; waiting it out is the bus's job.
    pub async fn trigger(
        &self,
        task: &TaskRef,
        delay_seconds: i64,
    ) -> Result<DeliveryReceipt, TriggerError> {
        let event = TaskTriggerEvent::new(
            task,
            self.tenancy.tenant(),
            self.tenancy.locale(),
            delay_seconds,
        );

        tracing::info!(
            "dispatching trigger for task {} ({}) via {}",
            event.task_id,
            event.definition_id,
            self.transport.name()
        );

        match self.transport.send(&event).await {
            Ok(receipt) => {
                tracing::debug!(
                    "trigger for task {} accepted (event_id={:?})",
                    event.task_id,
                    receipt.event_id
                );
                Ok(receipt)
            }
            Err(err) => {
                let err = TriggerError::from_transport(&err, event);
                tracing::error!(
                    "trigger for task {} failed (code {}): {}",
                    err.event.task_id,
                    err.code,
                    err.message
                );
                Err(err)
            }
        }
    }
}
