//! The trigger event payload dispatched to the external event bus.

use serde::{Deserialize, Serialize};

use crate::{DefinitionId, Locale, TaskId, TaskRef, Tenant};

/// The flat, serialize-once payload the task handler receives from the
/// event bus. Waiting out the delay is the bus/orchestrator's job; the
/// field is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTriggerEvent {
    /// ID of the task to execute.
    pub task_id: TaskId,
    /// Definition the task executes.
    pub definition_id: DefinitionId,
    /// Tenant on whose behalf the task runs.
    pub tenant: Tenant,
    /// Content locale the task operates on.
    pub locale: Locale,
    /// Seconds the bus should wait before handing the event to the
    /// handler. Zero or negative means immediate.
    pub delay_seconds: i64,
}

impl TaskTriggerEvent {
    /// Build the event for a task reference with the ambient identity.
    pub fn new(task: &TaskRef, tenant: Tenant, locale: Locale, delay_seconds: i64) -> Self {
        Self {
            task_id: task.id,
            definition_id: task.definition_id.clone(),
            tenant,
            locale,
            delay_seconds,
        }
    }

    /// Whether the bus should hand the event over without waiting.
    pub fn is_immediate(&self) -> bool {
        self.delay_seconds <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> TaskRef {
        TaskRef::new(TaskId::new(), DefinitionId::new("export-pages").unwrap())
    }

    #[test]
    fn construction_populates_exactly_the_trigger_fields() {
        let task = sample_task();
        let event = TaskTriggerEvent::new(
            &task,
            Tenant::new("acme"),
            Locale::new("de-DE"),
            30,
        );

        assert_eq!(event.task_id, task.id);
        assert_eq!(event.definition_id, task.definition_id);
        assert_eq!(event.tenant.as_str(), "acme");
        assert_eq!(event.locale.as_str(), "de-DE");
        assert_eq!(event.delay_seconds, 30);
    }

    #[test]
    fn serializes_to_stable_snake_case_json() {
        let task = TaskRef::new(
            TaskId::parse("01J9ZC2B4R8N1Q2W3E4R5T6Y7Z").unwrap(),
            DefinitionId::new("export-pages").unwrap(),
        );
        let event = TaskTriggerEvent::new(&task, Tenant::default(), Locale::default(), 0);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "task_id": "01J9ZC2B4R8N1Q2W3E4R5T6Y7Z",
                "definition_id": "export-pages",
                "tenant": "root",
                "locale": "en-US",
                "delay_seconds": 0,
            })
        );
    }

    #[test]
    fn delay_classification() {
        let task = sample_task();
        let immediate = TaskTriggerEvent::new(&task, Tenant::default(), Locale::default(), 0);
        let negative = TaskTriggerEvent::new(&task, Tenant::default(), Locale::default(), -1);
        let delayed = TaskTriggerEvent::new(&task, Tenant::default(), Locale::default(), 60);

        assert!(immediate.is_immediate());
        assert!(negative.is_immediate());
        assert!(!delayed.is_immediate());
    }
}
