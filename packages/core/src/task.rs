//! Task identifiers and references for work items.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a task, using ULID for chronological sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Ulid);

impl TaskId {
    /// Create a new unique task ID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a task ID from a string.
    pub fn parse(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a definition ID is empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("task definition id must not be empty")]
pub struct EmptyDefinitionId;

/// Human-assigned slug identifying a task definition (used for routing
/// the trigger to the right handler on the consuming side).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionId(String);

impl DefinitionId {
    /// Create a definition ID, trimming surrounding whitespace.
    pub fn new(s: impl Into<String>) -> Result<Self, EmptyDefinitionId> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyDefinitionId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The definition ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The minimal handle the trigger layer needs to dispatch a task:
/// its ID and the definition it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    /// Unique identifier of the task record.
    pub id: TaskId,
    /// Definition the task executes.
    pub definition_id: DefinitionId,
}

impl TaskRef {
    /// Create a new task reference.
    pub fn new(id: TaskId, definition_id: DefinitionId) -> Self {
        Self { id, definition_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_round_trips_through_parse() {
        let id = TaskId::new();
        let parsed = TaskId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn task_id_rejects_garbage() {
        assert!(TaskId::parse("not-a-ulid").is_err());
    }

    #[test]
    fn definition_id_trims_whitespace() {
        let id = DefinitionId::new("  export-pages  ").unwrap();
        assert_eq!(id.as_str(), "export-pages");
    }

    #[test]
    fn definition_id_rejects_empty() {
        assert_eq!(DefinitionId::new("   "), Err(EmptyDefinitionId));
        assert_eq!(DefinitionId::new(""), Err(EmptyDefinitionId));
    }
}
