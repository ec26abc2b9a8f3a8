//! Stable error codes reported alongside trigger failures.
//!
//! Callers and log pipelines match on these strings, so they must not
//! change between releases.

/// Generic fallback for any unclassified trigger failure.
pub const TRIGGER_TASK_ERROR: &str = "TRIGGER_TASK_ERROR";

/// The event bus accepted the request but rejected the event.
pub const TRIGGER_BUS_REJECTED: &str = "TRIGGER_BUS_REJECTED";

/// The trigger event payload could not be serialized.
pub const TRIGGER_EVENT_SERIALIZE: &str = "TRIGGER_EVENT_SERIALIZE";

/// The event bus is no longer accepting events.
pub const TRIGGER_BUS_CLOSED: &str = "TRIGGER_BUS_CLOSED";

/// The transport was constructed with an unusable configuration.
pub const TRIGGER_CONFIG_INVALID: &str = "TRIGGER_CONFIG_INVALID";
