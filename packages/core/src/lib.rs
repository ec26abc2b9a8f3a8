//! Core domain types for the background-task trigger layer.
//!
//! This crate contains shared types used across all packages:
//! - Task identifiers and references for work items
//! - Tenant and locale identity propagated into every trigger
//! - The trigger event payload sent to the external event bus

pub mod codes;
mod event;
mod identity;
mod task;

pub use event::TaskTriggerEvent;
pub use identity::{Locale, Tenant};
pub use task::{DefinitionId, EmptyDefinitionId, TaskId, TaskRef};
