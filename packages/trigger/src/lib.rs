//! Trigger service for dispatching background tasks.
//!
//! Builds the trigger event for a task from the ambient tenancy, hands
//! it to a transport, and wraps any transport failure into a domain
//! error carrying a stable code and the full event payload as context.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use task_trigger::{FixedTenancy, TaskTriggerer};
//!
//! let triggerer = TaskTriggerer::new(transport, Arc::new(FixedTenancy::default()));
//! let receipt = triggerer.trigger(&task, 30).await?;
//! ```

mod error;
mod service;
mod tenancy;

pub use error::TriggerError;
pub use service::TaskTriggerer;
pub use tenancy::{FixedTenancy, TenancyProvider};
