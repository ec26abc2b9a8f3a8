//! Transport layer for dispatching task trigger events to an event bus.
//!
//! This crate provides the pluggable transport mechanism used by the
//! trigger service:
//!
//! - `TriggerTransport` - the port every transport implements
//! - `TransportPlugin` / `TransportRegistry` - named plugin resolution
//! - `HttpEventBusTransport` - posts events to an HTTP event-bus endpoint
//! - `MemoryEventBusTransport` - in-process bus for local dev and tests
//!
//! # Usage
//!
//! ```ignore
//! use task_transport::{builtin_registry, EventBusConfig};
//!
//! let config = EventBusConfig::from_env()?;
//! let registry = builtin_registry();
//! let transport = registry.create(config.builtin_plugin_name(), &config)?;
//! ```

mod config;
mod http;
mod memory;
mod plugin;
mod transport;

pub use config::{ConfigError, EventBusBackend, EventBusConfig, HttpBusConfig};
pub use http::{HTTP_TRANSPORT, HttpEventBusPlugin, HttpEventBusTransport};
pub use memory::{MEMORY_TRANSPORT, MemoryEventBusPlugin, MemoryEventBusTransport};
pub use plugin::{TransportPlugin, TransportRegistry, builtin_registry};
pub use transport::{DeliveryReceipt, SendFuture, TransportError, TriggerTransport};
