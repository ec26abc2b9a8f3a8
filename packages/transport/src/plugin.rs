//! Transport plugin trait and registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::EventBusConfig;
use crate::http::HttpEventBusPlugin;
use crate::memory::MemoryEventBusPlugin;
use crate::transport::{TransportError, TriggerTransport};

/// Trait for transport plugins.
///
/// Implement this trait to make a transport resolvable by name, so
/// deployments can swap the bus integration without touching callers.
pub trait TransportPlugin: Send + Sync + 'static {
    /// The name this plugin is registered under.
    fn name(&self) -> &str;

    /// Construct a transport for the given bus configuration.
    fn create_transport(
        &self,
        config: &EventBusConfig,
    ) -> Result<Arc<dyn TriggerTransport>, TransportError>;
}

/// Registry for transport plugins.
///
/// Maps plugin names to plugins for dynamic resolution. Registering a
/// plugin under an existing name replaces it, so applications can
/// override the built-ins.
#[derive(Default)]
pub struct TransportRegistry {
    plugins: HashMap<String, Arc<dyn TransportPlugin>>,
}

impl TransportRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a plugin under its own name. Last registration wins.
    pub fn register<P: TransportPlugin>(&mut self, plugin: P) {
        let name = plugin.name().to_string();
        self.plugins.insert(name, Arc::new(plugin));
    }

    /// Get a plugin by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn TransportPlugin>> {
        self.plugins.get(name).cloned()
    }

    /// Check if a plugin is registered under the name.
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// List all registered plugin names.
    pub fn names(&self) -> Vec<&str> {
        self.plugins.keys().map(|s| s.as_str()).collect()
    }

    /// Resolve a plugin by name and construct its transport.
    pub fn create(
        &self,
        name: &str,
        config: &EventBusConfig,
    ) -> Result<Arc<dyn TriggerTransport>, TransportError> {
        let plugin = self.get(name).ok_or_else(|| {
            TransportError::InvalidConfig(format!("no transport plugin named {name}"))
        })?;
        plugin.create_transport(config)
    }
}

/// Registry pre-populated with the built-in transport plugins.
pub fn builtin_registry() -> TransportRegistry {
    let mut registry = TransportRegistry::new();
    registry.register(MemoryEventBusPlugin::default());
    registry.register(HttpEventBusPlugin);
    registry
}
