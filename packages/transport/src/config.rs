//! Event bus configuration.

use std::env;

use thiserror::Error;

use crate::http::HTTP_TRANSPORT;
use crate::memory::MEMORY_TRANSPORT;

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Settings for the HTTP event-bus backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBusConfig {
    /// Endpoint the PutEvents-shaped envelope is posted to.
    pub endpoint: String,
    /// Optional bearer token sent with every request.
    pub auth_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl HttpBusConfig {
    /// Create a config for the given endpoint with default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token: None,
            timeout_secs: 30,
        }
    }

    /// Set the bearer token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Which bus the events are delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBusBackend {
    /// An external HTTP event-bus endpoint.
    Http(HttpBusConfig),
    /// The in-process bus, for local dev and tests.
    Memory,
}

/// Event bus configuration shared by all transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBusConfig {
    /// Backend the events are delivered to.
    pub backend: EventBusBackend,
    /// Logical bus name carried in the envelope.
    pub bus_name: String,
    /// Envelope `source` field identifying the producer.
    pub source: String,
    /// Envelope `detail_type` field identifying the event kind.
    pub detail_type: String,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            backend: EventBusBackend::Memory,
            bus_name: "tasks".to_string(),
            source: "tasks-api".to_string(),
            detail_type: "BackgroundTask".to_string(),
        }
    }
}

impl EventBusConfig {
    /// Create a config for the in-process bus.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Create a config for an HTTP event-bus endpoint.
    pub fn http(endpoint: impl Into<String>) -> Self {
        Self {
            backend: EventBusBackend::Http(HttpBusConfig::new(endpoint)),
            ..Default::default()
        }
    }

    /// Set the logical bus name.
    pub fn with_bus_name(mut self, bus_name: impl Into<String>) -> Self {
        self.bus_name = bus_name.into();
        self
    }

    /// Set the envelope source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the envelope detail type.
    pub fn with_detail_type(mut self, detail_type: impl Into<String>) -> Self {
        self.detail_type = detail_type.into();
        self
    }

    /// Name of the built-in plugin matching this config's backend.
    pub fn builtin_plugin_name(&self) -> &'static str {
        match self.backend {
            EventBusBackend::Http(_) => HTTP_TRANSPORT,
            EventBusBackend::Memory => MEMORY_TRANSPORT,
        }
    }

    /// Read the configuration from `TASKBUS_*` environment variables.
    ///
    /// With no `TASKBUS_ENDPOINT` set the in-process bus is used.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("TASKBUS_ENDPOINT") {
            Ok(endpoint) => {
                let mut http = HttpBusConfig::new(endpoint);
                if let Ok(token) = env::var("TASKBUS_AUTH_TOKEN") {
                    http = http.with_auth_token(token);
                }
                if let Ok(value) = env::var("TASKBUS_TIMEOUT_SECS") {
                    let secs = value.parse().map_err(|_| ConfigError::InvalidVar {
                        name: "TASKBUS_TIMEOUT_SECS",
                        value,
                    })?;
                    http = http.with_timeout_secs(secs);
                }
                Self {
                    backend: EventBusBackend::Http(http),
                    ..Default::default()
                }
            }
            Err(_) => Self::memory(),
        };

        if let Ok(bus_name) = env::var("TASKBUS_BUS_NAME") {
            config.bus_name = bus_name;
        }
        if let Ok(source) = env::var("TASKBUS_SOURCE") {
            config.source = source;
        }
        if let Ok(detail_type) = env::var("TASKBUS_DETAIL_TYPE") {
            config.detail_type = detail_type;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_the_memory_bus() {
        let config = EventBusConfig::default();
        assert_eq!(config.backend, EventBusBackend::Memory);
        assert_eq!(config.bus_name, "tasks");
        assert_eq!(config.source, "tasks-api");
        assert_eq!(config.detail_type, "BackgroundTask");
        assert_eq!(config.builtin_plugin_name(), MEMORY_TRANSPORT);
    }

    #[test]
    fn http_config_builders() {
        let config = EventBusConfig::http("https://bus.internal/events")
            .with_bus_name("cms-tasks")
            .with_source("cms-api")
            .with_detail_type("CmsBackgroundTask");

        assert_eq!(config.bus_name, "cms-tasks");
        assert_eq!(config.source, "cms-api");
        assert_eq!(config.detail_type, "CmsBackgroundTask");
        assert_eq!(config.builtin_plugin_name(), HTTP_TRANSPORT);

        match config.backend {
            EventBusBackend::Http(http) => {
                assert_eq!(http.endpoint, "https://bus.internal/events");
                assert_eq!(http.auth_token, None);
                assert_eq!(http.timeout_secs, 30);
            }
            EventBusBackend::Memory => panic!("expected http backend"),
        }
    }
}
