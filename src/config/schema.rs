//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the REST client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend name to base address table.
    pub addressing: AddressingConfig,

    /// Transport timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request construction settings.
    pub dispatch: DispatchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend address resolution.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AddressingConfig {
    /// Base address for backends without an explicit entry.
    pub default_address: Option<String>,

    /// Explicit backend addresses.
    pub backends: Vec<BackendConfig>,
}

impl Default for AddressingConfig {
    fn default() -> Self {
        Self {
            default_address: Some("http://localhost:8089".to_string()),
            backends: Vec::new(),
        }
    }
}

/// Backend address entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend (service) name, also the first path segment of every call.
    pub name: String,

    /// Base address (e.g., "http://127.0.0.1:8089").
    pub address: String,
}

/// Timeout configuration for the HTTP transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Idle pooled connection timeout in seconds.
    pub pool_idle_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
            pool_idle_secs: 90,
        }
    }
}

/// Request construction settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// HTTP methods that carry a request body.
    pub body_methods: Vec<String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            body_methods: vec!["POST".to_string(), "PUT".to_string(), "PATCH".to_string()],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "rest_client=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
