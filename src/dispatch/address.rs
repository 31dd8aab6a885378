//! Backend address resolution.

use std::collections::HashMap;

use url::Url;

use crate::config::loader::ConfigError;
use crate::config::AddressingConfig;
use crate::error::RestClientError;

/// A backend name bound to its resolved base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    pub name: String,
    pub base_address: Url,
}

impl BackendTarget {
    /// Absolute URL for `path` on this backend: base + `/` + name + path.
    pub fn url_for(&self, path: &str) -> Result<Url, RestClientError> {
        let raw = format!(
            "{}/{}{}",
            self.base_address.as_str().trim_end_matches('/'),
            self.name,
            path
        );
        Url::parse(&raw).map_err(|e| RestClientError::InvalidAddress {
            url: raw,
            reason: e.to_string(),
        })
    }
}

/// Maps a backend name to its base address.
pub trait AddressResolver: Send + Sync {
    fn resolve(&self, backend: &str) -> Result<Url, RestClientError>;
}

/// Static backend table with an optional fallback address.
#[derive(Debug, Clone, Default)]
pub struct BackendDirectory {
    default: Option<Url>,
    backends: HashMap<String, Url>,
}

impl BackendDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address used for backends without an explicit entry.
    pub fn with_default(mut self, address: Url) -> Self {
        self.default = Some(address);
        self
    }

    pub fn with_backend(mut self, name: impl Into<String>, address: Url) -> Self {
        self.backends.insert(name.into(), address);
        self
    }

    pub fn from_config(config: &AddressingConfig) -> Result<Self, ConfigError> {
        let mut directory = Self::new();
        if let Some(default) = &config.default_address {
            let url = Url::parse(default).map_err(|e| ConfigError::Address {
                name: "default".to_string(),
                source: e,
            })?;
            directory = directory.with_default(url);
        }
        for backend in &config.backends {
            let url = Url::parse(&backend.address).map_err(|e| ConfigError::Address {
                name: backend.name.clone(),
                source: e,
            })?;
            directory = directory.with_backend(backend.name.clone(), url);
        }
        Ok(directory)
    }
}

impl AddressResolver for BackendDirectory {
    fn resolve(&self, backend: &str) -> Result<Url, RestClientError> {
        self.backends
            .get(backend)
            .or(self.default.as_ref())
            .cloned()
            .ok_or_else(|| RestClientError::UnknownBackend(backend.to_string()))
    }
}
