//! Endpoint resolution.
//!
//! # Responsibilities
//! - Merge the interface prefix with the method path
//! - Reject dispatch of methods without a mapping
//! - Cache resolved endpoints per (descriptor identity, method)
//!
//! # Design Decisions
//! - Prefix and method path are concatenated verbatim (no slash dedup)
//! - Concurrent first resolution may compute twice; the first insert wins

use std::sync::Arc;

use dashmap::DashMap;
use reqwest::Method;

use crate::error::RestClientError;
use crate::mapping::metadata::{InterfaceDescriptor, ParamBinding};

/// A method's effective endpoint after merging interface-level metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub interface: String,
    pub method: String,
    pub http_method: Method,
    pub path_template: String,
    pub params: Vec<ParamBinding>,
}

/// Resolves and caches [`ResolvedEndpoint`]s.
#[derive(Debug, Default)]
pub struct MetadataResolver {
    cache: DashMap<(u64, String), Arc<ResolvedEndpoint>>,
}

impl MetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &self,
        interface: &InterfaceDescriptor,
        method: &str,
    ) -> Result<Arc<ResolvedEndpoint>, RestClientError> {
        let key = (interface.id(), method.to_string());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.value().clone());
        }

        let resolved = Arc::new(resolve_uncached(interface, method)?);
        tracing::debug!(
            interface = %resolved.interface,
            method = %resolved.method,
            http_method = %resolved.http_method,
            path = %resolved.path_template,
            "Resolved endpoint"
        );

        Ok(self.cache.entry(key).or_insert(resolved).value().clone())
    }

    /// Number of cached endpoints.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn resolve_uncached(
    interface: &InterfaceDescriptor,
    method: &str,
) -> Result<ResolvedEndpoint, RestClientError> {
    let missing = || RestClientError::MissingEndpointMetadata {
        interface: interface.name().to_string(),
        method: method.to_string(),
    };

    let spec = interface.method(method).ok_or_else(missing)?;
    let mapping = spec.endpoint().ok_or_else(missing)?;

    let mut path_template = interface.prefix().unwrap_or_default().to_string();
    path_template.push_str(&mapping.path);

    Ok(ResolvedEndpoint {
        interface: interface.name().to_string(),
        method: method.to_string(),
        http_method: mapping.http_method.clone(),
        path_template,
        params: spec.params().to_vec(),
    })
}
