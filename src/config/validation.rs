//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse as absolute http(s) URLs
//! - Validate value ranges (timeouts > 0)
//! - Detect duplicate backend names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use reqwest::Method;
use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("backend '{name}' has invalid address '{address}': {reason}")]
    InvalidAddress {
        name: String,
        address: String,
        reason: String,
    },

    #[error("backend '{0}' is declared more than once")]
    DuplicateBackend(String),

    #[error("backend entry with empty name")]
    EmptyBackendName,

    #[error("timeout '{0}' must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("'{0}' is not a valid HTTP method")]
    InvalidMethod(String),

    #[error("metrics address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(default) = &config.addressing.default_address {
        check_address("default", default, &mut errors);
    }

    let mut seen = HashSet::new();
    for backend in &config.addressing.backends {
        if backend.name.is_empty() {
            errors.push(ValidationError::EmptyBackendName);
            continue;
        }
        if !seen.insert(backend.name.as_str()) {
            errors.push(ValidationError::DuplicateBackend(backend.name.clone()));
        }
        check_address(&backend.name, &backend.address, &mut errors);
    }

    let timeouts = &config.timeouts;
    for (name, value) in [
        ("connect_secs", timeouts.connect_secs),
        ("request_secs", timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    for method in &config.dispatch.body_methods {
        if Method::from_bytes(method.to_ascii_uppercase().as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod(method.clone()));
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(name: &str, address: &str, errors: &mut Vec<ValidationError>) {
    let invalid = |reason: String| ValidationError::InvalidAddress {
        name: name.to_string(),
        address: address.to_string(),
        reason,
    };

    match Url::parse(address) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        Ok(url) if url.query().is_some() => {
            errors.push(invalid("base address must not carry a query".to_string()));
        }
        Ok(_) => {}
        Err(e) => errors.push(invalid(e.to_string())),
    }
}
