//! Builds a request descriptor from a resolved endpoint and call arguments.
//!
//! # Design Decisions
//! - Query pairs keep parameter declaration order
//! - Query values are form-urlencoded; path variables are substituted raw
//! - Null and empty-string arguments contribute nothing
//! - Unresolved `{name}` placeholders are left in place

use reqwest::Method;
use serde_json::Value;

use crate::error::RestClientError;
use crate::mapping::{ParamBinding, ResolvedEndpoint};
use crate::request::args::{string_form, Args};

/// Fully specified request, relative to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path plus query string.
    pub path: String,
    pub body: Option<Value>,
}

/// Turns endpoints and arguments into [`RequestDescriptor`]s.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    body_methods: Vec<Method>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            body_methods: vec![Method::POST, Method::PUT, Method::PATCH],
        }
    }
}

impl RequestBuilder {
    /// Builder whose payload-carrying verbs are `body_methods`.
    pub fn new(body_methods: Vec<Method>) -> Self {
        Self { body_methods }
    }

    pub fn body_methods(&self) -> &[Method] {
        &self.body_methods
    }

    pub fn build(
        &self,
        endpoint: &ResolvedEndpoint,
        args: &Args,
    ) -> Result<RequestDescriptor, RestClientError> {
        check_binding_names(endpoint)?;

        let mut path = endpoint.path_template.clone();

        let query = query_string(endpoint, args);
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }

        for (index, binding) in endpoint.params.iter().enumerate() {
            let ParamBinding::PathVariable(name) = binding else {
                continue;
            };
            if let Some(value) = string_form(args.get(index)) {
                path = path.replace(&format!("{{{}}}", name), &value);
            }
        }

        if !path.starts_with('/') {
            tracing::warn!(
                interface = %endpoint.interface,
                method = %endpoint.method,
                path = %path,
                "Request path must start with '/'"
            );
            return Err(RestClientError::IllegalPath {
                interface: endpoint.interface.clone(),
                method: endpoint.method.clone(),
                path,
            });
        }

        let body = if self.body_methods.contains(&endpoint.http_method) {
            first_body(endpoint, args)
        } else {
            None
        };

        Ok(RequestDescriptor {
            method: endpoint.http_method.clone(),
            path,
            body,
        })
    }
}

fn check_binding_names(endpoint: &ResolvedEndpoint) -> Result<(), RestClientError> {
    for (index, binding) in endpoint.params.iter().enumerate() {
        let name = match binding {
            ParamBinding::Query(name) | ParamBinding::PathVariable(name) => name,
            ParamBinding::Body | ParamBinding::Unbound => continue,
        };
        if name.is_empty() {
            return Err(RestClientError::MissingBindingName {
                interface: endpoint.interface.clone(),
                method: endpoint.method.clone(),
                index,
            });
        }
    }
    Ok(())
}

fn query_string(endpoint: &ResolvedEndpoint, args: &Args) -> String {
    let mut pairs = Vec::new();
    for (index, binding) in endpoint.params.iter().enumerate() {
        let ParamBinding::Query(name) = binding else {
            continue;
        };
        let Some(value) = string_form(args.get(index)) else {
            continue;
        };
        let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
        pairs.push(format!("{}={}", name, encoded));
    }
    pairs.join("&")
}

fn first_body(endpoint: &ResolvedEndpoint, args: &Args) -> Option<Value> {
    endpoint
        .params
        .iter()
        .enumerate()
        .filter(|(_, binding)| **binding == ParamBinding::Body)
        .map(|(index, _)| args.get(index))
        .find(|value| !value.is_null())
        .cloned()
}
