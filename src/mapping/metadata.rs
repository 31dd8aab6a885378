//! Declarative endpoint metadata.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Method;

/// HTTP verb and path template of one remotely callable method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointMetadata {
    pub http_method: Method,
    /// Path template, may contain `{name}` placeholders.
    pub path: String,
}

impl EndpointMetadata {
    pub fn new(http_method: Method, path: impl Into<String>) -> Self {
        Self {
            http_method,
            path: path.into(),
        }
    }

    /// GET is the default verb.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }
}

/// How one method parameter contributes to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamBinding {
    /// Appended to the query string as `name=value`.
    Query(String),
    /// Substituted into the path template at `{name}`.
    PathVariable(String),
    /// Candidate request payload.
    Body,
    /// Not used for mapping.
    Unbound,
}

/// Registration of a single interface method.
#[derive(Debug, Clone, Default)]
pub struct MethodSpec {
    pub(crate) mapping: Option<EndpointMetadata>,
    pub(crate) params: Vec<ParamBinding>,
}

impl MethodSpec {
    /// A method without endpoint mapping. Add one with [`MethodSpec::mapping`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mapping(mut self, metadata: EndpointMetadata) -> Self {
        self.mapping = Some(metadata);
        self
    }

    pub fn get(self, path: impl Into<String>) -> Self {
        self.mapping(EndpointMetadata::get(path))
    }

    pub fn post(self, path: impl Into<String>) -> Self {
        self.mapping(EndpointMetadata::post(path))
    }

    pub fn put(self, path: impl Into<String>) -> Self {
        self.mapping(EndpointMetadata::put(path))
    }

    pub fn delete(self, path: impl Into<String>) -> Self {
        self.mapping(EndpointMetadata::delete(path))
    }

    /// Next parameter is a query parameter.
    pub fn query(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamBinding::Query(name.into()));
        self
    }

    /// Next parameter is a path variable.
    pub fn path_var(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamBinding::PathVariable(name.into()));
        self
    }

    /// Next parameter is a body candidate.
    pub fn body(mut self) -> Self {
        self.params.push(ParamBinding::Body);
        self
    }

    /// Next parameter is ignored by the mapping.
    pub fn unbound(mut self) -> Self {
        self.params.push(ParamBinding::Unbound);
        self
    }

    pub fn endpoint(&self) -> Option<&EndpointMetadata> {
        self.mapping.as_ref()
    }

    pub fn params(&self) -> &[ParamBinding] {
        &self.params
    }
}

static NEXT_DESCRIPTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Endpoint table of one client interface.
///
/// Every [`InterfaceDescriptorBuilder::build`] yields a distinct identity, so
/// two descriptors that share a name never share resolved endpoints. Clones
/// keep the identity of their source.
#[derive(Debug, Clone)]
pub struct InterfaceDescriptor {
    id: u64,
    name: String,
    prefix: Option<String>,
    methods: HashMap<String, MethodSpec>,
}

impl InterfaceDescriptor {
    pub fn builder(name: impl Into<String>) -> InterfaceDescriptorBuilder {
        InterfaceDescriptorBuilder {
            name: name.into(),
            prefix: None,
            methods: HashMap::new(),
        }
    }

    /// Process-unique identity of this descriptor.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interface-level path prefix shared by every method.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn method(&self, id: &str) -> Option<&MethodSpec> {
        self.methods.get(id)
    }
}

/// Builder for [`InterfaceDescriptor`].
#[derive(Debug)]
pub struct InterfaceDescriptorBuilder {
    name: String,
    prefix: Option<String>,
    methods: HashMap<String, MethodSpec>,
}

impl InterfaceDescriptorBuilder {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Register a method. A later registration under the same id replaces it.
    pub fn method(mut self, id: impl Into<String>, spec: MethodSpec) -> Self {
        self.methods.insert(id.into(), spec);
        self
    }

    pub fn build(self) -> InterfaceDescriptor {
        InterfaceDescriptor {
            id: NEXT_DESCRIPTOR_ID.fetch_add(1, Ordering::Relaxed),
            name: self.name,
            prefix: self.prefix,
            methods: self.methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_spec_records_bindings_in_order() {
        let spec = MethodSpec::new()
            .post("/bills/{id}")
            .path_var("id")
            .query("type")
            .unbound()
            .body();

        assert_eq!(spec.endpoint(), Some(&EndpointMetadata::post("/bills/{id}")));
        assert_eq!(
            spec.params(),
            &[
                ParamBinding::PathVariable("id".into()),
                ParamBinding::Query("type".into()),
                ParamBinding::Unbound,
                ParamBinding::Body,
            ]
        );
    }

    #[test]
    fn test_descriptor_lookup() {
        let descriptor = InterfaceDescriptor::builder("HelloApi")
            .prefix("/api")
            .method("hello", MethodSpec::new().get("/sayHello").query("name"))
            .method("unmapped", MethodSpec::new())
            .build();

        assert_eq!(descriptor.name(), "HelloApi");
        assert_eq!(descriptor.prefix(), Some("/api"));
        assert!(descriptor.method("hello").is_some());
        assert!(descriptor.method("unmapped").unwrap().endpoint().is_none());
        assert!(descriptor.method("missing").is_none());
    }

    #[test]
    fn test_descriptor_identity() {
        let first = InterfaceDescriptor::builder("Api").build();
        let second = InterfaceDescriptor::builder("Api").build();
        assert_ne!(first.id(), second.id());
        assert_eq!(first.clone().id(), first.id());
    }
}
