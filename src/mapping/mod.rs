//! Endpoint mapping subsystem.
//!
//! # Data Flow
//! ```text
//! InterfaceDescriptor (registered once per client type)
//!     → metadata.rs (prefix, per-method EndpointMetadata + ParamBindings)
//!     → resolver.rs (merge prefix + method path, cache per method)
//!     → ResolvedEndpoint (immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Metadata is registered explicitly; no runtime introspection
//! - A method may be registered without a mapping; calling it fails
//! - Resolved endpoints are never mutated after creation

pub mod metadata;
pub mod resolver;

pub use metadata::{EndpointMetadata, InterfaceDescriptor, MethodSpec, ParamBinding};
pub use resolver::{MetadataResolver, ResolvedEndpoint};
