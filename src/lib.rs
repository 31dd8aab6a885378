//! Declarative REST client library.
//!
//! Client methods are plain Rust methods; each call is mapped to an HTTP
//! request against a named backend through registered endpoint metadata.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod inject;
pub mod mapping;
pub mod observability;
pub mod request;

pub use client::{ClientFactory, ClientHandle, RemoteInterface};
pub use config::schema::ClientConfig;
pub use error::{ClientResult, ErrorKind, InstallError, RestClientError};
pub use inject::{Injectable, InjectionSite, Installer};
pub use mapping::{EndpointMetadata, InterfaceDescriptor, MethodSpec};
pub use request::Args;
