//! Call dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! ClientHandle::invoke(method, args)
//!     → dispatcher.rs
//!         → mapping::MetadataResolver (endpoint, fails before any I/O)
//!         → request::RequestBuilder (path, query, body)
//!         → address.rs (backend name → base address, resolved once per handle)
//!         → transport.rs (execute over the pooled HTTP client)
//!         → response.rs (status check, decode into the declared type)
//! ```
//!
//! # Design Decisions
//! - The backend name is addressed as the first path segment (gateway style)
//! - Every error is tagged with an ErrorKind; nothing is swallowed
//! - No retries or timeouts here; the transport owns them

pub mod address;
pub mod dispatcher;
pub mod response;
pub mod transport;

pub use address::{AddressResolver, BackendDirectory, BackendTarget};
pub use dispatcher::Dispatcher;
pub use transport::{InboundResponse, OutboundRequest, ReqwestTransport, Transport};
