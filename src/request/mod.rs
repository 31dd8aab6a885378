//! Request construction subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedEndpoint + Args (runtime values, declaration order)
//!     → builder.rs
//!         1. query string from Query bindings
//!         2. {name} substitution from PathVariable bindings
//!         3. leading '/' check
//!         4. payload from the first non-null Body binding (write verbs only)
//!     → RequestDescriptor (verb, path, optional JSON payload)
//! ```

pub mod args;
pub mod builder;

pub use args::Args;
pub use builder::{RequestBuilder, RequestDescriptor};
