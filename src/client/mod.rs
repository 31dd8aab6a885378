//! Client subsystem.
//!
//! # Data Flow
//! ```text
//! ClientFactory::create_one / create_many / create_mapped::<T>
//!     → descriptor cache (one InterfaceDescriptor per client type)
//!     → handle.rs (interface + backend name + shared Dispatcher)
//!     → T::from_handle(handle)
//!
//! Generated client method
//!     → ClientHandle::invoke(method_id, args)
//!     → dispatch::Dispatcher
//! ```
//!
//! # Design Decisions
//! - Client types are plain structs written against `ClientHandle`
//! - Factories do no I/O; the backend address resolves on first call

pub mod factory;
pub mod handle;

pub use factory::{ClientFactory, RemoteInterface};
pub use handle::ClientHandle;
