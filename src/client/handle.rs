//! Per-backend client handle.

use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;

use crate::dispatch::{AddressResolver, BackendTarget, Dispatcher};
use crate::error::ClientResult;
use crate::mapping::InterfaceDescriptor;
use crate::request::Args;

/// Binds one interface to one backend. Cheap to clone, safe to share.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    inner: Arc<HandleInner>,
}

#[derive(Debug)]
struct HandleInner {
    interface: Arc<InterfaceDescriptor>,
    backend: String,
    target: OnceLock<BackendTarget>,
    dispatcher: Arc<Dispatcher>,
}

impl ClientHandle {
    pub(crate) fn new(
        interface: Arc<InterfaceDescriptor>,
        backend: String,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                interface,
                backend,
                target: OnceLock::new(),
                dispatcher,
            }),
        }
    }

    pub fn interface(&self) -> &InterfaceDescriptor {
        &self.inner.interface
    }

    pub fn backend(&self) -> &str {
        &self.inner.backend
    }

    /// Call `method` and decode the response into `R`.
    pub async fn invoke<R: DeserializeOwned>(&self, method: &str, args: Args) -> ClientResult<R> {
        self.inner.dispatcher.invoke(self, method, args).await
    }

    /// Call `method`, ignoring any response body.
    pub async fn invoke_void(&self, method: &str, args: Args) -> ClientResult<()> {
        self.inner.dispatcher.invoke_void(self, method, args).await
    }

    /// The backend target, resolved on first use and kept for the handle's lifetime.
    pub(crate) fn target(&self, resolver: &dyn AddressResolver) -> ClientResult<&BackendTarget> {
        if let Some(target) = self.inner.target.get() {
            return Ok(target);
        }

        let base_address = resolver.resolve(&self.inner.backend)?;
        tracing::debug!(
            backend = %self.inner.backend,
            base_address = %base_address,
            "Resolved backend address"
        );
        Ok(self.inner.target.get_or_init(|| BackendTarget {
            name: self.inner.backend.clone(),
            base_address,
        }))
    }
}
