//! Client construction.
//!
//! # Responsibilities
//! - Produce a client for one backend, a list of clients, or a name-keyed map
//! - Share one interface descriptor per client type across all handles
//! - Build the production transport and address table from config

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use reqwest::Method;

use crate::client::handle::ClientHandle;
use crate::config::loader::ConfigError;
use crate::config::ClientConfig;
use crate::dispatch::{AddressResolver, BackendDirectory, Dispatcher, ReqwestTransport, Transport};
use crate::mapping::InterfaceDescriptor;
use crate::request::RequestBuilder;

/// A client type whose methods delegate to a [`ClientHandle`].
///
/// ```ignore
/// pub struct HelloClient(ClientHandle);
///
/// impl RemoteInterface for HelloClient {
///     fn descriptor() -> InterfaceDescriptor {
///         InterfaceDescriptor::builder("HelloApi")
///             .method("hello", MethodSpec::new().get("/sayHello").query("name"))
///             .build()
///     }
///
///     fn from_handle(handle: ClientHandle) -> Self {
///         Self(handle)
///     }
/// }
///
/// impl HelloClient {
///     pub async fn hello(&self, name: &str) -> ClientResult<String> {
///         self.0.invoke("hello", Args::new().arg(name)?).await
///     }
/// }
/// ```
pub trait RemoteInterface: Sized + Send + Sync + 'static {
    /// Endpoint table for every method of the interface.
    fn descriptor() -> InterfaceDescriptor;

    fn from_handle(handle: ClientHandle) -> Self;
}

/// Creates clients that dispatch through one shared [`Dispatcher`].
#[derive(Debug, Clone)]
pub struct ClientFactory {
    dispatcher: Arc<Dispatcher>,
    descriptors: Arc<DashMap<TypeId, Arc<InterfaceDescriptor>>>,
}

impl ClientFactory {
    pub fn new(transport: Arc<dyn Transport>, addresses: Arc<dyn AddressResolver>) -> Self {
        Self::with_request_builder(transport, addresses, RequestBuilder::default())
    }

    pub fn with_request_builder(
        transport: Arc<dyn Transport>,
        addresses: Arc<dyn AddressResolver>,
        builder: RequestBuilder,
    ) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(transport, addresses, builder)),
            descriptors: Arc::new(DashMap::new()),
        }
    }

    /// Factory over a pooled reqwest transport and the configured backend table.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::from_config(&config.timeouts)?;
        let addresses = BackendDirectory::from_config(&config.addressing)?;

        let body_methods = config
            .dispatch
            .body_methods
            .iter()
            .map(|m| {
                Method::from_bytes(m.to_ascii_uppercase().as_bytes())
                    .map_err(|_| ConfigError::Method(m.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            backends = config.addressing.backends.len(),
            default_address = ?config.addressing.default_address,
            body_methods = ?body_methods,
            "Client factory configured"
        );

        Ok(Self::with_request_builder(
            Arc::new(transport),
            Arc::new(addresses),
            RequestBuilder::new(body_methods),
        ))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Raw handle for an explicit descriptor.
    pub fn handle(
        &self,
        interface: Arc<InterfaceDescriptor>,
        backend: impl Into<String>,
    ) -> ClientHandle {
        ClientHandle::new(interface, backend.into(), self.dispatcher.clone())
    }

    /// Client for a single backend.
    pub fn create_one<T: RemoteInterface>(&self, backend: impl Into<String>) -> T {
        let backend = backend.into();
        tracing::debug!(backend = %backend, client = std::any::type_name::<T>(), "Creating client");
        T::from_handle(self.handle(self.descriptor_of::<T>(), backend))
    }

    /// One client per backend, in input order.
    pub fn create_many<T: RemoteInterface, S: AsRef<str>>(&self, backends: &[S]) -> Vec<T> {
        backends
            .iter()
            .map(|name| self.create_one(name.as_ref()))
            .collect()
    }

    /// Clients keyed by backend name.
    pub fn create_mapped<T: RemoteInterface, S: AsRef<str>>(
        &self,
        backends: &[S],
    ) -> HashMap<String, T> {
        backends
            .iter()
            .map(|name| (name.as_ref().to_string(), self.create_one(name.as_ref())))
            .collect()
    }

    fn descriptor_of<T: RemoteInterface>(&self) -> Arc<InterfaceDescriptor> {
        self.descriptors
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(T::descriptor()))
            .value()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{InboundResponse, OutboundRequest};
    use crate::error::{ClientResult, RestClientError, TransportError};
    use crate::mapping::MethodSpec;
    use crate::request::Args;
    use futures_util::future::BoxFuture;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use url::Url;

    struct EchoUrlTransport {
        urls: Mutex<Vec<String>>,
    }

    impl Transport for EchoUrlTransport {
        fn execute(
            &self,
            request: OutboundRequest,
        ) -> BoxFuture<'_, Result<InboundResponse, TransportError>> {
            let url = request.url.to_string();
            self.urls.lock().unwrap().push(url.clone());
            Box::pin(async move { Ok(InboundResponse::new(StatusCode::OK, url)) })
        }
    }

    /// Counts resolutions; only knows backends named `node-*`.
    #[derive(Default)]
    struct CountingResolver {
        calls: AtomicUsize,
    }

    impl AddressResolver for CountingResolver {
        fn resolve(&self, backend: &str) -> Result<Url, RestClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if backend.starts_with("node-") {
                Ok(Url::parse("http://gateway:8080").unwrap())
            } else {
                Err(RestClientError::UnknownBackend(backend.to_string()))
            }
        }
    }

    struct PingClient(ClientHandle);

    impl RemoteInterface for PingClient {
        fn descriptor() -> InterfaceDescriptor {
            InterfaceDescriptor::builder("PingApi")
                .method("ping", MethodSpec::new().get("/ping"))
                .build()
        }

        fn from_handle(handle: ClientHandle) -> Self {
            Self(handle)
        }
    }

    impl PingClient {
        async fn ping(&self) -> ClientResult<String> {
            self.0.invoke("ping", Args::new()).await
        }
    }

    fn factory() -> (ClientFactory, Arc<CountingResolver>) {
        let resolver = Arc::new(CountingResolver::default());
        let transport = Arc::new(EchoUrlTransport {
            urls: Mutex::new(Vec::new()),
        });
        (ClientFactory::new(transport, resolver.clone()), resolver)
    }

    #[tokio::test]
    async fn test_create_many_preserves_order() {
        let (factory, _) = factory();
        let clients: Vec<PingClient> = factory.create_many(&["node-b", "node-a", "node-c"]);

        let backends: Vec<&str> = clients.iter().map(|c| c.0.backend()).collect();
        assert_eq!(backends, vec!["node-b", "node-a", "node-c"]);
        assert_eq!(
            clients[1].ping().await.unwrap(),
            "http://gateway:8080/node-a/ping"
        );
    }

    #[test]
    fn test_create_mapped_keys_by_backend() {
        let (factory, _) = factory();
        let names = vec!["node-1".to_string(), "node-2".to_string()];
        let clients: HashMap<String, PingClient> = factory.create_mapped(&names);

        assert_eq!(clients.len(), 2);
        assert_eq!(clients["node-2"].0.backend(), "node-2");
    }

    #[test]
    fn test_descriptor_is_shared_between_clients() {
        let (factory, _) = factory();
        let a: PingClient = factory.create_one("node-a");
        let b: PingClient = factory.create_one("node-b");
        assert!(std::ptr::eq(a.0.interface(), b.0.interface()));
    }

    #[tokio::test]
    async fn test_address_resolution_is_deferred_and_cached() {
        let (factory, resolver) = factory();
        let client: PingClient = factory.create_one("node-a");
        let unknown: PingClient = factory.create_one("elsewhere");
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);

        client.ping().await.unwrap();
        client.ping().await.unwrap();
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);

        let err = unknown.ping().await.unwrap_err();
        assert!(matches!(err, RestClientError::UnknownBackend(_)));
    }

    struct UsersClient(ClientHandle);

    impl RemoteInterface for UsersClient {
        fn descriptor() -> InterfaceDescriptor {
            InterfaceDescriptor::builder("Api")
                .method("list", MethodSpec::new().get("/users"))
                .build()
        }

        fn from_handle(handle: ClientHandle) -> Self {
            Self(handle)
        }
    }

    struct OrdersClient(ClientHandle);

    impl RemoteInterface for OrdersClient {
        fn descriptor() -> InterfaceDescriptor {
            InterfaceDescriptor::builder("Api")
                .method("list", MethodSpec::new().get("/orders"))
                .build()
        }

        fn from_handle(handle: ClientHandle) -> Self {
            Self(handle)
        }
    }

    #[tokio::test]
    async fn test_same_named_interfaces_keep_their_own_endpoints() {
        let (factory, _) = factory();
        let users: UsersClient = factory.create_one("node-a");
        let orders: OrdersClient = factory.create_one("node-a");

        let users_url: String = users.0.invoke("list", Args::new()).await.unwrap();
        let orders_url: String = orders.0.invoke("list", Args::new()).await.unwrap();

        assert_eq!(users_url, "http://gateway:8080/node-a/users");
        assert_eq!(orders_url, "http://gateway:8080/node-a/orders");
        assert_eq!(factory.dispatcher().resolver().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_handle_is_shared_across_tasks() {
        let (factory, resolver) = factory();
        let client: PingClient = factory.create_one("node-a");
        client.ping().await.unwrap();

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let handle = client.0.clone();
                tokio::spawn(async move { handle.invoke::<String>("ping", Args::new()).await })
            })
            .collect();

        for task in tasks {
            let url = task.await.unwrap().unwrap();
            assert_eq!(url, "http://gateway:8080/node-a/ping");
        }
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
        assert_eq!(factory.dispatcher().resolver().len(), 1);
    }

    #[test]
    fn test_from_config_rejects_unknown_verb() {
        let mut config = ClientConfig::default();
        config.dispatch.body_methods = vec!["POST".into(), "NOT A VERB".into()];
        assert!(matches!(
            ClientFactory::from_config(&config),
            Err(ConfigError::Method(ref m)) if m == "NOT A VERB"
        ));
    }
}
