//! The interception point behind every generated client method.
//!
//! # Responsibilities
//! - Resolve endpoint metadata and build the request
//! - Address the request at the handle's backend
//! - Execute through the transport and shape the response
//! - Log and count every call by outcome

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::client::ClientHandle;
use crate::dispatch::address::AddressResolver;
use crate::dispatch::response::{check_status, decode};
use crate::dispatch::transport::{OutboundRequest, Transport};
use crate::error::{ClientResult, RestClientError};
use crate::mapping::{MetadataResolver, ResolvedEndpoint};
use crate::observability::metrics;
use crate::request::{Args, RequestBuilder};

/// Correlation header attached to every dispatched call.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Shared dispatch engine. One instance serves every client handle.
pub struct Dispatcher {
    resolver: MetadataResolver,
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
    addresses: Arc<dyn AddressResolver>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("resolver", &self.resolver)
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        addresses: Arc<dyn AddressResolver>,
        builder: RequestBuilder,
    ) -> Self {
        Self {
            resolver: MetadataResolver::new(),
            builder,
            transport,
            addresses,
        }
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    /// Dispatch `method` and decode the body into `R`.
    pub async fn invoke<R: DeserializeOwned>(
        &self,
        handle: &ClientHandle,
        method: &str,
        args: Args,
    ) -> ClientResult<R> {
        let start = Instant::now();
        let result = match self.exchange(handle, method, &args).await {
            Ok((endpoint, body)) => decode(&endpoint.path_template, &body),
            Err(e) => Err(e),
        };
        record(handle, method, start, &result);
        result
    }

    /// Dispatch `method` and discard the response body.
    pub async fn invoke_void(
        &self,
        handle: &ClientHandle,
        method: &str,
        args: Args,
    ) -> ClientResult<()> {
        let start = Instant::now();
        let result = self.exchange(handle, method, &args).await.map(|_| ());
        record(handle, method, start, &result);
        result
    }

    async fn exchange(
        &self,
        handle: &ClientHandle,
        method: &str,
        args: &Args,
    ) -> ClientResult<(Arc<ResolvedEndpoint>, String)> {
        let endpoint = self.resolver.resolve(handle.interface(), method)?;
        let request = self.builder.build(&endpoint, args)?;

        let target = handle.target(self.addresses.as_ref())?;
        let url = target.url_for(&request.path)?;

        let request_id = Uuid::new_v4().to_string();
        let request_id_value =
            HeaderValue::from_str(&request_id).map_err(|source| RestClientError::InvalidHeader {
                name: "x-request-id",
                source,
            })?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(X_REQUEST_ID, request_id_value);

        let body = request
            .body
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(RestClientError::Encode)?;

        tracing::debug!(
            request_id = %request_id,
            interface = %endpoint.interface,
            method = %endpoint.method,
            backend = %target.name,
            http_method = %request.method,
            url = %url,
            "Dispatching remote call"
        );

        let response = self
            .transport
            .execute(OutboundRequest {
                method: request.method,
                url,
                headers,
                body,
            })
            .await
            .inspect_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "Transport failure");
            })?;

        check_status(&endpoint.path_template, &response).inspect_err(|_| {
            tracing::warn!(
                request_id = %request_id,
                status = %response.status,
                path = %endpoint.path_template,
                "Remote call returned non-success status"
            );
        })?;

        Ok((endpoint, response.body))
    }
}

fn record<T>(handle: &ClientHandle, method: &str, start: Instant, result: &ClientResult<T>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.kind().as_str(),
    };
    metrics::record_call(handle.interface().name(), method, handle.backend(), outcome, start);
}
