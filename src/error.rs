//! Error taxonomy for client dispatch and installation.
//!
//! Every failure carries an [`ErrorKind`] so callers can tell configuration
//! mistakes apart from remote or network failures without parsing messages.

use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification of a [`RestClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Metadata, binding, or addressing problem. Never fixed by retrying.
    Configuration,
    /// Argument encoding or response decoding failed.
    Codec,
    /// The backend answered with a non-2xx status.
    Remote,
    /// The transport could not complete the exchange.
    Transport,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Codec => "codec",
            ErrorKind::Remote => "remote",
            ErrorKind::Transport => "transport",
        }
    }
}

/// Errors raised by a generated client method.
#[derive(Debug, Error)]
pub enum RestClientError {
    /// The invoked method has no endpoint mapping.
    #[error("{interface}.{method} has no endpoint mapping")]
    MissingEndpointMetadata { interface: String, method: String },

    /// The built request path does not start with `/`.
    #[error("{interface}.{method}'s request path is illegal: '{path}' must start with '/'")]
    IllegalPath {
        interface: String,
        method: String,
        path: String,
    },

    /// A query or path binding declares an empty name.
    #[error("{interface}.{method}: parameter {index} is bound without a name")]
    MissingBindingName {
        interface: String,
        method: String,
        index: usize,
    },

    /// The address resolver does not know the backend.
    #[error("no address configured for backend '{0}'")]
    UnknownBackend(String),

    /// The composed request URL could not be parsed.
    #[error("invalid request URL '{url}': {reason}")]
    InvalidAddress { url: String, reason: String },

    /// An argument could not be serialized.
    #[error("failed to encode argument: {0}")]
    Encode(#[source] serde_json::Error),

    /// A request header could not be encoded.
    #[error("failed to encode header '{name}': {source}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// The response body did not match the declared return type.
    #[error("failed to decode response of {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Non-2xx response from the backend.
    #[error("{path} request failed: HTTP {status}: {body_preview}")]
    RemoteCall {
        path: String,
        status: StatusCode,
        body_preview: String,
    },

    /// Network-level failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl RestClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestClientError::MissingEndpointMetadata { .. }
            | RestClientError::IllegalPath { .. }
            | RestClientError::MissingBindingName { .. }
            | RestClientError::UnknownBackend(_)
            | RestClientError::InvalidAddress { .. } => ErrorKind::Configuration,
            RestClientError::Encode(_)
            | RestClientError::InvalidHeader { .. }
            | RestClientError::Decode { .. } => ErrorKind::Codec,
            RestClientError::RemoteCall { .. } => ErrorKind::Remote,
            RestClientError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Whether repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RestClientError::Transport(_) => true,
            RestClientError::RemoteCall { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

/// Failure reported by a [`crate::dispatch::Transport`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            "request failed".to_string()
        };
        Self::with_source(message, err)
    }
}

/// Errors raised while wiring clients into an object.
#[derive(Debug, Error)]
pub enum InstallError {
    /// An injection site declares no backend names.
    #[error("{field}'s client reference declares no backend names")]
    MissingBackendNames { field: String },
}

impl InstallError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

/// Result alias for client calls.
pub type ClientResult<T> = Result<T, RestClientError>;
