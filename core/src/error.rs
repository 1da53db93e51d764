//! Error types for the request executor.
//!
//! # Design
//! Callers see a single error type, `RequestFailed`, naming the method and
//! URL of the failed call. What actually went wrong is kept as its `Cause`,
//! available through `cause()` and `std::error::Error::source`. Non-2xx
//! responses become `HttpStatusError`, which carries the status code and
//! response body for debugging.

use thiserror::Error;

use crate::http::HttpMethod;

/// Body text substituted when a failed response carried no content.
pub const EMPTY_MESSAGE: &str = "Empty message returned";

/// Errors raised by a `Transport` while dispatching a request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not reach the remote host
    #[error("Connection error: {0}")]
    Connection(String),
    /// The transport gave up waiting
    #[error("Request timeout")]
    Timeout,
    /// The request could not be built
    #[error("Request build error: {0}")]
    Build(String),
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// The server answered with a status outside the 2xx range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("An Exception occurred at {method} Url: {url} and returned Status Code: {status} with Message: {body}.")]
pub struct HttpStatusError {
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    /// Response body, or [`EMPTY_MESSAGE`] when the response had none.
    pub body: String,
}

impl HttpStatusError {
    pub fn new(method: HttpMethod, url: &str, status: u16, body: Option<String>) -> Self {
        Self {
            method,
            url: url.to_string(),
            status,
            body: body.unwrap_or_else(|| EMPTY_MESSAGE.to_string()),
        }
    }
}

/// Underlying reason a call failed.
#[derive(Debug, Error)]
pub enum Cause {
    #[error(transparent)]
    Status(#[from] HttpStatusError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be encoded as JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The success body could not be decoded into the requested type.
    #[error("failed to deserialize response body: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The caller's cancellation token fired before a response arrived.
    #[error("request was cancelled")]
    Cancelled,
}

/// The only error type returned by `RequestExecutor`.
#[derive(Debug, Error)]
#[error("An error occurred when sending {method} request to {url}")]
pub struct RequestFailed {
    pub method: HttpMethod,
    pub url: String,
    #[source]
    pub cause: Cause,
}

impl RequestFailed {
    pub fn new(method: HttpMethod, url: &str, cause: Cause) -> Self {
        Self {
            method,
            url: url.to_string(),
            cause,
        }
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    pub fn into_cause(self) -> Cause {
        self.cause
    }

    /// The normalized status error, when the server answered non-2xx.
    pub fn status_error(&self) -> Option<&HttpStatusError> {
        match &self.cause {
            Cause::Status(err) => Some(err),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.status_error().map(|err| err.status)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.cause, Cause::Cancelled)
    }
}
