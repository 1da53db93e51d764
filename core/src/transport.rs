//! The boundary between the executor and whatever actually performs I/O.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Dispatches one HTTP request and returns the response as data.
///
/// Implementations must return every status code as a response, including
/// 4xx and 5xx; only failures to obtain a response at all (DNS, TLS,
/// connection, timeout) are errors. The body's `Content-Type` is taken from
/// `HttpRequest::body`; `HttpRequest::headers` are sent as given.
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
