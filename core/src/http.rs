//! HTTP transport types exchanged with the `Transport` boundary.
//!
//! # Design
//! Requests and responses are plain data. The executor builds `HttpRequest`
//! values and inspects `HttpResponse` values; the transport is the only piece
//! that touches the network. All fields use owned types so values can move
//! freely into spawned tasks or blocking threads.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::codec;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text payload together with the media type it is encoded as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content_type: String,
    pub text: String,
}

impl RequestBody {
    /// Value for the outgoing `Content-Type` header. Bodies are always UTF-8.
    pub fn content_type_header(&self) -> String {
        format!("{}; charset=utf-8", self.content_type)
    }
}

/// An HTTP request described as plain data.
///
/// `headers` is a snapshot of the executor's default headers taken when the
/// request was built; the body's content type travels separately in `body`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// Returned by `Transport::send` and handed back to callers of the raw
/// `*_raw` executor methods. `body` is `None` when the transport received no
/// content at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Body text, or `""` when absent.
    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Decode the body as JSON; an empty body yields `T::default()`.
    pub fn json<T>(&self) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned + Default,
    {
        codec::deserialize(self.text())
    }
}

pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
