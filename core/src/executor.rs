//! Typed GET/POST/PUT/DELETE helpers over a shared `Transport`.
//!
//! # Design
//! Every public method produces a `Result<_, Cause>` from the internal
//! helpers, then passes the outcome through `finish`, which wraps
//! any failure into `RequestFailed` and logs it. That gives each failed call
//! exactly one error type and exactly one log line, whether the failure came
//! from encoding, the transport, a non-2xx status, decoding or cancellation.
//!
//! Credentials and the `Accept` header live in `DefaultHeaders` and are
//! inserted at most once; each request carries a snapshot of them.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec;
use crate::config::{ExecutorConfig, RequestOptions};
use crate::error::{Cause, HttpStatusError, RequestFailed};
use crate::headers::DefaultHeaders;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::transport::Transport;

const ACCEPT: &str = "Accept";

/// Sends requests through a shared transport and normalizes the results.
///
/// Clones share the transport and the default headers.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    headers: DefaultHeaders,
    config: ExecutorConfig,
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, ExecutorConfig::default())
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: ExecutorConfig) -> Self {
        Self {
            transport,
            headers: DefaultHeaders::new(),
            config,
        }
    }

    /// Use `headers` instead of a private header list, e.g. to share
    /// credentials between executors.
    pub fn with_default_headers(mut self, headers: DefaultHeaders) -> Self {
        self.headers = headers;
        self
    }

    pub fn default_headers(&self) -> &DefaultHeaders {
        &self.headers
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    // === GET ===

    /// GET `url` and decode the body as `T`. An empty body yields `T::default()`.
    pub async fn get<T>(&self, url: &str, options: &RequestOptions) -> Result<T, RequestFailed>
    where
        T: DeserializeOwned + Default,
    {
        let result = self
            .dispatch(HttpMethod::Get, url, None, options)
            .await
            .and_then(|response| decode(&response));
        self.finish(HttpMethod::Get, url, result)
    }

    // === POST ===

    /// POST `body` as JSON and decode the response as `T`.
    pub async fn post<B, T>(
        &self,
        url: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, RequestFailed>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.send_decoded(HttpMethod::Post, url, encode(body), options).await
    }

    /// POST an already serialized body and decode the response as `T`.
    pub async fn post_text<T>(
        &self,
        url: &str,
        body: &str,
        options: &RequestOptions,
    ) -> Result<T, RequestFailed>
    where
        T: DeserializeOwned + Default,
    {
        self.send_decoded(HttpMethod::Post, url, Ok(body.to_string()), options)
            .await
    }

    /// POST `body` as JSON and return the successful response undecoded.
    pub async fn post_raw<B>(
        &self,
        url: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<HttpResponse, RequestFailed>
    where
        B: Serialize + ?Sized,
    {
        self.send_raw(HttpMethod::Post, url, encode(body), options).await
    }

    /// POST an already serialized body and return the successful response undecoded.
    pub async fn post_text_raw(
        &self,
        url: &str,
        body: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, RequestFailed> {
        self.send_raw(HttpMethod::Post, url, Ok(body.to_string()), options)
            .await
    }

    // === PUT ===

    /// PUT `body` as JSON and decode the response as `T`.
    pub async fn put<B, T>(
        &self,
        url: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, RequestFailed>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.send_decoded(HttpMethod::Put, url, encode(body), options).await
    }

    pub async fn put_text<T>(
        &self,
        url: &str,
        body: &str,
        options: &RequestOptions,
    ) -> Result<T, RequestFailed>
    where
        T: DeserializeOwned + Default,
    {
        self.send_decoded(HttpMethod::Put, url, Ok(body.to_string()), options)
            .await
    }

    pub async fn put_raw<B>(
        &self,
        url: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<HttpResponse, RequestFailed>
    where
        B: Serialize + ?Sized,
    {
        self.send_raw(HttpMethod::Put, url, encode(body), options).await
    }

    pub async fn put_text_raw(
        &self,
        url: &str,
        body: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, RequestFailed> {
        self.send_raw(HttpMethod::Put, url, Ok(body.to_string()), options)
            .await
    }

    // === DELETE ===

    /// DELETE `url` and return the success status code. The body is ignored.
    pub async fn delete(&self, url: &str, options: &RequestOptions) -> Result<u16, RequestFailed> {
        let result = self
            .dispatch(HttpMethod::Delete, url, None, options)
            .await
            .map(|response| response.status);
        self.finish(HttpMethod::Delete, url, result)
    }

    // === internals ===

    async fn send_decoded<T>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Result<String, serde_json::Error>,
        options: &RequestOptions,
    ) -> Result<T, RequestFailed>
    where
        T: DeserializeOwned + Default,
    {
        let result = self
            .send_body(method, url, body, options)
            .await
            .and_then(|response| decode(&response));
        self.finish(method, url, result)
    }

    async fn send_raw(
        &self,
        method: HttpMethod,
        url: &str,
        body: Result<String, serde_json::Error>,
        options: &RequestOptions,
    ) -> Result<HttpResponse, RequestFailed> {
        let result = self.send_body(method, url, body, options).await;
        self.finish(method, url, result)
    }

    async fn send_body(
        &self,
        method: HttpMethod,
        url: &str,
        body: Result<String, serde_json::Error>,
        options: &RequestOptions,
    ) -> Result<HttpResponse, Cause> {
        let body = body.map_err(Cause::Serialization)?;
        self.dispatch(method, url, Some(body), options).await
    }

    /// Merge default headers, send, and turn non-2xx responses into
    /// `HttpStatusError`.
    async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<String>,
        options: &RequestOptions,
    ) -> Result<HttpResponse, Cause> {
        self.add_authorization(options);

        let body = body.map(|text| {
            let content_type = options
                .content_type
                .clone()
                .unwrap_or_else(|| self.config.content_type.clone());
            self.ensure_accept(&content_type);
            RequestBody { content_type, text }
        });

        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers: self.headers.snapshot(),
            body,
        };

        tracing::debug!(%method, url, "sending request");

        let send = self.transport.send(request);
        let response = match &options.cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(Cause::Cancelled),
                response = send => response?,
            },
            None => send.await?,
        };

        tracing::debug!(%method, url, status = response.status, "received response");

        if response.is_success() {
            Ok(response)
        } else {
            Err(create_error(method, url, response).into())
        }
    }

    /// Insert the call's credentials into the default headers unless the
    /// header is already there. Blank values are ignored.
    fn add_authorization(&self, options: &RequestOptions) {
        let Some(auth) = &options.authorization else {
            return;
        };
        if auth.value.trim().is_empty() {
            return;
        }

        let name = auth
            .name
            .as_deref()
            .unwrap_or(&self.config.authorization_header);
        let prefix = auth
            .prefix
            .as_deref()
            .unwrap_or(&self.config.authorization_prefix);
        let value = format!("{prefix}{}", auth.value);

        let guards: &[&str] = if self.config.legacy_authorization_check {
            &[crate::config::DEFAULT_AUTHORIZATION_HEADER]
        } else {
            &[]
        };
        if self.headers.insert_unless_present(guards, name, &value) {
            tracing::debug!(header = name, "added authorization header");
        }
    }

    fn ensure_accept(&self, content_type: &str) {
        self.headers.insert_if_absent(ACCEPT, content_type);
    }

    fn finish<T>(
        &self,
        method: HttpMethod,
        url: &str,
        result: Result<T, Cause>,
    ) -> Result<T, RequestFailed> {
        result.map_err(|cause| {
            let err = RequestFailed::new(method, url, cause);
            tracing::error!(%method, url, cause = %err.cause, "{err}");
            err
        })
    }
}

fn encode<B>(body: &B) -> Result<String, serde_json::Error>
where
    B: Serialize + ?Sized,
{
    codec::serialize(body)
}

fn decode<T>(response: &HttpResponse) -> Result<T, Cause>
where
    T: DeserializeOwned + Default,
{
    response.json().map_err(Cause::Deserialization)
}

fn create_error(method: HttpMethod, url: &str, response: HttpResponse) -> HttpStatusError {
    HttpStatusError::new(method, url, response.status, response.body)
}
