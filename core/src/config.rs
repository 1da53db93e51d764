//! Executor-wide configuration and per-call request options.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_AUTHORIZATION_HEADER: &str = "Authorization";
pub const DEFAULT_AUTHORIZATION_PREFIX: &str = "Bearer ";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Defaults applied when a call's `RequestOptions` leave a field unset.
///
/// Deserializable from any serde source; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Header the authorization value is sent under.
    pub authorization_header: String,
    /// Prepended to the authorization value, e.g. `"Bearer "`.
    pub authorization_prefix: String,
    /// Media type of request bodies, also used for the default `Accept` header.
    pub content_type: String,
    /// Skip adding authorization whenever a literal `Authorization` header is
    /// already present, whatever header name the call asked for. A custom
    /// header name is still inserted at most once, so it never duplicates.
    pub legacy_authorization_check: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            authorization_header: DEFAULT_AUTHORIZATION_HEADER.to_string(),
            authorization_prefix: DEFAULT_AUTHORIZATION_PREFIX.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            legacy_authorization_check: false,
        }
    }
}

/// Credentials to attach to the executor's default headers.
///
/// `name` and `prefix` fall back to the executor's configuration when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    pub value: String,
    pub name: Option<String>,
    pub prefix: Option<String>,
}

impl Authorization {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: None,
            prefix: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Per-call options. `RequestOptions::default()` sends no credentials, uses
/// the configured content type and cannot be cancelled.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub authorization: Option<Authorization>,
    pub content_type: Option<String>,
    pub cancellation: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authorize with `token` under the configured header name and prefix.
    pub fn bearer(self, token: impl Into<String>) -> Self {
        self.authorization(Authorization::new(token))
    }

    pub fn authorization(mut self, authorization: Authorization) -> Self {
        self.authorization = Some(authorization);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Abort the call when `token` is cancelled.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}
