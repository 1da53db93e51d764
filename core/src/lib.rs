//! Typed JSON helpers over a pluggable HTTP transport.
//!
//! # Overview
//! `RequestExecutor` wraps a shared `Transport` and offers GET/POST/PUT/DELETE
//! helpers that attach credentials once, encode request bodies as JSON,
//! decode success bodies into caller types and normalize every failure into
//! a single `RequestFailed` error.
//!
//! # Design
//! - The transport only moves bytes. It receives an `HttpRequest` and returns
//!   an `HttpResponse` for any status code, so all status interpretation
//!   lives in the executor.
//! - Credentials and the `Accept` header are kept in `DefaultHeaders`,
//!   inserted at most once per name and shared by executor clones.
//! - A `reqwest` backend is bundled behind the default `reqwest` feature;
//!   any other client can be plugged in by implementing `Transport`.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use http_helper::{RequestExecutor, RequestOptions, ReqwestTransport};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Account {
//!     id: u64,
//!     name: String,
//! }
//!
//! async fn example() -> Result<Account, http_helper::RequestFailed> {
//!     let executor = RequestExecutor::new(Arc::new(ReqwestTransport::new()));
//!     let options = RequestOptions::new().bearer("secret-token");
//!     executor.get("https://api.example.com/account", &options).await
//! }
//! ```

pub mod backends;
pub mod codec;
pub mod config;
pub mod error;
pub mod executor;
pub mod headers;
pub mod http;
pub mod transport;

#[cfg(feature = "reqwest")]
pub use backends::{ReqwestTransport, ReqwestTransportBuilder};
pub use config::{Authorization, ExecutorConfig, RequestOptions};
pub use error::{Cause, HttpStatusError, RequestFailed, TransportError, EMPTY_MESSAGE};
pub use executor::RequestExecutor;
pub use headers::DefaultHeaders;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use tokio_util::sync::CancellationToken;
pub use transport::Transport;
