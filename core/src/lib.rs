//! JSON HTTP client core with bearer-token injection.
//!
//! # Overview
//! `JetClient` turns a base URL, default headers and an auth policy plus
//! per-call overrides into a ready-to-send `HttpRequest`, runs it through a
//! `Transport`, and returns the raw response together with its decoded JSON
//! body.
//!
//! # Design
//! - Configuration is explicit: `ClientConfig` for the instance,
//!   `RequestConfig` for one call. No free-form option bags.
//! - Header merging is a pure function of instance config and call inputs,
//!   so concurrent calls do not leak headers into each other.
//! - Every verb helper (`get`, `posts`, ...) is an alias of `execute`.
//! - `build` / `parse_response` split the pipeline at the I/O boundary for
//!   callers that run the round-trip themselves.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod transport;

pub use auth::{FileTokenStore, MemoryTokenStore, NoTokenStore, TokenStore};
pub use client::JetClient;
pub use config::{ClientConfig, RequestConfig};
pub use error::{ApiError, Result};
pub use headers::Headers;
pub use http::{CacheMode, HttpMethod, HttpRequest, HttpResponse, JsonResponse, RequestMode};
pub use transport::{ReqwestTransport, Transport};
