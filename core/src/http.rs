//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! client builds an `HttpRequest` per call and hands it to a `Transport`
//! (or back to the caller, who runs the round-trip and returns an
//! `HttpResponse`). Nothing here touches the network.
//!
//! All fields use owned types (`String`, `Vec`) so a request outlives the
//! client call that built it.

use std::fmt;

use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::headers::Headers;

/// HTTP method for a request.
///
/// Method strings are matched case-insensitively; anything outside the
/// named verbs is kept upper-cased in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Other(m) => m,
        }
    }

    /// Whether a body may be sent with this method. `Other("get")` counts
    /// as GET.
    pub fn allows_body(&self) -> bool {
        let name = self.as_str();
        !(name.eq_ignore_ascii_case("GET") || name.eq_ignore_ascii_case("HEAD"))
    }
}

impl From<&str> for HttpMethod {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            other => HttpMethod::Other(other.to_string()),
        }
    }
}

impl From<String> for HttpMethod {
    fn from(s: String) -> Self {
        HttpMethod::from(s.as_str())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache directive carried in the `cache` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheMode {
    #[default]
    Default,
    NoCache,
}

impl CacheMode {
    pub fn from_cachable(cachable: bool) -> Self {
        if cachable {
            CacheMode::Default
        } else {
            CacheMode::NoCache
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CacheMode::Default => "default",
            CacheMode::NoCache => "no-cache",
        }
    }
}

/// Fetch-style request mode. Declaring any mode forces
/// `Access-Control-Allow-Origin: *` on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    Cors,
    NoCors,
    SameOrigin,
}

/// An HTTP request described as plain data.
///
/// Built by `JetClient::build`. `headers` already holds the merged instance
/// headers, defaults and, for secure calls, the `Authorization` entry.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
    pub cache: CacheMode,
    pub mode: Option<RequestMode>,
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport`, or constructed by the caller after executing
/// an `HttpRequest` itself.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// The normalized result of a call: the raw response plus its decoded body.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    pub response: HttpResponse,
    pub data: serde_json::Value,
}
