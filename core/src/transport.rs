//! Network transports.
//!
//! `Transport` is the only place the client performs I/O. `ReqwestTransport`
//! is the default; tests and embedders can supply their own.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ApiError, Result};
use crate::http::{CacheMode, HttpMethod, HttpRequest, HttpResponse};

/// Executes a built `HttpRequest` and returns the raw response.
///
/// Only failures to obtain a response are errors; any status code is a
/// successful round-trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: &HttpMethod) -> Result<reqwest::Method> {
    match method {
        HttpMethod::Get => Ok(reqwest::Method::GET),
        HttpMethod::Post => Ok(reqwest::Method::POST),
        HttpMethod::Put => Ok(reqwest::Method::PUT),
        HttpMethod::Patch => Ok(reqwest::Method::PATCH),
        HttpMethod::Delete => Ok(reqwest::Method::DELETE),
        HttpMethod::Head => Ok(reqwest::Method::HEAD),
        HttpMethod::Options => Ok(reqwest::Method::OPTIONS),
        HttpMethod::Other(m) => reqwest::Method::from_bytes(m.as_bytes())
            .map_err(|e| ApiError::Transport(format!("invalid method {m:?}: {e}"))),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = to_reqwest_method(&request.method)?;
        let mut builder = self.client.request(method, &request.url);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if request.cache == CacheMode::NoCache && !request.headers.contains("Cache-Control") {
            builder = builder.header(reqwest::header::CACHE_CONTROL, "no-cache");
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("request failed: {e}")))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read response body: {e}")))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
