//! Request building and dispatch.
//!
//! # Design
//! `JetClient` owns an immutable `ClientConfig` plus two collaborators: a
//! `Transport` that performs the round-trip and a `TokenStore` consulted for
//! secure calls when no token is configured. Every call runs the same linear
//! pipeline:
//!
//! resolve URL -> body -> merge headers -> default policy -> auth -> dispatch
//!
//! Header merging is pure. Each call starts from a copy of the instance
//! headers, so concurrent calls never see each other's `Authorization` or
//! per-call headers. The instance headers only change through
//! `set_header` / `extend_headers`, which add or overwrite but never remove.
//!
//! `build` and `parse_response` expose the two halves separately for callers
//! that execute the HTTP round-trip themselves.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::auth::{authorization_value, NoTokenStore, TokenStore};
use crate::config::{ClientConfig, RequestConfig};
use crate::error::{ApiError, Result};
use crate::headers::Headers;
use crate::http::{CacheMode, HttpMethod, HttpRequest, HttpResponse, JsonResponse};
use crate::transport::{ReqwestTransport, Transport};

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const CACHE: &str = "cache";

/// JSON HTTP client with optional bearer-token injection.
#[derive(Clone)]
pub struct JetClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    token_store: Arc<dyn TokenStore>,
}

impl fmt::Debug for JetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JetClient")
            .field("base_url", &self.config.base_url)
            .field("intercept_with_auth", &self.config.intercept_with_auth)
            .field("has_token", &self.config.token.is_some())
            .field("token_storage_key", &self.config.token_storage_key)
            .field("cachable", &self.config.cachable)
            .finish_non_exhaustive()
    }
}

impl JetClient {
    /// Client using `ReqwestTransport` and no token store.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: Arc::new(ReqwestTransport::new()),
            token_store: Arc::new(NoTokenStore),
        }
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn with_token_store(self, store: impl TokenStore + 'static) -> Self {
        self.with_shared_token_store(Arc::new(store))
    }

    /// Share a store with the code that writes tokens into it.
    pub fn with_shared_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = store;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Add or overwrite one instance header.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.config.default_headers.insert(name, value);
    }

    /// Union `headers` into the instance headers; `headers` wins on collisions.
    pub fn extend_headers(&mut self, headers: &Headers) {
        self.config.default_headers.merge(headers);
    }

    /// Join `url` onto the base URL with exactly one `/` between them.
    ///
    /// Without a base URL the input is returned verbatim. An empty result is
    /// `ApiError::MissingUrl`.
    pub fn resolve_url(&self, url: Option<&str>) -> Result<String> {
        let path = url.unwrap_or("");
        let resolved = match self.config.base_url.as_deref().filter(|b| !b.is_empty()) {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.strip_prefix('/').unwrap_or(path);
                format!("{base}/{path}")
            }
            None => path.to_string(),
        };
        if resolved.is_empty() {
            return Err(ApiError::MissingUrl);
        }
        Ok(resolved)
    }

    /// Merge headers for one call:
    /// instance, then the `cache` directive, then `config.headers`, then
    /// `call_headers`. Later sources win.
    pub fn resolve_headers(
        &self,
        call_headers: Option<&Headers>,
        config: &RequestConfig,
    ) -> Headers {
        let cache = config
            .cache
            .unwrap_or_else(|| CacheMode::from_cachable(self.config.cachable));

        let mut headers = self.config.default_headers.clone();
        headers.insert(CACHE, cache.as_str());
        headers.merge(&config.headers);
        if let Some(call_headers) = call_headers {
            headers.merge(call_headers);
        }
        trace!(count = headers.len(), "resolved headers");
        headers
    }

    /// Ensure `Access-Control-Allow-Origin` and `Content-Type` are present.
    ///
    /// A declared request mode forces the allow-origin value to `*`.
    pub fn apply_default_policy(&self, headers: &mut Headers, config: &RequestConfig) {
        if config.mode.is_some() {
            headers.insert(ALLOW_ORIGIN, "*");
        } else {
            headers.insert_if_absent(ALLOW_ORIGIN, "*");
        }
        headers.insert_if_absent(CONTENT_TYPE, "application/json");
    }

    /// Attach `Authorization` unless one is already present.
    ///
    /// A secure call with no resolvable token goes out without the header.
    pub fn attach_auth(&self, headers: &mut Headers) {
        if headers.contains(AUTHORIZATION) {
            return;
        }
        match authorization_value(&self.config, self.token_store.as_ref()) {
            Some(value) => headers.insert(AUTHORIZATION, value),
            None => warn!(
                key = %self.config.token_storage_key,
                intercept_with_auth = self.config.intercept_with_auth,
                "secure request has no token; sending without Authorization"
            ),
        }
    }

    /// Build the request for one call without performing I/O.
    ///
    /// `config.method`, when set, replaces `method`. Method names are
    /// normalized, so `Other("get")` is treated as `Get`. Bodies are dropped
    /// for methods that cannot carry one, and `null` / `{}` bodies are not
    /// sent.
    pub fn build(
        &self,
        method: HttpMethod,
        url: Option<&str>,
        body: Option<Value>,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
        secure: bool,
    ) -> Result<HttpRequest> {
        let default_config = RequestConfig::default();
        let config = config.unwrap_or(&default_config);
        let method = HttpMethod::from(config.method.as_ref().unwrap_or(&method).as_str());

        let url = self.resolve_url(url)?;

        let body = match body {
            Some(body) if method.allows_body() && !is_empty_body(&body) => Some(
                serde_json::to_string(&body).map_err(|e| ApiError::Serialization(e.to_string()))?,
            ),
            _ => None,
        };

        let mut headers = self.resolve_headers(headers, config);
        self.apply_default_policy(&mut headers, config);
        if secure {
            self.attach_auth(&mut headers);
        }

        let cache = match headers.get(CACHE) {
            Some(v) if v.eq_ignore_ascii_case(CacheMode::NoCache.as_str()) => CacheMode::NoCache,
            _ => CacheMode::Default,
        };

        debug!(%method, %url, secure, has_body = body.is_some(), "built request");
        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
            cache,
            mode: config.mode,
        })
    }

    /// Decode a raw response into the `{response, data}` pair.
    pub fn parse_response(&self, response: HttpResponse) -> Result<JsonResponse> {
        let data = response.json()?;
        Ok(JsonResponse { response, data })
    }

    /// Build, send and decode one request.
    pub async fn execute(
        &self,
        method: HttpMethod,
        url: Option<&str>,
        body: Option<Value>,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
        secure: bool,
    ) -> Result<JsonResponse> {
        let request = self.build(method, url, body, headers, config, secure)?;
        let response = self.transport.send(request).await?;
        debug!(status = response.status, "received response");
        self.parse_response(response)
    }

    pub async fn get(
        &self,
        url: &str,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        self.execute(HttpMethod::Get, Some(url), None, headers, config, false)
            .await
    }

    pub async fn gets(
        &self,
        url: &str,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        self.execute(HttpMethod::Get, Some(url), None, headers, config, true)
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        let body = to_body(body)?;
        self.execute(HttpMethod::Post, Some(url), Some(body), headers, config, false)
            .await
    }

    pub async fn posts<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        let body = to_body(body)?;
        self.execute(HttpMethod::Post, Some(url), Some(body), headers, config, true)
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        let body = to_body(body)?;
        self.execute(HttpMethod::Put, Some(url), Some(body), headers, config, false)
            .await
    }

    pub async fn puts<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        let body = to_body(body)?;
        self.execute(HttpMethod::Put, Some(url), Some(body), headers, config, true)
            .await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        let body = to_body(body)?;
        self.execute(HttpMethod::Patch, Some(url), Some(body), headers, config, false)
            .await
    }

    pub async fn patchs<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        let body = to_body(body)?;
        self.execute(HttpMethod::Patch, Some(url), Some(body), headers, config, true)
            .await
    }

    pub async fn delete(
        &self,
        url: &str,
        body: Option<Value>,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        self.execute(HttpMethod::Delete, Some(url), body, headers, config, false)
            .await
    }

    pub async fn deletes(
        &self,
        url: &str,
        body: Option<Value>,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
    ) -> Result<JsonResponse> {
        self.execute(HttpMethod::Delete, Some(url), body, headers, config, true)
            .await
    }

    /// Run the pipeline with any method, e.g. `custom(url, "PURGE", ...)`.
    pub async fn custom(
        &self,
        url: Option<&str>,
        method: impl Into<HttpMethod>,
        body: Option<Value>,
        headers: Option<&Headers>,
        config: Option<&RequestConfig>,
        secure: bool,
    ) -> Result<JsonResponse> {
        self.execute(method.into(), url, body, headers, config, secure)
            .await
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
