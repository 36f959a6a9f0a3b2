//! Client and per-call configuration.
//!
//! # Design
//! `ClientConfig` is built once and owned by the client. Its key names in
//! JSON match the constructor options (`baseUrl`, `sendTokenAs`, ...), so a
//! config document written for the client loads as-is. `RequestConfig`
//! enumerates the per-call transport options that used to be free-form.

use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::headers::Headers;
use crate::http::{CacheMode, HttpMethod, RequestMode};

pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "SecretKey";
pub const DEFAULT_SEND_TOKEN_AS: &str = "Bearer";

/// Instance configuration for `JetClient`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub intercept_with_auth: bool,
    pub token: Option<String>,
    pub token_storage_key: String,
    pub send_token_as: String,
    pub default_headers: Headers,
    pub cachable: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            intercept_with_auth: false,
            token: None,
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            send_token_as: DEFAULT_SEND_TOKEN_AS.to_string(),
            default_headers: Headers::new(),
            cachable: true,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Some(base_url.to_string()),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON document. Absent keys keep their
    /// defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ApiError::Config(e.to_string()))
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_token_storage_key(mut self, key: impl Into<String>) -> Self {
        self.token_storage_key = key.into();
        self
    }

    pub fn with_send_token_as(mut self, scheme: impl Into<String>) -> Self {
        self.send_token_as = scheme.into();
        self
    }

    pub fn with_intercept_with_auth(mut self, intercept: bool) -> Self {
        self.intercept_with_auth = intercept;
        self
    }

    pub fn with_cachable(mut self, cachable: bool) -> Self {
        self.cachable = cachable;
        self
    }

    pub fn with_default_headers(mut self, headers: impl Into<Headers>) -> Self {
        self.default_headers.merge(&headers.into());
        self
    }
}

/// Per-call transport options, merged under the call's own headers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Overrides the verb's method when set.
    pub method: Option<HttpMethod>,
    pub headers: Headers,
    /// Overrides the client's `cachable` setting for this call.
    pub cache: Option<CacheMode>,
    pub mode: Option<RequestMode>,
}

impl RequestConfig {
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers.merge(&headers.into());
        self
    }

    pub fn with_cache(mut self, cache: CacheMode) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }
}
