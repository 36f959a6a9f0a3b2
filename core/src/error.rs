//! Error types for the jet client.
//!
//! # Design
//! Failures are passed through, never retried or reclassified. Non-2xx
//! responses are not errors: the caller gets the status on the returned
//! `HttpResponse` and decides. A secure call without a token is sent
//! without `Authorization` rather than rejected. Only a missing URL,
//! transport failures and JSON failures surface here.

use thiserror::Error;

/// Result type alias using `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `JetClient` and its collaborators.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No base URL is configured and the call supplied no URL.
    #[error("Request url undefined, are you sure you defined your baseUrl")]
    MissingUrl,

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body is not valid JSON.
    #[error("decode error: {0}")]
    Decode(String),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A configuration document or token file could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),
}
