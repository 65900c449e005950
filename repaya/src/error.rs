//! Error types for the repaya client.

use std::fmt;

use crate::transport::TransportError;

/// Remote-reported API failure.
///
/// Decoded from the `error` field of the response envelope and surfaced to
/// callers unchanged. `data` is opaque diagnostic payload; its shape is
/// owned by the service.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiError {
    /// Numeric error code assigned by the API.
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Opaque diagnostic data attached by the API, if any.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "api error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Errors raised by the repaya client.
///
/// Validation variants are raised before any network activity; the
/// remaining variants surface remote or transport failures without
/// retrying or wrapping them further.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The environment is not a bare `scheme://host(:port)` base URL.
    #[error(
        "invalid environment \"{0}\": must be one of \"https://repaya.io\", \"https://goerli.repaya.io\""
    )]
    InvalidEnvironment(String),

    /// The API token is present but empty.
    #[error("invalid api token")]
    InvalidToken,

    /// A required identifier was empty.
    #[error("{0} cannot be empty")]
    EmptyParameter(&'static str),

    /// A date filter string could not be parsed.
    #[error("invalid date filter \"{0}\"")]
    InvalidDate(String),

    /// The API reported a failure through the response envelope.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The underlying transport failed; the source is preserved unchanged.
    #[error("transport failed: {0}")]
    Transport(#[source] TransportError),

    /// The response body (or an encoded data sub-field) was not valid JSON.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}
