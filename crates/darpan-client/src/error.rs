//! Dashboard API client error types.

/// Errors from dashboard API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error (connect failure, timeout, broken stream).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a failure status or an error envelope.
    #[error("dashboard API {endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
