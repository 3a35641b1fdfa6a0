//! Error types for the IAM proxy client.

use thiserror::Error;

/// Errors raised while building or executing a proxy request.
///
/// These never escape the public client methods: every operation catches
/// at the boundary and folds the error into an [`Outcome`](crate::Outcome)
/// with `success: "false"`. The type is public so the fallible internals
/// stay testable.
#[derive(Debug, Error)]
pub enum IamProxyError {
    /// Client configuration is unusable (bad endpoint URL, builder failure).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP transport failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 200 response body could not be decoded into the expected shape.
    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for IAM proxy operations.
pub type Result<T> = std::result::Result<T, IamProxyError>;
