//! The flat, string-valued record every operation returns.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-facing result of one proxy operation.
///
/// Serializes to a flat JSON object of string values, matching what the
/// original workflow consumed: `success` and `message` are always present,
/// `error` and `http_status` appear only on failures, and the remaining
/// operation-specific fields are carried in [`fields`](Self::fields).
///
/// `success` is the string `"true"` or `"false"`, not a boolean. The
/// downstream workflow branches on that exact string, so the type keeps it
/// verbatim; Rust callers should use [`is_success`](Self::is_success).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// `"true"` on success, `"false"` on any failure.
    pub success: String,
    /// Human-readable summary, always present.
    pub message: String,
    /// Error detail, present on validation, remote, and execution failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// HTTP status as a decimal string, present only on remote failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<String>,
    /// Operation-specific fields (e.g. `username`, `arn`, `users`).
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Outcome {
    /// Successful outcome with the given summary message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: "true".to_string(),
            message: message.into(),
            error: None,
            http_status: None,
            fields: BTreeMap::new(),
        }
    }

    /// Input rejected before any network call was made.
    pub fn validation_failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: "false".to_string(),
            message: message.into(),
            error: Some(error.into()),
            http_status: None,
            fields: BTreeMap::new(),
        }
    }

    /// Proxy answered with a non-200 status.
    pub fn remote_failure(
        error: impl Into<String>,
        http_status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: "false".to_string(),
            message: message.into(),
            error: Some(error.into()),
            http_status: Some(http_status.to_string()),
            fields: BTreeMap::new(),
        }
    }

    /// Something raised mid-flight (transport, body decode, ...).
    pub fn script_error(error: impl fmt::Display) -> Self {
        Self {
            success: "false".to_string(),
            message: "Script execution error occurred".to_string(),
            error: Some(error.to_string()),
            http_status: None,
            fields: BTreeMap::new(),
        }
    }

    /// Attach an operation-specific field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.success == "true"
    }

    /// Look up an operation-specific field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
