//! Client configuration.
//!
//! The original integration repeated the proxy endpoint in every script;
//! here it is a single shared value injected into one client.

use std::time::Duration;

use crate::errors::{IamProxyError, Result};

/// Default proxy endpoint (API Gateway stage URL).
pub const DEFAULT_ENDPOINT: &str =
    "https://0sb9pw9hbj.execute-api.us-east-2.amazonaws.com/default/ServiceNowIAMProxy";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`IamProxyClient`](crate::IamProxyClient).
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Full URL of the proxy endpoint. Every operation POSTs here.
    pub endpoint: String,
    /// API key sent as the `x-api-key` header when present.
    ///
    /// The proxy does not currently require one, so the default is `None`.
    pub api_key: Option<String>,
    /// Request timeout applied to the underlying HTTP client.
    pub timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProxyConfig {
    /// Create a configuration pointing at a custom endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), ..Self::default() }
    }

    /// Set the API key to send with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate that the configured endpoint is a parseable URL.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.endpoint)
            .map_err(|_| IamProxyError::Config(format!("invalid endpoint URL: {}", self.endpoint)))?;
        Ok(())
    }
}
