//! The IAM proxy client and its four operations.

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::config::ProxyConfig;
use crate::errors::{IamProxyError, Result};
use crate::outcome::Outcome;
use crate::requests::{
    is_valid_username, CreateUserInput, DeleteUserInput, GetUserInput, ProxyRequest,
    INVALID_USERNAME_ERROR,
};
use crate::responses::{
    CreateUserResponse, DeleteUserResponse, ErrorBody, GetUserResponse, ListUsersResponse,
};

const USERNAME_REQUIRED_ERROR: &str = "Username is required";

const CREATE_PROMPT: &str = "Please provide a username for the new IAM user";
const DELETE_PROMPT: &str = "Please provide a username to delete";
const GET_PROMPT: &str = "Please provide a username to retrieve details";

const CREATE_FAILED: &str = "Failed to create IAM user";
const DELETE_FAILED: &str = "Failed to delete IAM user";
const GET_FAILED: &str = "Failed to retrieve user details";
const LIST_FAILED: &str = "Failed to list IAM users";

const SECRET_KEY_WARNING: &str =
    "Store the secret access key securely - it cannot be retrieved again";

/// Client for the ServiceNow IAM proxy.
///
/// Each operation is one synchronous POST/response exchange: validate the
/// input, send the tagged JSON payload, branch on the HTTP status, and
/// reshape the body into a flat [`Outcome`]. No operation ever returns an
/// `Err` or panics; every failure mode is folded into the outcome.
///
/// The client is cheap to clone and holds no mutable state, so it can be
/// shared across tasks.
#[derive(Clone)]
pub struct IamProxyClient {
    client: reqwest::Client,
    config: ProxyConfig,
}

impl IamProxyClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    /// Returns [`IamProxyError::Config`] if the endpoint URL is malformed,
    /// or [`IamProxyError::Http`] if the transport cannot be built.
    pub fn new(config: ProxyConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .map_err(IamProxyError::from)?;

        Ok(Self { client, config })
    }

    /// Create a client against the default proxy endpoint.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ProxyConfig::default())
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Create an IAM user with standard tags and a fresh access key.
    pub async fn create_user(&self, input: &CreateUserInput) -> Outcome {
        if let Some(rejected) = reject_username(&input.username, CREATE_PROMPT) {
            return rejected;
        }

        info!(username = %input.username, "creating IAM user");
        let request = ProxyRequest::create(input);
        match self.execute_create(&request).await {
            Ok(outcome) => outcome,
            Err(err) => script_error(&err),
        }
    }

    /// Delete an IAM user along with its access keys and policy attachments.
    pub async fn delete_user(&self, input: &DeleteUserInput) -> Outcome {
        if let Some(rejected) = reject_username(&input.username, DELETE_PROMPT) {
            return rejected;
        }

        info!(username = %input.username, "deleting IAM user");
        let request = ProxyRequest::delete(input);
        match self.execute_delete(&request).await {
            Ok(outcome) => outcome,
            Err(err) => script_error(&err),
        }
    }

    /// Fetch details for a single IAM user.
    pub async fn get_user(&self, input: &GetUserInput) -> Outcome {
        if let Some(rejected) = reject_username(&input.username, GET_PROMPT) {
            return rejected;
        }

        info!(username = %input.username, "fetching IAM user details");
        let request = ProxyRequest::get(input);
        match self.execute_get(&request).await {
            Ok(outcome) => outcome,
            Err(err) => script_error(&err),
        }
    }

    /// List all IAM users. Takes no input and performs no validation.
    pub async fn list_users(&self) -> Outcome {
        info!("listing IAM users");
        match self.execute_list(&ProxyRequest::list()).await {
            Ok(outcome) => outcome,
            Err(err) => script_error(&err),
        }
    }

    async fn execute_create(&self, request: &ProxyRequest) -> Result<Outcome> {
        let (status, body) = self.call(request).await?;
        if status != StatusCode::OK {
            return Ok(remote_failure(status, &body, CREATE_FAILED));
        }

        let parsed: CreateUserResponse = serde_json::from_str(&body)?;
        Ok(Outcome::success("IAM user created successfully")
            .with_field("username", parsed.username)
            .with_field("arn", parsed.arn)
            .with_field("user_id", parsed.user_id)
            .with_field("access_key_id", parsed.access_key_id)
            .with_field("secret_access_key", parsed.secret_access_key)
            .with_field("policy_attached", parsed.policy_attached)
            .with_field("created_date", parsed.created_date)
            .with_field("warning", SECRET_KEY_WARNING))
    }

    async fn execute_delete(&self, request: &ProxyRequest) -> Result<Outcome> {
        let (status, body) = self.call(request).await?;
        if status != StatusCode::OK {
            return Ok(remote_failure(status, &body, DELETE_FAILED));
        }

        let parsed: DeleteUserResponse = serde_json::from_str(&body)?;
        Ok(Outcome::success(
            "IAM user deleted successfully. All access keys and policies have been removed.",
        )
        .with_field("username", parsed.username))
    }

    async fn execute_get(&self, request: &ProxyRequest) -> Result<Outcome> {
        let (status, body) = self.call(request).await?;
        if status != StatusCode::OK {
            return Ok(remote_failure(status, &body, GET_FAILED));
        }

        let parsed: GetUserResponse = serde_json::from_str(&body)?;
        let attached_policies = parsed.policy_names();
        let access_keys = parsed.access_key_summaries();
        Ok(Outcome::success("User details retrieved successfully")
            .with_field("username", parsed.username)
            .with_field("arn", parsed.arn)
            .with_field("user_id", parsed.user_id)
            .with_field("created_date", parsed.created_date)
            .with_field("attached_policies", attached_policies)
            .with_field("access_keys", access_keys))
    }

    async fn execute_list(&self, request: &ProxyRequest) -> Result<Outcome> {
        let (status, body) = self.call(request).await?;
        if status != StatusCode::OK {
            return Ok(remote_failure(status, &body, LIST_FAILED));
        }

        let parsed: ListUsersResponse = serde_json::from_str(&body)?;
        Ok(Outcome::success(format!(
            "Retrieved {} IAM users successfully",
            parsed.user_count
        ))
        .with_field("user_count", parsed.user_count.to_string())
        .with_field("users", parsed.user_lines()))
    }

    /// POST the payload to the configured endpoint and read the full body.
    async fn call(&self, request: &ProxyRequest) -> Result<(StatusCode, String)> {
        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .json(request);

        if let Some(api_key) = &self.config.api_key {
            builder = builder.header("x-api-key", api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "received proxy response");

        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Pre-flight username checks shared by create/delete/get.
///
/// Emptiness is checked first to keep the original prompt behavior; the
/// format rule mirrors the one the proxy enforces server-side.
fn reject_username(username: &str, prompt: &str) -> Option<Outcome> {
    if username.is_empty() {
        return Some(Outcome::validation_failure(USERNAME_REQUIRED_ERROR, prompt));
    }
    if !is_valid_username(username) {
        warn!(username, "rejected IAM username with invalid format");
        return Some(Outcome::validation_failure(INVALID_USERNAME_ERROR, prompt));
    }
    None
}

fn remote_failure(status: StatusCode, body: &str, message: &str) -> Outcome {
    let error = ErrorBody::extract(body);
    warn!(status = status.as_u16(), error = %error, "proxy returned failure status");
    Outcome::remote_failure(error, status.as_u16(), message)
}

fn script_error(err: &IamProxyError) -> Outcome {
    warn!(error = %err, "IAM proxy call failed");
    Outcome::script_error(err)
}
