//! Typed operation inputs and the wire request POSTed to the proxy.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Error text for a username that fails the IAM character/length rule.
///
/// Matches the message the proxy itself returns for the same check, so the
/// caller sees identical text whether the rejection happens locally or
/// remotely.
pub const INVALID_USERNAME_ERROR: &str =
    "Invalid username format. Must contain only alphanumeric characters and +=,.@_-";

/// IAM usernames: 1-64 chars of alphanumerics and `+=,.@_-`.
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+=,.@_-]+$").expect("USERNAME_REGEX pattern is valid and well-formed")
});

/// Check a username against the IAM naming rule enforced by the proxy.
pub fn is_valid_username(username: &str) -> bool {
    (1..=64).contains(&username.len()) && USERNAME_REGEX.is_match(username)
}

fn default_environment() -> String {
    "Production".to_string()
}

fn default_department() -> String {
    "IT".to_string()
}

/// Input for creating an IAM user.
///
/// Fields are read permissively: a missing `username` defaults to the empty
/// string (and fails validation), `environment` and `department` fall back
/// to `"Production"` and `"IT"`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    /// Name of the IAM user to create.
    #[serde(default)]
    pub username: String,
    /// Value of the `Environment` tag.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Value of the `Department` tag.
    #[serde(default = "default_department")]
    pub department: String,
}

impl Default for CreateUserInput {
    fn default() -> Self {
        Self {
            username: String::new(),
            environment: default_environment(),
            department: default_department(),
        }
    }
}

impl CreateUserInput {
    /// Convenience constructor with default environment/department tags.
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), ..Self::default() }
    }
}

/// Input for deleting an IAM user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteUserInput {
    /// Name of the IAM user to delete.
    #[serde(default)]
    pub username: String,
}

impl DeleteUserInput {
    /// Build an input for the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into() }
    }
}

/// Input for fetching a single IAM user's details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetUserInput {
    /// Name of the IAM user to look up.
    #[serde(default)]
    pub username: String,
}

impl GetUserInput {
    /// Build an input for the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into() }
    }
}

/// One `{Key, Value}` tag attached to a created user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserTag {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl UserTag {
    fn new(key: &str, value: impl Into<String>) -> Self {
        Self { key: key.to_string(), value: value.into() }
    }
}

/// JSON body POSTed to the proxy; `operation` is the discriminator tag.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub(crate) enum ProxyRequest {
    CreateUser { username: String, tags: Vec<UserTag> },
    DeleteUser { username: String },
    GetUser { username: String },
    ListUsers,
}

impl ProxyRequest {
    /// Build the create payload, stamping the `CreatedDate` tag at call time.
    pub(crate) fn create(input: &CreateUserInput) -> Self {
        Self::CreateUser {
            username: input.username.clone(),
            tags: vec![
                UserTag::new("Environment", input.environment.clone()),
                UserTag::new("CreatedBy", "ServiceNow"),
                UserTag::new("Department", input.department.clone()),
                UserTag::new("CreatedDate", display_timestamp()),
            ],
        }
    }

    pub(crate) fn delete(input: &DeleteUserInput) -> Self {
        Self::DeleteUser { username: input.username.clone() }
    }

    pub(crate) fn get(input: &GetUserInput) -> Self {
        Self::GetUser { username: input.username.clone() }
    }

    pub(crate) fn list() -> Self {
        Self::ListUsers
    }
}

/// Current local time in the display format the workflow expects.
fn display_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
