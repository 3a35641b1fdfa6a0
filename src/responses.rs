//! Wire shapes of the proxy's JSON responses and their flattening into
//! the string fields the workflow consumes.

use serde::Deserialize;

/// Error body the proxy sends alongside non-200 statuses.
///
/// Parsed leniently: a missing field, an empty body, or a non-JSON body all
/// fall back to `"Unknown error"`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extract the proxy's error text from a raw body, with fallback.
    pub(crate) fn extract(body: &str) -> String {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

/// Response to `create_user`: the fresh user plus its one-time credentials.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateUserResponse {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub arn: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default)]
    pub policy_attached: String,
    #[serde(default)]
    pub created_date: String,
}

/// Response to `delete_user`.
#[derive(Debug, Deserialize)]
pub(crate) struct DeleteUserResponse {
    #[serde(default)]
    pub username: String,
}

/// Response to `get_user`.
#[derive(Debug, Deserialize)]
pub(crate) struct GetUserResponse {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub arn: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub attached_policies: Vec<AttachedPolicy>,
    #[serde(default)]
    pub access_keys: Vec<AccessKey>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttachedPolicy {
    #[serde(default)]
    pub policy_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccessKey {
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub status: String,
}

impl GetUserResponse {
    /// Policy names joined as `"A, B"`; empty list yields `""`.
    pub(crate) fn policy_names(&self) -> String {
        self.attached_policies
            .iter()
            .map(|policy| policy.policy_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Access keys joined as `"<id> (Status: <status>)"` entries.
    pub(crate) fn access_key_summaries(&self) -> String {
        self.access_keys
            .iter()
            .map(|key| format!("{} (Status: {})", key.access_key_id, key.status))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Response to `list_users`.
///
/// `user_count` is required: the proxy always sends it, and its absence
/// means the body is not a list response at all.
#[derive(Debug, Deserialize)]
pub(crate) struct ListUsersResponse {
    pub user_count: u64,
    #[serde(default)]
    pub users: Vec<ListedUser>,
}

/// One entry of the `list_users` response.
///
/// Unlike `get_user`, the per-user policies here are plain name strings.
#[derive(Debug, Deserialize)]
pub(crate) struct ListedUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub attached_policies: Vec<String>,
}

impl ListUsersResponse {
    /// Render the user list as one `" | "`-separated display string.
    pub(crate) fn user_lines(&self) -> String {
        self.users
            .iter()
            .map(|user| {
                format!(
                    "Username: {}, Created: {}, Policies: {}",
                    user.username,
                    user.created_date,
                    user.attached_policies.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
