//! End-to-end contract tests for the IAM proxy client.
//!
//! **Coverage:**
//! - Request bodies match the proxy's wire contract (operation tag, tags array)
//! - 200 responses map to the exact flat field set per operation
//! - Non-200 responses surface the proxy's error text and status string
//! - Validation failures short-circuit with zero network calls
//! - Transport and parse failures never escape as panics or `Err`s
//!
//! **Infrastructure:** WireMock HTTP server standing in for the proxy.

use std::sync::Once;

use iam_proxy_client::{
    CreateUserInput, DeleteUserInput, GetUserInput, IamProxyClient, ProxyConfig,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROXY_PATH: &str = "/default/ServiceNowIAMProxy";

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once so `RUST_LOG` works in test runs.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

async fn proxy_client(server: &MockServer) -> IamProxyClient {
    init_tracing();
    let config = ProxyConfig::new(format!("{}{}", server.uri(), PROXY_PATH));
    IamProxyClient::new(config).expect("client construction")
}

#[tokio::test]
async fn full_create_flow_matches_contract() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PROXY_PATH))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "operation": "create_user",
            "username": "svc-reporting",
            "tags": [
                {"Key": "Environment", "Value": "Production"},
                {"Key": "CreatedBy", "Value": "ServiceNow"},
                {"Key": "Department", "Value": "IT"},
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "operation": "create_user",
            "username": "svc-reporting",
            "arn": "arn:aws:iam::123456789012:user/svc-reporting",
            "user_id": "AIDAEXAMPLE",
            "created_date": "2024-03-01T12:00:00",
            "access_key_id": "AKIAEXAMPLE",
            "secret_access_key": "wJalrXUtnFEMI",
            "policy_attached": "arn:aws:iam::aws:policy/AmazonS3FullAccess",
            "message": "User created successfully",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = proxy_client(&server).await;
    let outcome = client.create_user(&CreateUserInput::new("svc-reporting")).await;

    assert!(outcome.is_success());
    // Values are copied byte-for-byte from the response.
    assert_eq!(outcome.field("secret_access_key"), Some("wJalrXUtnFEMI"));
    assert_eq!(
        outcome.field("warning"),
        Some("Store the secret access key securely - it cannot be retrieved again")
    );

    // The outcome renders as the flat JSON object the workflow consumed.
    let rendered = serde_json::to_value(&outcome).expect("serialize outcome");
    assert_eq!(rendered["success"], "true");
    assert_eq!(rendered["username"], "svc-reporting");
    assert!(rendered.get("error").is_none());
}

#[tokio::test]
async fn get_user_flattening_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PROXY_PATH))
        .and(body_partial_json(serde_json::json!({
            "operation": "get_user",
            "username": "svc-reporting",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "operation": "get_user",
            "username": "svc-reporting",
            "arn": "arn:aws:iam::123456789012:user/svc-reporting",
            "user_id": "AIDAEXAMPLE",
            "created_date": "2024-03-01T12:00:00",
            "attached_policies": [
                {"policy_name": "A", "policy_arn": "arn:aws:iam::aws:policy/A"},
                {"policy_name": "B", "policy_arn": "arn:aws:iam::aws:policy/B"},
            ],
            "access_keys": [
                {"access_key_id": "AKIA1", "status": "Active", "created_date": "2024-03-01"},
                {"access_key_id": "AKIA2", "status": "Inactive", "created_date": "2024-03-02"},
            ],
        })))
        .mount(&server)
        .await;

    let client = proxy_client(&server).await;
    let outcome = client.get_user(&GetUserInput::new("svc-reporting")).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.field("attached_policies"), Some("A, B"));
    assert_eq!(
        outcome.field("access_keys"),
        Some("AKIA1 (Status: Active), AKIA2 (Status: Inactive)")
    );
}

#[tokio::test]
async fn get_user_with_no_policies_or_keys_yields_empty_strings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PROXY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "username": "fresh-user",
            "arn": "arn:aws:iam::123456789012:user/fresh-user",
            "user_id": "AIDAFRESH",
            "created_date": "2024-03-01T12:00:00",
        })))
        .mount(&server)
        .await;

    let client = proxy_client(&server).await;
    let outcome = client.get_user(&GetUserInput::new("fresh-user")).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.field("attached_policies"), Some(""));
    assert_eq!(outcome.field("access_keys"), Some(""));
}

#[tokio::test]
async fn list_users_reports_count_as_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PROXY_PATH))
        .and(body_partial_json(serde_json::json!({"operation": "list_users"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "operation": "list_users",
            "user_count": 2,
            "users": [
                {
                    "username": "u1",
                    "arn": "arn:aws:iam::123456789012:user/u1",
                    "user_id": "AIDA1",
                    "created_date": "2024-01-01",
                    "attached_policies": ["p1"],
                },
                {
                    "username": "u2",
                    "arn": "arn:aws:iam::123456789012:user/u2",
                    "user_id": "AIDA2",
                    "created_date": "2024-02-02",
                    "attached_policies": [],
                },
            ],
        })))
        .mount(&server)
        .await;

    let client = proxy_client(&server).await;
    let outcome = client.list_users().await;

    assert!(outcome.is_success());
    assert_eq!(outcome.field("user_count"), Some("2"));
    assert_eq!(
        outcome.field("users"),
        Some(
            "Username: u1, Created: 2024-01-01, Policies: p1 | \
             Username: u2, Created: 2024-02-02, Policies: "
        )
    );
    assert_eq!(outcome.message, "Retrieved 2 IAM users successfully");
}

#[tokio::test]
async fn every_operation_normalizes_remote_failure_the_same_way() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PROXY_PATH))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"error": "Quota exceeded"})),
        )
        .mount(&server)
        .await;

    let client = proxy_client(&server).await;

    let cases: [(iam_proxy_client::Outcome, &str); 4] = [
        (
            client.create_user(&CreateUserInput::new("x")).await,
            "Failed to create IAM user",
        ),
        (client.delete_user(&DeleteUserInput::new("x")).await, "Failed to delete IAM user"),
        (client.get_user(&GetUserInput::new("x")).await, "Failed to retrieve user details"),
        (client.list_users().await, "Failed to list IAM users"),
    ];

    for (outcome, expected_message) in cases {
        assert_eq!(outcome.success, "false");
        assert_eq!(outcome.error.as_deref(), Some("Quota exceeded"));
        assert_eq!(outcome.http_status.as_deref(), Some("403"));
        assert_eq!(outcome.message, expected_message);
        assert!(outcome.fields.is_empty());
    }
}

#[tokio::test]
async fn list_users_skips_validation_and_always_calls_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PROXY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_count": 0,
            "users": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = proxy_client(&server).await;
    let outcome = client.list_users().await;

    assert!(outcome.is_success());
    assert_eq!(outcome.field("user_count"), Some("0"));
    assert_eq!(outcome.field("users"), Some(""));
}

#[tokio::test]
async fn missing_username_makes_zero_network_calls() {
    let server = MockServer::start().await;

    // Any request reaching the server fails the test.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = proxy_client(&server).await;

    for outcome in [
        client.create_user(&CreateUserInput::default()).await,
        client.delete_user(&DeleteUserInput::default()).await,
        client.get_user(&GetUserInput::default()).await,
    ] {
        assert_eq!(outcome.success, "false");
        assert_eq!(outcome.error.as_deref(), Some("Username is required"));
        assert!(outcome.http_status.is_none());
    }
}

#[tokio::test]
async fn nothing_panics_on_garbage_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PROXY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"user_count\": \"two\"}"))
        .mount(&server)
        .await;

    let client = proxy_client(&server).await;
    let outcome = client.list_users().await;

    assert_eq!(outcome.success, "false");
    assert_eq!(outcome.message, "Script execution error occurred");
    assert!(outcome.error.is_some());
}
