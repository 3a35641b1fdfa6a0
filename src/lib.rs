//! # IAM Proxy Client
//!
//! Typed client for the ServiceNow IAM proxy, an HTTP service that performs
//! AWS IAM user operations (create, delete, get, list) on behalf of a
//! workflow platform.
//!
//! The contract is deliberately thin: every operation is a single POST to
//! one fixed endpoint with an `operation`-tagged JSON body, and every call
//! returns a flat, string-valued [`Outcome`] with `success: "true"/"false"`.
//! No operation ever returns an `Err` to the caller; validation failures,
//! non-200 responses, and transport errors are all normalized into the
//! outcome so the workflow only ever inspects `success`.
//!
//! ```no_run
//! use iam_proxy_client::{CreateUserInput, IamProxyClient, ProxyConfig};
//!
//! # async fn run() -> iam_proxy_client::Result<()> {
//! let client = IamProxyClient::new(ProxyConfig::default())?;
//! let outcome = client.create_user(&CreateUserInput::new("alice")).await;
//! if outcome.is_success() {
//!     println!("created: {:?}", outcome.field("arn"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod outcome;
pub mod requests;

mod responses;

pub use client::IamProxyClient;
pub use config::{ProxyConfig, DEFAULT_ENDPOINT};
pub use errors::{IamProxyError, Result};
pub use outcome::Outcome;
pub use requests::{CreateUserInput, DeleteUserInput, GetUserInput};
