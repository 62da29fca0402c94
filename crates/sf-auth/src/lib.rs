//! # sfgate-auth
//!
//! Pluggable Salesforce authenticators that turn credentials into a
//! session-bound [`HttpClient`].
//!
//! ## Security
//!
//! - Client secrets and passwords in error context are replaced by salted
//!   Argon2id hashes (see [`obfuscate`])
//! - Tokens and secrets are redacted in Debug output
//! - Tracing spans skip credential parameters
//!
//! ## Strategies
//!
//! - [`PasswordAuthenticator`]: username/password exchange at the login endpoint
//! - [`OAuthAuthenticator`]: pre-obtained access token, plus refresh-token exchange
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfgate_auth::{Authenticator, ClientOptions, PasswordAuthenticator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfgate_auth::Error> {
//!     let auth = PasswordAuthenticator::create("salesforce.com", ClientOptions::default());
//!     let client = auth.authenticate(&sfgate_auth::parameters_from_env()).await?;
//!
//!     let limits: serde_json::Value = client.get_json("/services/data/v62.0/limits").await?;
//!     println!("{limits}");
//!     Ok(())
//! }
//! ```

mod authenticator;
mod error;
mod oauth;
mod obfuscate;
mod parameters;
mod password;
mod token;

pub use authenticator::{AuthStrategy, Authenticator, StrategyKind};
pub use error::{AuthenticationContext, Error, ErrorKind, RawResponse, Result};
pub use oauth::OAuthAuthenticator;
pub use obfuscate::{obfuscate, verify, OBFUSCATED_PARAMETERS};
pub use parameters::{
    parameters_from_env, Parameters, ACCESS_TOKEN, CLIENT_ID, CLIENT_SECRET, GRANT_TYPE, PASSWORD,
    REFRESH_TOKEN, USERNAME,
};
pub use password::PasswordAuthenticator;

pub use sfgate_client::{ClientOptions, HttpClient};

/// Instance name used when none is configured.
pub const DEFAULT_INSTANCE_NAME: &str = "salesforce.com";

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";

/// Login endpoint of [`DEFAULT_INSTANCE_NAME`].
pub const DEFAULT_INSTANCE_ENDPOINT: &str = PRODUCTION_LOGIN_URL;

/// OAuth 2.0 token endpoint path, relative to a login endpoint.
pub const TOKEN_PATH: &str = "/services/oauth2/token";

/// Login endpoint for an instance name: `https://login.<instance_name>`.
pub fn login_endpoint(instance_name: &str) -> String {
    format!("https://login.{}", instance_name.trim_end_matches('/'))
}
