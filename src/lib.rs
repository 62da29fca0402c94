//! # sfgate
//!
//! Pluggable Salesforce authenticators that hand back session-bound HTTP
//! clients.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets) are redacted in Debug output
//! - Client secrets and passwords in failure diagnostics are Argon2id hashes
//! - Error messages sanitize any credential data
//!
//! ## Crates
//!
//! - **sfgate-client** - Configurable HTTP client carrying a base URI and default headers
//! - **sfgate-auth** - Password and OAuth authenticators, credential obfuscation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sfgate::auth::{AuthStrategy, Authenticator, ClientOptions, StrategyKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let strategy = AuthStrategy::from_kind(
//!         StrategyKind::Password,
//!         sfgate::auth::DEFAULT_INSTANCE_NAME,
//!         ClientOptions::default(),
//!     );
//!
//!     let client = strategy
//!         .authenticate(&sfgate::auth::parameters_from_env())
//!         .await?;
//!
//!     let versions: serde_json::Value = client.get_json("/services/data").await?;
//!     println!("{versions}");
//!
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "auth")]
pub use sfgate_auth as auth;
#[cfg(feature = "client")]
pub use sfgate_client as client;

#[cfg(feature = "auth")]
pub use sfgate_auth::{AuthStrategy, Authenticator, OAuthAuthenticator, PasswordAuthenticator};
#[cfg(feature = "client")]
pub use sfgate_client::{ClientOptions, HttpClient};
