//! # sfgate-client
//!
//! HTTP client infrastructure for Salesforce endpoints.
//!
//! An [`HttpClient`] is built once from [`ClientOptions`] and keeps a fixed
//! base URI and a fixed set of default headers for its whole life. The
//! authenticators in `sfgate-auth` use it twice per login: a transient client
//! bound to the login endpoint for the token exchange, and a session-bound
//! client carrying the provider's instance URL and `Authorization` header.
//!
//! Transport concerns (TLS, connection pooling, timeouts) stay with reqwest
//! and are only surfaced through [`ClientOptions`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfgate_client::{ClientOptions, HttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfgate_client::Error> {
//!     let options = ClientOptions::builder()
//!         .with_base_uri("https://na1.salesforce.com")
//!         .build()
//!         .with_oauth_token("00D...");
//!     let client = HttpClient::new(options)?;
//!
//!     let versions: serde_json::Value = client.get_json("/services/data").await?;
//!     println!("{versions}");
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;

pub use client::HttpClient;
pub use config::{ClientOptions, ClientOptionsBuilder, AUTHORIZATION_HEADER};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::Response;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sfgate/", env!("CARGO_PKG_VERSION"));
