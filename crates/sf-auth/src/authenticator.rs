//! The authenticator contract and strategy dispatch.

use std::future::Future;

use sfgate_client::{ClientOptions, HttpClient};

use crate::error::{Error, ErrorKind, Result};
use crate::oauth::OAuthAuthenticator;
use crate::parameters::Parameters;
use crate::password::PasswordAuthenticator;

/// Turns caller-supplied credentials into a session-bound [`HttpClient`].
///
/// Implementations are immutable after construction and build a fresh client
/// on every call, so one instance can be reused for any number of logins.
pub trait Authenticator: Send + Sync {
    /// Build an authenticator for a Salesforce instance.
    ///
    /// `instance_name` is the host-qualifying name without scheme or trailing
    /// slash (e.g. `"na1.salesforce.com"`, or
    /// [`DEFAULT_INSTANCE_NAME`](crate::DEFAULT_INSTANCE_NAME)). `options`
    /// are the base options every derived client is built from. No network
    /// I/O happens here.
    fn create(instance_name: &str, options: ClientOptions) -> Self
    where
        Self: Sized;

    /// Authenticate and return a client bound to the new session.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Failed`] when the exchange does not yield both an access
    /// token and an instance URL. The error carries an obfuscated copy of
    /// `parameters` and the raw provider response.
    fn authenticate(
        &self,
        parameters: &Parameters,
    ) -> impl Future<Output = Result<HttpClient>> + Send;
}

/// Available authentication strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// Username/password exchange against the login endpoint.
    #[default]
    Password,
    /// Pre-obtained access token, with refresh-token exchange.
    OAuth,
}

impl StrategyKind {
    /// Name used in configuration and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Password => "password",
            StrategyKind::OAuth => "oauth",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "password" => Ok(StrategyKind::Password),
            "oauth" => Ok(StrategyKind::OAuth),
            other => Err(Error::new(ErrorKind::InvalidInput(format!(
                "unknown authentication strategy '{}' (expected 'password' or 'oauth')",
                other
            )))),
        }
    }
}

/// An authenticator chosen at runtime.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Password grant against the login endpoint derived from the instance
    /// name. Does not support [`refresh`](AuthStrategy::refresh).
    Password(PasswordAuthenticator),
    /// Wraps an access token the caller already holds; can also exchange a
    /// refresh token for a new session.
    OAuth(OAuthAuthenticator),
}

impl AuthStrategy {
    /// Build the authenticator for `kind`.
    pub fn from_kind(kind: StrategyKind, instance_name: &str, options: ClientOptions) -> Self {
        match kind {
            StrategyKind::Password => {
                AuthStrategy::Password(PasswordAuthenticator::create(instance_name, options))
            }
            StrategyKind::OAuth => {
                AuthStrategy::OAuth(OAuthAuthenticator::create(instance_name, options))
            }
        }
    }

    /// Which strategy this is.
    pub fn kind(&self) -> StrategyKind {
        match self {
            AuthStrategy::Password(_) => StrategyKind::Password,
            AuthStrategy::OAuth(_) => StrategyKind::OAuth,
        }
    }

    /// Exchange a refresh token for a new session.
    ///
    /// Only the OAuth strategy supports refreshing.
    pub async fn refresh(&self, refresh_token: &str) -> Result<HttpClient> {
        match self {
            AuthStrategy::OAuth(oauth) => oauth.refresh(refresh_token).await,
            AuthStrategy::Password(_) => Err(Error::new(ErrorKind::InvalidInput(
                "refresh is only supported by the oauth strategy".to_string(),
            ))),
        }
    }
}

impl Authenticator for AuthStrategy {
    fn create(instance_name: &str, options: ClientOptions) -> Self {
        Self::from_kind(StrategyKind::default(), instance_name, options)
    }

    async fn authenticate(&self, parameters: &Parameters) -> Result<HttpClient> {
        match self {
            AuthStrategy::Password(password) => password.authenticate(parameters).await,
            AuthStrategy::OAuth(oauth) => oauth.authenticate(parameters).await,
        }
    }
}

impl From<PasswordAuthenticator> for AuthStrategy {
    fn from(authenticator: PasswordAuthenticator) -> Self {
        AuthStrategy::Password(authenticator)
    }
}

impl From<OAuthAuthenticator> for AuthStrategy {
    fn from(authenticator: OAuthAuthenticator) -> Self {
        AuthStrategy::OAuth(authenticator)
    }
}
