//! Username/password authentication.

use sfgate_client::{ClientOptions, HttpClient};
use tracing::{debug, instrument};

use crate::authenticator::Authenticator;
use crate::error::Result;
use crate::parameters::{Parameters, GRANT_TYPE};
use crate::token::request_token;
use crate::{login_endpoint, DEFAULT_INSTANCE_NAME};

/// Password-based authenticator.
///
/// Exchanges `client_id`, `client_secret`, `username` and `password` for an
/// access token at `https://login.<instance_name>/services/oauth2/token`.
#[derive(Debug, Clone)]
pub struct PasswordAuthenticator {
    instance_name: String,
    login_endpoint: Option<String>,
    options: ClientOptions,
}

impl Default for PasswordAuthenticator {
    fn default() -> Self {
        Self::create(DEFAULT_INSTANCE_NAME, ClientOptions::default())
    }
}

impl PasswordAuthenticator {
    /// Use a fixed login endpoint instead of the one derived from the instance name.
    ///
    /// Useful for sandboxes ([`SANDBOX_LOGIN_URL`](crate::SANDBOX_LOGIN_URL))
    /// and My Domain logins.
    pub fn with_login_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.login_endpoint = Some(endpoint.into());
        self
    }

    /// The Salesforce instance name.
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// The base client options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// The endpoint the token exchange is sent to.
    pub fn login_endpoint(&self) -> String {
        self.login_endpoint
            .clone()
            .unwrap_or_else(|| login_endpoint(&self.instance_name))
    }

    /// Client bound to `base_uri` built from the base options.
    ///
    /// Non-success statuses are never raised here; the token exchange
    /// inspects the body instead.
    fn login_client(&self) -> Result<HttpClient> {
        let mut options = self.options.merge_base_uri(self.login_endpoint());
        options.http_errors = false;
        Ok(HttpClient::new(options)?)
    }
}

impl Authenticator for PasswordAuthenticator {
    fn create(instance_name: &str, options: ClientOptions) -> Self {
        Self {
            instance_name: instance_name.trim_end_matches('/').to_string(),
            login_endpoint: None,
            options,
        }
    }

    /// Expected parameters: `client_id`, `client_secret`, `username`,
    /// `password`. They are sent as given; `grant_type` is always `password`.
    #[instrument(skip(self, parameters), fields(instance = %self.instance_name))]
    async fn authenticate(&self, parameters: &Parameters) -> Result<HttpClient> {
        let client = self.login_client()?;

        let mut form = parameters.clone();
        form.insert(GRANT_TYPE.to_string(), "password".to_string());

        let session = request_token(&client, &form, parameters, &self.options).await?;
        debug!(
            instance_url = session.base_uri().unwrap_or_default(),
            "Password authentication succeeded"
        );
        Ok(session)
    }
}
