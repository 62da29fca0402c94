//! Token endpoint exchange shared by the strategies.

use serde::Deserialize;
use serde_json::Value;
use sfgate_client::{ClientOptions, HttpClient};
use tracing::{debug, warn};

use crate::error::{Error, RawResponse, Result};
use crate::obfuscate::obfuscate;
use crate::parameters::Parameters;
use crate::TOKEN_PATH;

/// Token endpoint response. Only the fields a session needs are kept.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    access_token: Option<String>,
    instance_url: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

impl TokenResponse {
    /// Parse a response body.
    ///
    /// Anything other than a JSON object is rejected, as are non-string
    /// values for either field.
    pub(crate) fn from_body(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Access token, if present and non-empty.
    pub(crate) fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|s| !s.is_empty())
    }

    /// Instance URL, if present and non-empty.
    pub(crate) fn instance_url(&self) -> Option<&str> {
        self.instance_url.as_deref().filter(|s| !s.is_empty())
    }

    /// Build a client bound to this session on top of `options`.
    ///
    /// Returns `None` when either field is missing or empty.
    pub(crate) fn bind(
        &self,
        options: &ClientOptions,
    ) -> Option<sfgate_client::Result<HttpClient>> {
        let access_token = self.access_token()?;
        let instance_url = self.instance_url()?;
        let options = options
            .merge_base_uri(instance_url)
            .with_oauth_token(access_token);
        Some(HttpClient::new(options))
    }
}

/// POST `form` to the token endpoint of `client` and bind the resulting
/// session on top of `options`.
///
/// On failure the error carries the raw response and `snapshot` after
/// obfuscation. HTTP status is not consulted: only the body decides. An
/// `instance_url` that is not a usable base URI is a failure too.
pub(crate) async fn request_token(
    client: &HttpClient,
    form: &Parameters,
    snapshot: &Parameters,
    options: &ClientOptions,
) -> Result<HttpClient> {
    let response = client.post_form(TOKEN_PATH, form).await?;
    let status = response.status();
    let body = response.text().await?;

    let token = TokenResponse::from_body(&body);
    match token.as_ref().and_then(|t| t.bind(options)) {
        Some(Ok(session)) => {
            debug!(
                status,
                instance_url = session.base_uri().unwrap_or_default(),
                "Token exchange succeeded"
            );
            Ok(session)
        }
        Some(Err(e)) if matches!(e.kind, sfgate_client::ErrorKind::InvalidUrl(_)) => {
            warn!(status, "Token response carries an unusable instance_url");
            Err(Error::failed(
                Some(RawResponse { status, body }),
                obfuscate(snapshot),
            ))
        }
        Some(Err(e)) => Err(e.into()),
        None => {
            warn!(status, "Token response lacks access_token or instance_url");
            Err(Error::failed(
                Some(RawResponse { status, body }),
                obfuscate(snapshot),
            ))
        }
    }
}
