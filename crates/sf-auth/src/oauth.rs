//! OAuth 2.0 access-token authentication and refresh-token exchange.

use sfgate_client::{ClientOptions, HttpClient};
use tracing::{debug, instrument, warn};

use crate::authenticator::Authenticator;
use crate::error::{Error, Result};
use crate::obfuscate::{obfuscate, REDACTED};
use crate::parameters::{
    non_empty, Parameters, ACCESS_TOKEN, CLIENT_ID, CLIENT_SECRET, GRANT_TYPE, REFRESH_TOKEN,
};
use crate::token::request_token;
use crate::{login_endpoint, DEFAULT_INSTANCE_NAME};

/// OAuth-based authenticator.
///
/// [`authenticate`](Authenticator::authenticate) wraps an access token the
/// caller already holds; [`refresh`](OAuthAuthenticator::refresh) obtains a
/// new one with the refresh-token grant. The configured `base_uri` (by
/// default `https://login.<instance_name>`) is both the endpoint bound by
/// `authenticate` and the host of the token endpoint used by `refresh`.
///
/// The client secret is redacted in Debug output.
#[derive(Clone)]
pub struct OAuthAuthenticator {
    options: ClientOptions,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl std::fmt::Debug for OAuthAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthAuthenticator")
            .field("options", &self.options)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for OAuthAuthenticator {
    fn default() -> Self {
        Self::create(DEFAULT_INSTANCE_NAME, ClientOptions::default())
    }
}

impl OAuthAuthenticator {
    /// Build from options alone, defaulting `base_uri` to the production endpoint.
    pub fn new(options: ClientOptions) -> Self {
        Self::create(DEFAULT_INSTANCE_NAME, options)
    }

    /// Connected app credentials sent with refresh requests.
    ///
    /// An empty secret is not sent.
    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into()).filter(|s| !s.is_empty());
        self
    }

    /// The base client options, including the resolved `base_uri`.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// The configured base URI.
    pub fn base_uri(&self) -> &str {
        self.options.base_uri.as_deref().unwrap_or_default()
    }

    /// Exchange a refresh token for a new access token and bind a client to it.
    ///
    /// Sends `grant_type=refresh_token` with `refresh_token`, and the
    /// configured `client_id`/`client_secret`, to the token endpoint on the
    /// configured base URI. The returned client is bound to the
    /// `instance_url` from the response.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Failed`](crate::ErrorKind::Failed) when the response lacks
    /// `access_token` or `instance_url`, or when `refresh_token` is empty.
    /// The attached parameters never contain the refresh token.
    #[instrument(skip(self, refresh_token), fields(base_uri = %self.base_uri()))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<HttpClient> {
        let mut form = Parameters::new();
        form.insert(GRANT_TYPE.to_string(), "refresh_token".to_string());
        form.insert(REFRESH_TOKEN.to_string(), refresh_token.to_string());
        if let Some(ref client_id) = self.client_id {
            form.insert(CLIENT_ID.to_string(), client_id.clone());
        }
        if let Some(ref secret) = self.client_secret {
            form.insert(CLIENT_SECRET.to_string(), secret.clone());
        }

        let mut snapshot = form.clone();
        snapshot.insert(REFRESH_TOKEN.to_string(), REDACTED.to_string());

        if refresh_token.is_empty() {
            warn!("Refresh requested without a refresh token");
            return Err(Error::failed(None, obfuscate(&snapshot)));
        }

        let mut options = self.options.clone();
        options.http_errors = false;
        let client = HttpClient::new(options)?;

        let session = request_token(&client, &form, &snapshot, &self.options).await?;
        debug!(
            instance_url = session.base_uri().unwrap_or_default(),
            "Refresh token exchange succeeded"
        );
        Ok(session)
    }

    /// Build a client from the base options.
    ///
    /// `base_uri` defaults to the configured one. The `Authorization` header
    /// is only added for a non-empty `access_token`.
    pub fn http_client(
        &self,
        base_uri: Option<&str>,
        access_token: Option<&str>,
    ) -> Result<HttpClient> {
        let mut options = match base_uri {
            Some(uri) => self.options.merge_base_uri(uri),
            None => self.options.clone(),
        };
        if let Some(token) = access_token {
            options = options.with_oauth_token(token);
        }
        Ok(HttpClient::new(options)?)
    }
}

impl Authenticator for OAuthAuthenticator {
    /// Caller options win; `base_uri` falls back to `https://login.<instance_name>`.
    fn create(instance_name: &str, options: ClientOptions) -> Self {
        let options = options.or_base_uri(login_endpoint(instance_name));
        Self {
            options,
            client_id: None,
            client_secret: None,
        }
    }

    /// Expected parameters: `access_token` (required) and `refresh_token`.
    ///
    /// No network round trip: the access token is assumed valid and bound to
    /// the configured base URI.
    ///
    /// On failure the attached snapshot is `parameters` after
    /// [`obfuscate`], which only hashes `client_secret` and `password`. Any
    /// other entry, a `refresh_token` included, is reported as given, so
    /// callers should not pass secrets this strategy does not read.
    #[instrument(skip(self, parameters), fields(base_uri = %self.base_uri()))]
    async fn authenticate(&self, parameters: &Parameters) -> Result<HttpClient> {
        let Some(access_token) = non_empty(parameters, ACCESS_TOKEN) else {
            warn!("OAuth authentication attempted without an access token");
            return Err(Error::failed(None, obfuscate(parameters)));
        };

        self.http_client(None, Some(access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::DEFAULT_INSTANCE_ENDPOINT;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

    #[test]
    fn test_default_base_uri() {
        let auth = OAuthAuthenticator::default();
        assert_eq!(auth.base_uri(), DEFAULT_INSTANCE_ENDPOINT);

        let auth = OAuthAuthenticator::create("my.salesforce.com", ClientOptions::default());
        assert_eq!(auth.base_uri(), "https://login.my.salesforce.com");
    }

    #[test]
    fn test_caller_base_uri_wins() {
        let options = ClientOptions::builder()
            .with_base_uri("https://na1.salesforce.com")
            .build();
        let auth = OAuthAuthenticator::new(options);
        assert_eq!(auth.base_uri(), "https://na1.salesforce.com");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let auth =
            OAuthAuthenticator::default().with_client_credentials("id", "super_secret_value");
        let debug_output = format!("{:?}", auth);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_value"));
    }

    #[test]
    fn test_http_client_helper() {
        let auth = OAuthAuthenticator::default();

        let client = auth.http_client(None, None).unwrap();
        assert_eq!(client.base_uri(), Some(DEFAULT_INSTANCE_ENDPOINT));
        assert!(client.authorization().is_none());

        let client = auth.http_client(None, Some("")).unwrap();
        assert!(client.authorization().is_none());

        let client = auth
            .http_client(Some("https://na1.salesforce.com"), Some("TOK"))
            .unwrap();
        assert_eq!(client.base_uri(), Some("https://na1.salesforce.com"));
        assert_eq!(client.authorization(), Some("OAuth TOK"));
    }

    #[tokio::test]
    async fn test_authenticate_wraps_access_token() {
        let auth = OAuthAuthenticator::default();
        let parameters = Parameters::from([
            (ACCESS_TOKEN.to_string(), "ABC".to_string()),
            (REFRESH_TOKEN.to_string(), "RT".to_string()),
        ]);

        let client = auth.authenticate(&parameters).await.unwrap();
        assert_eq!(client.authorization(), Some("OAuth ABC"));
        assert_eq!(client.base_uri(), Some(DEFAULT_INSTANCE_ENDPOINT));
    }

    #[tokio::test]
    async fn test_authenticate_does_not_touch_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let options = ClientOptions::builder()
            .with_base_uri(mock_server.uri())
            .build();
        let auth = OAuthAuthenticator::new(options);
        let parameters = Parameters::from([(ACCESS_TOKEN.to_string(), "ABC".to_string())]);

        let client = auth.authenticate(&parameters).await.unwrap();
        assert_eq!(client.base_uri(), Some(mock_server.uri().as_str()));
    }

    #[tokio::test]
    async fn test_authenticate_without_access_token_fails() {
        let auth = OAuthAuthenticator::default();
        let parameters = Parameters::from([
            (CLIENT_SECRET.to_string(), "sec".to_string()),
            (ACCESS_TOKEN.to_string(), String::new()),
        ]);

        let err = auth.authenticate(&parameters).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Failed);
        assert!(err.response().is_none());
        let snapshot = err.parameters().unwrap();
        assert_ne!(snapshot[CLIENT_SECRET], "sec");
    }

    #[tokio::test]
    async fn test_refresh_success() {
        struct RefreshGrant;
        impl Match for RefreshGrant {
            fn matches(&self, request: &Request) -> bool {
                let body = String::from_utf8_lossy(&request.body);
                body.contains("grant_type=refresh_token")
                    && body.contains("refresh_token=RT")
                    && body.contains("client_id=id")
                    && body.contains("client_secret=sec")
            }
        }

        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(RefreshGrant)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "NEW",
                "instance_url": "https://na1.salesforce.com",
                "issued_at": "1234567890"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ClientOptions::builder()
            .with_base_uri(mock_server.uri())
            .build();
        let auth = OAuthAuthenticator::new(options).with_client_credentials("id", "sec");

        let client = auth.refresh("RT").await.unwrap();
        assert_eq!(client.base_uri(), Some("https://na1.salesforce.com"));
        assert_eq!(client.authorization(), Some("OAuth NEW"));
    }

    #[tokio::test]
    async fn test_refresh_without_secret_omits_it() {
        struct NoClientSecret;
        impl Match for NoClientSecret {
            fn matches(&self, request: &Request) -> bool {
                let body = String::from_utf8_lossy(&request.body);
                body.contains("client_id=id") && !body.contains("client_secret")
            }
        }

        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(NoClientSecret)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "NEW",
                "instance_url": "https://na1.salesforce.com"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ClientOptions::builder()
            .with_base_uri(mock_server.uri())
            .build();
        let auth = OAuthAuthenticator::new(options).with_client_credentials("id", "");

        let client = auth.refresh("RT").await.unwrap();
        assert_eq!(client.authorization(), Some("OAuth NEW"));
    }

    #[tokio::test]
    async fn test_refresh_invalid_grant_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "expired access/refresh token"
            })))
            .mount(&mock_server)
            .await;

        let options = ClientOptions::builder()
            .with_base_uri(mock_server.uri())
            .build();
        let auth = OAuthAuthenticator::new(options).with_client_credentials("id", "sec");

        let err = auth.refresh("RT").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Failed);
        assert_eq!(err.response().map(|r| r.status), Some(400));

        let snapshot = err.parameters().unwrap();
        assert_eq!(snapshot[GRANT_TYPE], "refresh_token");
        assert_eq!(snapshot[CLIENT_ID], "id");
        assert_ne!(snapshot[CLIENT_SECRET], "sec");
        assert!(crate::verify("sec", &snapshot[CLIENT_SECRET]));
        assert_eq!(snapshot[REFRESH_TOKEN], REDACTED);
    }

    #[tokio::test]
    async fn test_refresh_failure_never_exposes_refresh_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(body_string_contains("refresh_token=PLAINTEXT_RT"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ClientOptions::builder()
            .with_base_uri(mock_server.uri())
            .build();
        let auth = OAuthAuthenticator::new(options);

        let err = auth.refresh("PLAINTEXT_RT").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Failed);

        let snapshot = err.parameters().unwrap();
        assert_eq!(snapshot[REFRESH_TOKEN], REDACTED);

        let context = serde_json::to_string(err.context.as_ref().unwrap()).unwrap();
        assert!(!context.contains("PLAINTEXT_RT"));
        assert!(!format!("{:?}", err).contains("PLAINTEXT_RT"));
    }

    #[tokio::test]
    async fn test_refresh_empty_token_fails_without_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let options = ClientOptions::builder()
            .with_base_uri(mock_server.uri())
            .build();
        let auth = OAuthAuthenticator::new(options);

        let err = auth.refresh("").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Failed);
        assert!(err.response().is_none());
        assert_eq!(err.parameters().unwrap()[REFRESH_TOKEN], REDACTED);
    }
}
