//! Client options.

use std::collections::BTreeMap;
use std::time::Duration;

/// Header carrying the session credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Options used to construct an [`HttpClient`](crate::HttpClient).
///
/// Authenticators take these as their base options and derive transient and
/// session-bound clients from them. The `Authorization` header is redacted in
/// Debug output.
#[derive(Clone)]
pub struct ClientOptions {
    /// Base URI that relative request paths resolve against.
    pub base_uri: Option<String>,
    /// Default headers sent with every request.
    pub headers: BTreeMap<String, String>,
    /// Whether non-2xx responses are turned into errors.
    pub http_errors: bool,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_uri", &self.base_uri)
            .field("headers", &redacted_headers(&self.headers))
            .field("http_errors", &self.http_errors)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("enable_tracing", &self.enable_tracing)
            .finish()
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_uri: None,
            headers: BTreeMap::new(),
            http_errors: false,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientOptions {
    /// Create a new client options builder.
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::default()
    }

    /// Copy of these options with `base_uri` replaced.
    pub fn merge_base_uri(&self, base_uri: impl Into<String>) -> Self {
        let mut options = self.clone();
        options.base_uri = Some(base_uri.into());
        options
    }

    /// Copy of these options with `base_uri` filled in only when absent.
    pub fn or_base_uri(&self, base_uri: impl Into<String>) -> Self {
        let mut options = self.clone();
        if options.base_uri.is_none() {
            options.base_uri = Some(base_uri.into());
        }
        options
    }

    /// Copy of these options carrying `Authorization: OAuth <token>`.
    ///
    /// An empty token leaves the headers untouched.
    pub fn with_oauth_token(&self, access_token: &str) -> Self {
        let mut options = self.clone();
        if !access_token.is_empty() {
            options.headers.insert(
                AUTHORIZATION_HEADER.to_string(),
                format!("OAuth {}", access_token),
            );
        }
        options
    }
}

pub(crate) fn redacted_headers(headers: &BTreeMap<String, String>) -> BTreeMap<&str, &str> {
    headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case(AUTHORIZATION_HEADER) {
                (name.as_str(), "[REDACTED]")
            } else {
                (name.as_str(), value.as_str())
            }
        })
        .collect()
}

/// Builder for ClientOptions.
#[derive(Debug, Default)]
pub struct ClientOptionsBuilder {
    options: ClientOptions,
}

impl ClientOptionsBuilder {
    /// Set the base URI.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.options.base_uri = Some(base_uri.into());
        self
    }

    /// Add a default header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.insert(name.into(), value.into());
        self
    }

    /// Add several default headers.
    pub fn with_headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.options
            .headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Turn non-2xx responses into errors.
    pub fn with_http_errors(mut self, enabled: bool) -> Self {
        self.options.http_errors = enabled;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout = timeout;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = user_agent.into();
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.options.enable_tracing = enabled;
        self
    }

    /// Build the client options.
    pub fn build(self) -> ClientOptions {
        self.options
    }
}
