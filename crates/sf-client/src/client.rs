//! HTTP client bound to a base URI with default headers.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::{redacted_headers, ClientOptions, AUTHORIZATION_HEADER};
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder, RequestMethod};
use crate::response::Response;

/// HTTP client with a fixed base URI and default headers.
///
/// Clients are immutable once built: binding a different base URI or
/// credential means building a new client from adjusted [`ClientOptions`].
/// The `Authorization` header is redacted in Debug output.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    options: ClientOptions,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_uri", &self.options.base_uri)
            .field("headers", &redacted_headers(&self.options.headers))
            .field("http_errors", &self.options.http_errors)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new HTTP client from the given options.
    ///
    /// The base URI, when present, must be an absolute URL.
    pub fn new(options: ClientOptions) -> Result<Self> {
        if let Some(ref base_uri) = options.base_uri {
            let parsed = url::Url::parse(base_uri)?;
            if parsed.cannot_be_a_base() {
                return Err(Error::new(ErrorKind::InvalidUrl(format!(
                    "{} cannot be used as a base URI",
                    parsed.scheme()
                ))));
            }
        }

        let inner = reqwest::Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .user_agent(&options.user_agent)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, options })
    }

    /// Create a client with default options and the given base URI.
    pub fn with_base_uri(base_uri: impl Into<String>) -> Result<Self> {
        Self::new(ClientOptions::default().merge_base_uri(base_uri))
    }

    /// Get the client options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Get the base URI, if any.
    pub fn base_uri(&self) -> Option<&str> {
        self.options.base_uri.as_deref()
    }

    /// Get all default headers.
    pub fn headers(&self) -> &std::collections::BTreeMap<String, String> {
        &self.options.headers
    }

    /// Get a default header value (case-insensitive name lookup).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.options
            .headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Get the `Authorization` default header, if this client is bound to a session.
    pub fn authorization(&self) -> Option<&str> {
        self.header(AUTHORIZATION_HEADER)
    }

    /// Build the full URL for a path.
    ///
    /// Absolute URLs are returned unchanged. Relative paths are appended to
    /// the base URI.
    pub fn url(&self, path: &str) -> Result<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }

        let base = self.base_uri().ok_or_else(|| {
            Error::new(ErrorKind::Config(format!(
                "no base_uri configured to resolve {}",
                path
            )))
        })?;
        let base = base.trim_end_matches('/');

        if path.starts_with('/') {
            Ok(format!("{}{}", base, path))
        } else {
            Ok(format!("{}/{}", base, path))
        }
    }

    fn request_url(&self, request: &RequestBuilder) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.url(&request.path)?)?;
        if !request.query_params.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query_params);
        }
        Ok(url)
    }

    /// Create a GET request builder.
    pub fn get(&self, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, path)
    }

    /// Create a POST request builder.
    pub fn post(&self, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, path)
    }

    /// Execute a request.
    ///
    /// Non-success responses are returned as-is unless `http_errors` is on.
    #[instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let url = self.request_url(&request)?;
        let method = request.method.to_reqwest();
        let mut req = self.inner.request(method, url.as_str());

        for (name, value) in &self.options.headers {
            if !request.headers.keys().any(|k| k.eq_ignore_ascii_case(name)) {
                req = req.header(name.as_str(), value.as_str());
            }
        }
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.json(&value),
                RequestBody::Form(encoded) => req.body(encoded),
            };
        }

        if self.options.enable_tracing {
            debug!(method = ?request.method, url = %url, "Sending request");
        }

        let response = Response::new(req.send().await?);

        if self.options.enable_tracing {
            let status = response.status();
            if response.is_success() {
                debug!(status, "Response received");
            } else {
                info!(status, "Non-success response");
            }
        }

        if self.options.http_errors {
            response.error_for_status().await
        } else {
            Ok(response)
        }
    }

    /// POST a form-encoded body to a path.
    pub async fn post_form<T: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &T,
    ) -> Result<Response> {
        let request = self.post(path).form(form)?;
        self.send(request).await
    }

    /// GET a path and deserialize the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.get(path)).await?;
        response.json().await
    }
}
