//! Error types for sfgate-auth.
//!
//! Error messages never include parameter values or response bodies. The
//! diagnostic context attached to authentication failures carries parameters
//! that have already been passed through [`obfuscate`](crate::obfuscate).

use serde::Serialize;

use crate::parameters::Parameters;

/// Result type alias for sfgate-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfgate-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Diagnostic context for authentication failures.
    pub context: Option<AuthenticationContext>,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            source: None,
        }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            context: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create an authentication error carrying diagnostic context.
    ///
    /// `context.parameters` must already be obfuscated.
    pub fn authentication(kind: ErrorKind, context: AuthenticationContext) -> Self {
        Self {
            kind,
            context: Some(context),
            source: None,
        }
    }

    /// The token exchange did not yield a usable session.
    pub fn failed(response: Option<RawResponse>, parameters: Parameters) -> Self {
        Self::authentication(
            ErrorKind::Failed,
            AuthenticationContext {
                response,
                parameters,
            },
        )
    }

    /// A session-bound client was requested before any successful exchange.
    pub fn not_authenticated(parameters: Parameters) -> Self {
        Self::authentication(
            ErrorKind::NotAuthenticated,
            AuthenticationContext {
                response: None,
                parameters,
            },
        )
    }

    /// Returns true if this is an authentication failure (`Failed` or `NotAuthenticated`).
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::Failed | ErrorKind::NotAuthenticated)
    }

    /// The raw provider response attached to this error, if any.
    pub fn response(&self) -> Option<&RawResponse> {
        self.context.as_ref()?.response.as_ref()
    }

    /// The obfuscated parameter snapshot attached to this error, if any.
    pub fn parameters(&self) -> Option<&Parameters> {
        self.context.as_ref().map(|c| &c.parameters)
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// The token exchange did not yield both an access token and an instance URL.
    #[error("Authentication failed")]
    Failed,

    /// A client was requested before authentication succeeded.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Diagnostic context attached to authentication failures.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticationContext {
    /// The provider's response, when one was received.
    pub response: Option<RawResponse>,
    /// Obfuscated copy of the parameters that triggered the failure.
    pub parameters: Parameters,
}

/// A provider response captured for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as received.
    pub body: String,
}

impl From<sfgate_client::Error> for Error {
    fn from(err: sfgate_client::Error) -> Self {
        let kind = match &err.kind {
            sfgate_client::ErrorKind::InvalidUrl(_) | sfgate_client::ErrorKind::Config(_) => {
                ErrorKind::Config(sanitize(err.to_string()))
            }
            _ => ErrorKind::Http(sanitize(err.to_string())),
        };
        Error::with_source(kind, err)
    }
}

fn sanitize(message: String) -> String {
    if message.contains("OAuth ")
        || message.contains("Bearer")
        || message.contains("token")
        || message.contains("password")
        || message.contains("secret")
    {
        "Client error (details redacted for security)".to_string()
    } else {
        message
    }
}
