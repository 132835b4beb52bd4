//! Error types for gateway API calls.
//!
//! Every failure surfaces to the caller as one of the [`Error`] kinds below;
//! nothing is swallowed. Logging happens alongside propagation, never instead
//! of it, and no partially-built [`Response`](crate::Response) is returned on
//! a failed call.

use crate::Response;
use http::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// The error type for all client operations.
///
/// The kinds are deliberately coarse so callers can branch on what matters:
/// configuration mistakes fail before any request, exhausted timeout retries
/// are terminal for this layer, non-timeout transport failures propagate
/// without retry, and fatal gateway responses carry the status, reason, and
/// raw body for diagnosis.
///
/// # Examples
///
/// ```no_run
/// use gatebind::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .base_url("https://localhost:5000/v1/api")?
///     .build()?;
///
/// match client.get("portfolio/accounts", None).await {
///     Ok(response) => println!("accounts: {:?}", response.data),
///     Err(Error::RetriesExhausted { max_retries, .. }) => {
///         eprintln!("gateway kept timing out after {} retries", max_retries);
///     }
///     Err(Error::Gateway { status, body, .. }) => {
///         eprintln!("gateway rejected the call: {} {}", status, body);
///     }
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid client configuration: missing or malformed base URL, a
    /// verification bundle that does not exist or is not valid PEM, a zero
    /// timeout, or a malformed `GATEBIND_*` environment variable.
    ///
    /// Raised eagerly at construction, never during a request.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Every allowed attempt timed out.
    ///
    /// Terminal after `max_retries + 1` consecutive read timeouts. Carries
    /// the verb, resolved URL, and request arguments so the failed call can
    /// be identified, and chains the final timeout as the cause.
    #[error("reached max retries ({max_retries}) for {method} {url} {request}")]
    RetriesExhausted {
        /// The HTTP method of the failed call.
        method: Method,
        /// The resolved request URL.
        url: String,
        /// The request description (URL and transport arguments).
        request: Value,
        /// The configured retry budget.
        max_retries: usize,
        /// The timeout from the final attempt.
        #[source]
        source: reqwest::Error,
    },

    /// A transport-level failure other than a read timeout: connection
    /// refused, DNS failure, TLS handshake error, and similar.
    ///
    /// Never retried; only timeouts are.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A timeout surfaced while reading the body of an otherwise successful
    /// response.
    #[error("gateway timeout error ({timeout:?}) with status {status}")]
    GatewayTimeout {
        /// The HTTP status of the response whose body timed out.
        status: StatusCode,
        /// The configured per-attempt timeout.
        timeout: Duration,
        /// The underlying timeout.
        #[source]
        source: reqwest::Error,
    },

    /// The gateway returned a fatal result: a non-success HTTP status, an
    /// unreadable body, or a body that is not valid JSON.
    ///
    /// Never retried at this layer. Carries the in-progress [`Response`]
    /// (request description, no data), the status code, the canonical status
    /// reason, and the raw body.
    #[error("gateway response error {status} :: {reason} :: {body}")]
    Gateway {
        /// The response as far as it was built (request description only).
        result: Response,
        /// The HTTP status code.
        status: StatusCode,
        /// The canonical status reason, or empty if unknown.
        reason: String,
        /// The raw response body, or empty if it could not be read.
        body: String,
        /// The triggering cause, when the failure was not the status itself.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Returns `true` if this failure was ultimately caused by a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::RetriesExhausted { .. } | Error::GatewayTimeout { .. } => true,
            Error::Transport(source) => source.is_timeout(),
            _ => false,
        }
    }

    /// Returns the HTTP status code if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Gateway { status, .. } | Error::GatewayTimeout { status, .. } => Some(*status),
            Error::Transport(source) => source.status(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error carries one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Gateway { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway_error() -> Error {
        Error::Gateway {
            result: Response::default(),
            status: StatusCode::NOT_FOUND,
            reason: "Not Found".to_string(),
            body: "not found".to_string(),
            source: None,
        }
    }

    #[test]
    fn gateway_error_exposes_status_and_body() {
        let error = gateway_error();
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(error.body(), Some("not found"));
        assert!(!error.is_timeout());
    }

    #[test]
    fn configuration_error_carries_no_status() {
        let error = Error::Configuration("base url is required".to_string());
        assert_eq!(error.status(), None);
        assert_eq!(error.body(), None);
        assert!(!error.is_timeout());
    }

    #[test]
    fn display_includes_status_reason_and_body() {
        let rendered = gateway_error().to_string();
        assert!(rendered.contains("404"));
        assert!(rendered.contains("Not Found"));
        assert!(rendered.contains("not found"));
    }
}
