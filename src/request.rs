//! Arguments for the generic dispatcher.

use crate::Params;

/// Per-call arguments accepted by [`Client::request`](crate::Client::request).
///
/// The convenience methods fill this in for the common cases; use it directly
/// to control parameter placement, the logging toggle, or the attempt label.
///
/// # Examples
///
/// ```no_run
/// use gatebind::{Client, Params, RequestArgs};
/// use http::Method;
///
/// # async fn example() -> Result<(), gatebind::Error> {
/// let client = Client::builder()
///     .base_url("https://localhost:5000/v1/api")?
///     .build()?;
///
/// let args = RequestArgs::new()
///     .with_query(Params::new().with("symbol", "AAPL"))
///     .with_log(false);
///
/// let response = client.request(Method::GET, "trsrv/stocks", args).await?;
/// println!("{:?}", response.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestArgs {
    /// Parameters carried as query-string key/values.
    pub query: Option<Params>,

    /// Parameters carried as a JSON request body.
    pub json: Option<Params>,

    /// Caller-side attempt label, included in the dispatch log line when
    /// greater than zero. Bookkeeping only; the retry loop keeps its own
    /// count and ignores this value.
    pub attempt: usize,

    /// Whether to log this dispatch. Defaults to enabled.
    pub log: bool,
}

impl RequestArgs {
    /// Creates the default arguments: no parameters, attempt 0, logging on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query-placed parameters.
    pub fn with_query(mut self, params: impl Into<Option<Params>>) -> Self {
        self.query = params.into();
        self
    }

    /// Sets the body-placed parameters.
    pub fn with_json(mut self, params: impl Into<Option<Params>>) -> Self {
        self.json = params.into();
        self
    }

    /// Sets the attempt label used in the dispatch log line.
    pub fn with_attempt(mut self, attempt: usize) -> Self {
        self.attempt = attempt;
        self
    }

    /// Enables or disables logging for this dispatch.
    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }
}

impl Default for RequestArgs {
    fn default() -> Self {
        Self {
            query: None,
            json: None,
            attempt: 0,
            log: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_logging_at_attempt_zero() {
        let args = RequestArgs::new();
        assert!(args.log);
        assert_eq!(args.attempt, 0);
        assert!(args.query.is_none());
        assert!(args.json.is_none());
    }

    #[test]
    fn builder_methods_set_fields() {
        let args = RequestArgs::new()
            .with_query(Params::new().with("a", 1))
            .with_json(None)
            .with_attempt(2)
            .with_log(false);

        assert_eq!(args.query.as_ref().map(Params::len), Some(1));
        assert!(args.json.is_none());
        assert_eq!(args.attempt, 2);
        assert!(!args.log);
    }
}
