//! REST client with bounded retry-on-timeout and request-scoped logging.
//!
//! The [`Client`] type is the entry point for dispatching requests. Use
//! [`ClientBuilder`] to configure and create clients; configuration is
//! validated eagerly, so an invalid setup fails at construction rather than
//! on a later request.

use crate::{env, Error, Params, RequestArgs, Response, Result};
use http::Method;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::Span;
use url::Url;

/// Transport-layer certificate verification mode.
///
/// Gateways are commonly reached over HTTPS with a self-signed certificate,
/// so verification defaults to [`Verification::Disabled`]. Point it at a CA
/// bundle to verify instead; the bundle must exist and parse as PEM at
/// construction time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Verification {
    /// Skip certificate verification entirely.
    #[default]
    Disabled,
    /// Verify against the trust anchors in the given PEM bundle.
    CaBundle(PathBuf),
}

/// A client for a gateway REST API, with retry-on-timeout and uniform
/// result modeling.
///
/// The client is cheap to clone and safe to share across concurrent callers:
/// configuration is immutable after construction and every call owns its own
/// arguments and result. Each logical request blocks its caller for at most
/// `(max_retries + 1) × timeout` — attempts run strictly one after another
/// with no delay in between.
///
/// # Examples
///
/// ```no_run
/// use gatebind::{Client, Params};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), gatebind::Error> {
/// let client = Client::builder()
///     .base_url("https://localhost:5000/v1/api")?
///     .timeout(Duration::from_secs(10))
///     .max_retries(3)
///     .build()?;
///
/// // GET with query-placed parameters
/// let stocks = client
///     .get("trsrv/stocks", Params::new().with("symbols", "AAPL,MSFT"))
///     .await?;
/// println!("stocks: {:?}", stocks.data);
///
/// // POST with body-placed parameters
/// let order = client
///     .post("iserver/account/orders", Params::new().with("ticker", "AAPL"))
///     .await?;
/// println!("submitted: {:?}", order.data);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    name: String,
    verification: Verification,
    timeout: Duration,
    max_retries: usize,
    span: OnceLock<Span>,
}

impl Client {
    /// Creates a new [`ClientBuilder`] with default settings.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Sends a GET request; parameters are carried as query key/values.
    ///
    /// Returns the dispatcher's [`Response`] or propagates its error
    /// unchanged.
    pub async fn get(
        &self,
        path: impl AsRef<str>,
        params: impl Into<Option<Params>>,
    ) -> Result<Response> {
        self.request(Method::GET, path.as_ref(), RequestArgs::new().with_query(params))
            .await
    }

    /// Sends a POST request; parameters are carried as a JSON body.
    pub async fn post(
        &self,
        path: impl AsRef<str>,
        params: impl Into<Option<Params>>,
    ) -> Result<Response> {
        self.request(Method::POST, path.as_ref(), RequestArgs::new().with_json(params))
            .await
    }

    /// Sends a DELETE request; parameters are carried as a JSON body.
    pub async fn delete(
        &self,
        path: impl AsRef<str>,
        params: impl Into<Option<Params>>,
    ) -> Result<Response> {
        self.request(Method::DELETE, path.as_ref(), RequestArgs::new().with_json(params))
            .await
    }

    /// Dispatches a request, retrying on read timeouts.
    ///
    /// The endpoint is appended to the base URL, absent parameters are
    /// stripped so the gateway's defaults apply, and the transport call runs
    /// in a bounded loop: at most `max_retries + 1` attempts, each with the
    /// configured timeout, with no delay between them. Only read timeouts
    /// are retried — a timeout may indicate transient load and is safe to
    /// repeat, whereas other transport failures are not blindly retried.
    /// HTTP-level failures in the response are fatal and never retried.
    ///
    /// # Errors
    ///
    /// - [`Error::RetriesExhausted`] once every allowed attempt timed out.
    /// - [`Error::Transport`] for any other transport failure, immediately.
    /// - [`Error::Gateway`] / [`Error::GatewayTimeout`] from response
    ///   processing.
    pub async fn request(
        &self,
        method: Method,
        endpoint: impl AsRef<str>,
        args: RequestArgs,
    ) -> Result<Response> {
        let url = format!("{}{}", self.inner.base_url, endpoint.as_ref());

        // absent entries are stripped so the gateway's defaults apply
        let query_object = args.query.as_ref().map(Params::json_object);
        let json_object = args.json.as_ref().map(Params::json_object);
        let query_pairs = args.query.as_ref().map(Params::query_pairs);

        let mut request = Map::new();
        request.insert("url".to_string(), Value::String(url.clone()));
        if let Some(object) = &query_object {
            request.insert("query".to_string(), Value::Object(object.clone()));
        }
        if let Some(object) = &json_object {
            request.insert("json".to_string(), Value::Object(object.clone()));
        }

        if args.log {
            self.span().in_scope(|| {
                if args.attempt > 0 {
                    tracing::info!(
                        method = %method,
                        url = %url,
                        query = ?query_object,
                        json = ?json_object,
                        attempt = args.attempt,
                        "dispatching request"
                    );
                } else {
                    tracing::info!(
                        method = %method,
                        url = %url,
                        query = ?query_object,
                        json = ?json_object,
                        "dispatching request"
                    );
                }
            });
        }

        let mut attempt = 0usize;
        loop {
            let mut call = self
                .inner
                .http
                .request(method.clone(), &url)
                .timeout(self.inner.timeout);
            if let Some(pairs) = &query_pairs {
                call = call.query(pairs);
            }
            if let Some(body) = &json_object {
                call = call.json(body);
            }

            match call.send().await {
                Ok(response) => {
                    let result = Response::for_request(request.clone());
                    let outcome = self.process_response(response, result).await;
                    if args.log {
                        if let Err(error) = &outcome {
                            self.span().in_scope(|| {
                                tracing::error!(%error, method = %method, url = %url, "request failed");
                            });
                        }
                    }
                    return outcome;
                }
                Err(source) if source.is_timeout() => {
                    if attempt >= self.inner.max_retries {
                        return Err(Error::RetriesExhausted {
                            method,
                            url,
                            request: Value::Object(request),
                            max_retries: self.inner.max_retries,
                            source,
                        });
                    }
                    attempt += 1;
                    tracing::info!(
                        method = %method,
                        url = %url,
                        attempt,
                        max_retries = self.inner.max_retries,
                        "timeout, retrying"
                    );
                }
                Err(source) => {
                    if args.log {
                        self.span().in_scope(|| {
                            tracing::error!(error = %source, method = %method, url = %url, "transport failure");
                        });
                    }
                    return Err(Error::Transport(source));
                }
            }
        }
    }

    /// Turns a raw transport response into a completed [`Response`] or a
    /// fatal error. Nothing here is retried; retry applies only to
    /// transport-level read timeouts.
    async fn process_response(
        &self,
        response: reqwest::Response,
        result: Response,
    ) -> Result<Response> {
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Gateway {
                result,
                status,
                reason,
                body,
                source: None,
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(source) if source.is_timeout() => {
                return Err(Error::GatewayTimeout {
                    status,
                    timeout: self.inner.timeout,
                    source,
                });
            }
            Err(source) => {
                return Err(Error::Gateway {
                    result,
                    status,
                    reason,
                    body: String::new(),
                    source: Some(Box::new(source)),
                });
            }
        };

        match serde_json::from_str::<Value>(&body) {
            Ok(data) => Ok(result.with_data(data)),
            Err(source) => Err(Error::Gateway {
                result,
                status,
                reason,
                body,
                source: Some(Box::new(source)),
            }),
        }
    }

    /// The logging span bound to this client, created on first use and
    /// reused for the client's lifetime. Initialization is safe under
    /// concurrent first access.
    fn span(&self) -> &Span {
        self.inner.span.get_or_init(|| {
            tracing::info_span!(
                "rest_client",
                client = %self.inner.name,
                base_url = %self.inner.base_url
            )
        })
    }

    /// The normalized base URL; always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The logging identity of this client.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The certificate verification mode.
    pub fn verification(&self) -> &Verification {
        &self.inner.verification
    }

    /// The per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// The number of additional attempts allowed after the first.
    pub fn max_retries(&self) -> usize {
        self.inner.max_retries
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use gatebind::{ClientBuilder, Verification};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), gatebind::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://localhost:5000/v1/api")?
///     .ca_bundle("/etc/ssl/certs/gateway.pem")
///     .timeout(Duration::from_secs(5))
///     .max_retries(2)
///     .name("ibkr_client")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    verification: Verification,
    timeout: Duration,
    max_retries: usize,
    name: String,
}

impl ClientBuilder {
    /// Creates a builder with the defaults: verification disabled, a 10 s
    /// per-attempt timeout, 3 retries, and the `rest_client` identity.
    pub fn new() -> Self {
        Self {
            base_url: None,
            verification: Verification::default(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            name: "rest_client".to_string(),
        }
    }

    /// Seeds a builder from `GATEBIND_*` environment variables.
    ///
    /// `GATEBIND_BASE_URL` is required. `GATEBIND_CACERT` is either a
    /// false-y token (verification disabled) or a path to a CA bundle;
    /// unset means disabled. `GATEBIND_TIMEOUT` is a number of seconds and
    /// `GATEBIND_MAX_RETRIES` a non-negative integer; both fall back to the
    /// builder defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the base URL is missing or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new();

        let base_url = env::lookup(env::BASE_URL)
            .ok_or_else(|| Error::Configuration(format!("{} is not set", env::BASE_URL)))?;
        builder = builder.base_url(base_url)?;

        if let Some(cacert) = env::lookup(env::CACERT) {
            if !env::is_falsey(&cacert) {
                builder = builder.ca_bundle(cacert);
            }
        }
        if let Some(timeout) = env::lookup(env::TIMEOUT) {
            builder = builder.timeout(env::timeout_from(&timeout)?);
        }
        if let Some(retries) = env::lookup(env::MAX_RETRIES) {
            builder = builder.max_retries(env::retries_from(&retries)?);
        }

        Ok(builder)
    }

    /// Sets the base URL for all requests, appending a trailing `/` if
    /// missing so endpoints can be joined by plain concatenation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the URL does not parse.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let mut raw = url.as_ref().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let parsed = Url::parse(&raw)
            .map_err(|e| Error::Configuration(format!("invalid base url {raw:?}: {e}")))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Sets the certificate verification mode.
    pub fn verification(mut self, verification: Verification) -> Self {
        self.verification = verification;
        self
    }

    /// Verifies the gateway's certificate against the given PEM bundle.
    ///
    /// Shorthand for [`ClientBuilder::verification`] with
    /// [`Verification::CaBundle`]. The path is checked at [`build`] time.
    ///
    /// [`build`]: ClientBuilder::build
    pub fn ca_bundle(self, path: impl Into<PathBuf>) -> Self {
        self.verification(Verification::CaBundle(path.into()))
    }

    /// Sets the per-attempt timeout. Must be non-zero.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of additional attempts after the first on read
    /// timeouts. Zero disables retrying.
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the logging identity carried by this client's span.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Validates the configuration and builds the [`Client`].
    ///
    /// No request is issued and no logging span is created; the span is
    /// initialized lazily on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the base URL is missing, the
    /// timeout is zero, or the CA bundle does not exist, cannot be read, or
    /// is not valid PEM.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("base url is required".to_string()))?;

        if self.timeout.is_zero() {
            return Err(Error::Configuration("timeout must be non-zero".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        match &self.verification {
            Verification::Disabled => {
                builder = builder.danger_accept_invalid_certs(true);
            }
            Verification::CaBundle(path) => {
                if !path.exists() {
                    return Err(Error::Configuration(format!(
                        "ca bundle {} does not exist",
                        path.display()
                    )));
                }
                let pem = std::fs::read(path).map_err(|e| {
                    Error::Configuration(format!("failed to read ca bundle {}: {e}", path.display()))
                })?;
                let certificate = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                    Error::Configuration(format!("ca bundle {} is not valid PEM: {e}", path.display()))
                })?;
                builder = builder.add_root_certificate(certificate);
            }
        }

        let http = builder
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                name: self.name,
                verification: self.verification,
                timeout: self.timeout,
                max_retries: self.max_retries,
                span: OnceLock::new(),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // from_env tests mutate process-wide state; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for name in [env::BASE_URL, env::CACERT, env::TIMEOUT, env::MAX_RETRIES] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = Client::builder()
            .base_url("https://x.test")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://x.test/");

        let client = Client::builder()
            .base_url("https://api.test/v1/api")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.test/v1/api/");
    }

    #[test]
    fn terminated_base_url_is_unchanged() {
        let client = Client::builder()
            .base_url("https://x.test/v1/")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://x.test/v1/");
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let result = Client::builder().base_url("not a url");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn missing_base_url_fails_build() {
        let result = Client::builder().build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn zero_timeout_fails_build() {
        let result = Client::builder()
            .base_url("https://x.test")
            .unwrap()
            .timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn nonexistent_ca_bundle_fails_build() {
        let result = Client::builder()
            .base_url("https://x.test")
            .unwrap()
            .ca_bundle("/definitely/not/a/real/bundle.pem")
            .build();
        match result {
            Err(Error::Configuration(message)) => {
                assert!(message.contains("does not exist"), "{message}");
            }
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn unparseable_ca_bundle_fails_build() {
        let path = std::env::temp_dir().join(format!(
            "gatebind-bad-bundle-{}.pem",
            std::process::id()
        ));
        std::fs::write(&path, "not a certificate").unwrap();

        let result = Client::builder()
            .base_url("https://x.test")
            .unwrap()
            .ca_bundle(&path)
            .build();
        let _ = std::fs::remove_file(&path);

        match result {
            Err(Error::Configuration(message)) => {
                assert!(message.contains("not valid PEM"), "{message}");
            }
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let client = Client::builder()
            .base_url("https://x.test")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(10));
        assert_eq!(client.max_retries(), 3);
        assert_eq!(client.name(), "rest_client");
        assert_eq!(client.verification(), &Verification::Disabled);
    }

    #[test]
    fn builder_setters_are_stored_verbatim() {
        let client = Client::builder()
            .base_url("https://x.test")
            .unwrap()
            .timeout(Duration::from_millis(1500))
            .max_retries(0)
            .name("ibkr_client")
            .build()
            .unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(1500));
        assert_eq!(client.max_retries(), 0);
        assert_eq!(client.name(), "ibkr_client");
    }

    #[test]
    fn from_env_requires_base_url() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let result = ClientBuilder::from_env();
        match result {
            Err(Error::Configuration(message)) => {
                assert!(message.contains(env::BASE_URL), "{message}");
            }
            _ => panic!("expected configuration error"),
        }
    }

    #[test]
    fn from_env_seeds_builder_fields() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var(env::BASE_URL, "https://x.test");
        std::env::set_var(env::CACERT, "false");
        std::env::set_var(env::TIMEOUT, "2.5");
        std::env::set_var(env::MAX_RETRIES, "5");

        let client = ClientBuilder::from_env().unwrap().build().unwrap();
        clear_env();

        assert_eq!(client.base_url().as_str(), "https://x.test/");
        assert_eq!(client.verification(), &Verification::Disabled);
        assert_eq!(client.timeout(), Duration::from_millis(2500));
        assert_eq!(client.max_retries(), 5);
    }

    #[test]
    fn from_env_cacert_path_is_validated_at_build() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var(env::BASE_URL, "https://x.test");
        std::env::set_var(env::CACERT, "/definitely/not/a/real/bundle.pem");

        let builder = ClientBuilder::from_env().unwrap();
        let result = builder.build();
        clear_env();

        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn from_env_rejects_malformed_numbers() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var(env::BASE_URL, "https://x.test");
        std::env::set_var(env::TIMEOUT, "soon");

        let result = ClientBuilder::from_env();
        clear_env();

        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
