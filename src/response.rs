//! Response wrapper pairing the parsed payload with the request that produced it.
//!
//! The [`Response`] type is the value returned by every successful dispatch.
//! It carries the parsed response body alongside a description of what was
//! sent (resolved URL and transport arguments), so callers and error reports
//! always know which request a payload belongs to.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// One completed request/response exchange.
///
/// `data` holds the parsed body (a JSON object or array for gateway
/// endpoints) and is absent until response processing fills it in. `request`
/// describes what was sent: at minimum the resolved `"url"`, plus `"query"`
/// and/or `"json"` entries mirroring the transport arguments after absent
/// parameters were stripped. The request description is always present,
/// defaulting to an empty map.
///
/// A `Response` is not mutated after it is returned; derive a modified copy
/// with [`Response::with_data`] or [`Response::with_request`] instead. Copies
/// own their containers independently, so mutating a clone never affects the
/// original.
///
/// # Examples
///
/// ```no_run
/// use gatebind::Client;
///
/// # async fn example() -> Result<(), gatebind::Error> {
/// let client = Client::builder()
///     .base_url("https://localhost:5000/v1/api")?
///     .build()?;
///
/// let response = client.get("portfolio/accounts", None).await?;
///
/// println!("data: {:?}", response.data);
/// println!("sent to: {:?}", response.request.get("url"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    /// The parsed response payload; `None` until populated by response
    /// processing.
    pub data: Option<Value>,

    /// Description of the originating request. Never optional.
    pub request: Map<String, Value>,
}

impl Response {
    /// Creates a response with both fields supplied.
    pub fn new(data: Option<Value>, request: Map<String, Value>) -> Self {
        Self { data, request }
    }

    /// Creates the in-progress response for a dispatched request, carrying
    /// only the request description. `data` stays empty until the response
    /// body is processed.
    pub fn for_request(request: Map<String, Value>) -> Self {
        Self {
            data: None,
            request,
        }
    }

    /// Derives a copy with the payload replaced.
    pub fn with_data(self, data: Value) -> Self {
        Self {
            data: Some(data),
            ..self
        }
    }

    /// Derives a copy with the request description replaced.
    pub fn with_request(self, request: Map<String, Value>) -> Self {
        Self { request, ..self }
    }

    /// Deserializes the payload into a typed value.
    ///
    /// An absent payload is treated as JSON `null`, which fails for any
    /// type that does not accept it.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatebind::Response;
    /// use serde_json::json;
    ///
    /// let response = Response::default().with_data(json!({"status": "ok"}));
    ///
    /// #[derive(serde::Deserialize)]
    /// struct Status {
    ///     status: String,
    /// }
    ///
    /// let status: Status = response.parse().unwrap();
    /// assert_eq!(status.status, "ok");
    /// ```
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.data.clone().unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Response {
        let mut request = Map::new();
        request.insert("url".to_string(), json!("https://x.test/orders"));
        Response::for_request(request).with_data(json!({"a": 1}))
    }

    #[test]
    fn for_request_starts_without_data() {
        let response = Response::for_request(Map::new());
        assert!(response.data.is_none());
        assert!(response.request.is_empty());
    }

    #[test]
    fn clone_is_independently_owned() {
        let original = sample();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        if let Some(Value::Object(data)) = copy.data.as_mut() {
            data.insert("a".to_string(), json!(2));
        }
        copy.request
            .insert("url".to_string(), json!("https://other.test/"));

        assert_eq!(original.data, Some(json!({"a": 1})));
        assert_eq!(
            original.request.get("url"),
            Some(&json!("https://x.test/orders"))
        );
    }

    #[test]
    fn with_data_preserves_request_description() {
        let derived = sample().with_data(json!([1, 2, 3]));
        assert_eq!(derived.data, Some(json!([1, 2, 3])));
        assert_eq!(
            derived.request.get("url"),
            Some(&json!("https://x.test/orders"))
        );
    }

    #[test]
    fn with_request_preserves_data() {
        let derived = sample().with_request(Map::new());
        assert_eq!(derived.data, Some(json!({"a": 1})));
        assert!(derived.request.is_empty());
    }

    #[test]
    fn parse_deserializes_typed_payloads() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Payload {
            a: i64,
        }

        let payload: Payload = sample().parse().unwrap();
        assert_eq!(payload, Payload { a: 1 });

        let missing: serde_json::Result<Payload> = Response::default().parse();
        assert!(missing.is_err());
    }
}
