//! Request parameters with an explicit "absent" marker.
//!
//! Gateway endpoints apply their own defaults when a parameter is not sent
//! at all, which is different from sending it as `null`. [`Param::Absent`]
//! marks a parameter as intentionally omitted; it is stripped before the
//! request goes on the wire, while explicit `null`, `false`, and empty
//! values are kept and sent.

use serde_json::{Map, Value};

/// A single request parameter value.
///
/// Either a JSON value to be sent, or [`Param::Absent`] to let the gateway's
/// own default take effect. `Option::None` converts to `Absent`, so optional
/// call arguments can be forwarded directly:
///
/// ```
/// use gatebind::Params;
///
/// let page: Option<u32> = None;
/// let params = Params::new()
///     .with("symbol", "AAPL")
///     .with("page", page);
///
/// // "page" never reaches the wire
/// assert_eq!(params.query_pairs(), vec![("symbol".to_string(), "AAPL".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Parameter intentionally omitted; stripped before dispatch.
    Absent,
    /// Parameter value sent as-is, including explicit `null`.
    Value(Value),
}

impl Param {
    /// An explicit JSON `null`, distinct from [`Param::Absent`].
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    /// Returns `true` for the absent marker.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_owned()))
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<u64> for Param {
    fn from(value: u64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Absent,
        }
    }
}

/// An ordered collection of named request parameters.
///
/// Built incrementally with [`Params::with`] or collected from pairs.
/// Conversion to wire form ([`Params::query_pairs`] for query placement,
/// [`Params::json_object`] for body placement) strips [`Param::Absent`]
/// entries and keeps everything else.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params {
    entries: Vec<(String, Param)>,
}

impl Params {
    /// Creates an empty parameter collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, consuming and returning the collection.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Param>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Number of entries, including absent ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts to query-string pairs, stripping absent entries.
    ///
    /// String values are used verbatim; other values are rendered as
    /// compact JSON (`1`, `true`, `null`).
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(key, param)| match param {
                Param::Absent => None,
                Param::Value(Value::String(text)) => Some((key.clone(), text.clone())),
                Param::Value(value) => Some((key.clone(), value.to_string())),
            })
            .collect()
    }

    /// Converts to a JSON object, stripping absent entries.
    pub fn json_object(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .filter_map(|(key, param)| match param {
                Param::Absent => None,
                Param::Value(value) => Some((key.clone(), value.clone())),
            })
            .collect()
    }
}

impl<K, P> FromIterator<(K, P)> for Params
where
    K: Into<String>,
    P: Into<Param>,
{
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K, P, const N: usize> From<[(K, P); N]> for Params
where
    K: Into<String>,
    P: Into<Param>,
{
    fn from(pairs: [(K, P); N]) -> Self {
        pairs.into_iter().collect()
    }
}
