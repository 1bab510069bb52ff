//! The structured reason payload attached to an expectation failure.
//!
//! A [`Reason`] is an open, caller-defined map of diagnostic data
//! (`expected`, `actual`, `form`, source location, ...). Nothing here
//! assumes any particular key is present.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Key used when a non-object value is supplied as a reason.
pub const WRAPPED_VALUE_KEY: &str = "value";

/// Structured diagnostic payload: string keys, arbitrary JSON values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reason(Map<String, Value>);

impl Reason {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entry while the payload is being assembled.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in the backing map's order.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Borrow the backing map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwrap into the backing map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// The payload as a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Reason {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Option<Reason>> for Reason {
    fn from(reason: Option<Reason>) -> Self {
        match reason {
            Some(reason) => reason,
            None => {
                tracing::debug!("absent reason normalized to an empty payload");
                Self::default()
            }
        }
    }
}

impl From<Option<Map<String, Value>>> for Reason {
    fn from(map: Option<Map<String, Value>>) -> Self {
        match map {
            Some(map) => Self(map),
            None => {
                tracing::debug!("absent reason map normalized to an empty payload");
                Self::default()
            }
        }
    }
}

impl From<Value> for Reason {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            Value::Null => {
                tracing::debug!("null reason normalized to an empty payload");
                Self::default()
            }
            other => {
                tracing::debug!(
                    key = WRAPPED_VALUE_KEY,
                    "non-object reason wrapped into a payload"
                );
                Self::default().with(WRAPPED_VALUE_KEY, other)
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Reason
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Reason {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Serializes a JSON value with object keys sorted at every depth,
/// whatever order the backing map keeps.
struct Sorted<'a>(&'a Value);

impl Serialize for Sorted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => serialize_sorted(map, serializer),
            Value::Array(items) => serializer.collect_seq(items.iter().map(Sorted)),
            other => other.serialize(serializer),
        }
    }
}

struct SortedMap<'a>(&'a Map<String, Value>);

impl Serialize for SortedMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_sorted(self.0, serializer)
    }
}

fn serialize_sorted<S: Serializer>(
    map: &Map<String, Value>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let sorted: BTreeMap<&String, Sorted<'_>> =
        map.iter().map(|(key, value)| (key, Sorted(value))).collect();
    serializer.collect_map(sorted)
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // String-keyed maps of JSON values always serialize.
        let text = serde_json::to_string(&SortedMap(&self.0)).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
