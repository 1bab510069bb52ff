//! The expectation failure value.
//!
//! Built once at an assertion site, propagated unchanged, consumed once by
//! whichever runner catches it. No field changes after construction.

use crate::reason::Reason;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Message used when the assertion site supplies none.
pub const DEFAULT_MESSAGE: &str = "Expectation failed";

/// Type name prefixed to the textual form.
pub const TYPE_NAME: &str = "lazytest::ExpectationFailure";

/// An expectation that did not hold, plus its structured diagnostic payload.
///
/// Construction is total: an absent message falls back to [`DEFAULT_MESSAGE`]
/// and an absent reason becomes an empty payload. Cloning shares the payload.
#[derive(Debug, Clone, PartialEq, Eq, Error, Deserialize)]
#[serde(from = "FailureRepr")]
#[error("{}: {}", TYPE_NAME, .reason)]
pub struct ExpectationFailure {
    message: String,
    reason: Arc<Reason>,
}

impl ExpectationFailure {
    /// Create a failure with the default message.
    pub fn new(reason: impl Into<Reason>) -> Self {
        Self::with_message(None::<String>, reason)
    }

    /// Create a failure with an explicit message; `None` selects the default.
    pub fn with_message<M, R>(message: Option<M>, reason: R) -> Self
    where
        M: Into<String>,
        R: Into<Reason>,
    {
        let message = message.map_or_else(|| DEFAULT_MESSAGE.to_string(), Into::into);
        let reason = reason.into();

        tracing::trace!(keys = reason.len(), "expectation failure constructed");

        Self {
            message,
            reason: Arc::new(reason),
        }
    }

    /// The structured payload, exactly as supplied.
    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// The short human-readable summary.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for ExpectationFailure {
    fn default() -> Self {
        Self::new(Reason::new())
    }
}

impl Serialize for ExpectationFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExpectationFailure", 2)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("reason", self.reason.as_ref())?;
        state.end()
    }
}

/// Wire shape accepted when reading a failure back; both fields optional.
#[derive(Deserialize)]
struct FailureRepr {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    reason: Option<Value>,
}

impl From<FailureRepr> for ExpectationFailure {
    fn from(repr: FailureRepr) -> Self {
        let reason = repr.reason.map(Reason::from);
        Self::with_message(repr.message, reason)
    }
}
