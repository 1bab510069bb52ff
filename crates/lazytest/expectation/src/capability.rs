//! Generic capabilities an error can expose to type-agnostic handlers.
//!
//! A reporter that only knows [`StructuredError`] can read the payload of
//! any error implementing it, without naming the concrete type.

use crate::failure::ExpectationFailure;
use crate::reason::Reason;
use std::backtrace::Backtrace;
use std::error::Error;

/// An error that carries attached structured data.
pub trait StructuredError: Error + Send + Sync + 'static {
    /// The attached diagnostic payload.
    fn data(&self) -> &Reason;

    /// Short human-readable description.
    fn message(&self) -> &str;
}

/// Control over call-stack capture for an error value.
pub trait TraceCapture {
    /// Whether this type declines to capture stack traces.
    fn suppresses_trace_capture(&self) -> bool;

    /// Capture the current call stack into `self`. Types that suppress
    /// capture return `self` untouched.
    fn capture_trace(&self) -> &Self;

    /// The captured trace, if any.
    fn trace(&self) -> Option<&Backtrace>;
}

impl StructuredError for ExpectationFailure {
    fn data(&self) -> &Reason {
        self.reason()
    }

    fn message(&self) -> &str {
        ExpectationFailure::message(self)
    }
}

// No backtrace is ever stored; location data belongs in the reason payload.
impl TraceCapture for ExpectationFailure {
    fn suppresses_trace_capture(&self) -> bool {
        true
    }

    fn capture_trace(&self) -> &Self {
        self
    }

    fn trace(&self) -> Option<&Backtrace> {
        None
    }
}

/// Render any structured error as `message: payload`.
pub fn describe(error: &dyn StructuredError) -> String {
    format!("{}: {}", error.message(), error.data())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_matches_reason() {
        let failure = ExpectationFailure::new(Reason::new().with("actual", 2));
        let generic: &dyn StructuredError = &failure;
        assert_eq!(generic.data(), failure.reason());
        assert_eq!(generic.data().get("actual"), Some(&json!(2)));
    }

    #[test]
    fn test_message_through_capability() {
        let failure = ExpectationFailure::with_message(Some("off by one"), Reason::new());
        let generic: &dyn StructuredError = &failure;
        assert_eq!(generic.message(), "off by one");
    }

    #[test]
    fn test_boxed_structured_error() {
        let boxed: Box<dyn StructuredError> =
            Box::new(ExpectationFailure::new(Reason::new().with("form", "(pos? -1)")));
        assert_eq!(boxed.data().len(), 1);
        assert!(boxed.to_string().starts_with("lazytest::ExpectationFailure: "));
    }

    #[test]
    fn test_describe() {
        let failure = ExpectationFailure::new(Reason::new().with("expected", true));
        assert_eq!(describe(&failure), r#"Expectation failed: {"expected":true}"#);
    }

    #[test]
    fn test_trace_capture_is_suppressed() {
        let failure = ExpectationFailure::new(Reason::new());
        assert!(failure.suppresses_trace_capture());
        assert!(failure.trace().is_none());
    }

    #[test]
    fn test_capture_trace_returns_self() {
        let failure = ExpectationFailure::new(Reason::new().with("k", 1));
        let captured = failure.capture_trace();
        assert!(std::ptr::eq(captured, &failure));
        assert!(captured.trace().is_none());
    }

    #[test]
    fn test_capture_trace_idempotent() {
        let failure = ExpectationFailure::new(Reason::new());
        let before = failure.clone();
        let again = failure.capture_trace().capture_trace().capture_trace();
        assert!(std::ptr::eq(again, &failure));
        assert!(again.trace().is_none());
        assert_eq!(failure, before);
    }
}
