//! Lazytest Expectation Failures
//!
//! An immutable failure value raised when a test expectation does not hold.
//! Besides a short message it carries a structured [`Reason`] payload
//! (expected value, actual value, assertion form, location, ...) so that
//! reporters can render rich output without parsing strings.
//!
//! Failures are cheap to build: no stack trace is ever captured. The
//! assertion site is described by the payload, not by the raise site.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`reason`] | The structured payload and its normalizing conversions |
//! | [`failure`] | [`ExpectationFailure`] itself |
//! | [`capability`] | [`StructuredError`] and [`TraceCapture`] |
//! | [`propagation`] | Raising, and recognizing failures on the catching side |
//!
//! # Quick Start
//!
//! ```rust
//! use lazytest_expectation::{ExpectationFailure, FailureKind, Reason};
//!
//! fn check_sum(actual: i64) -> Result<(), ExpectationFailure> {
//!     if actual == 4 {
//!         return Ok(());
//!     }
//!     Err(ExpectationFailure::new(
//!         Reason::new()
//!             .with("form", "(= 4 (+ 2 2))")
//!             .with("expected", 4)
//!             .with("actual", actual),
//!     ))
//! }
//!
//! let failure = check_sum(5).unwrap_err();
//! assert_eq!(failure.message(), "Expectation failed");
//! assert!(FailureKind::classify(&failure).is_expectation());
//! assert_eq!(
//!     failure.to_string(),
//!     r#"lazytest::ExpectationFailure: {"actual":5,"expected":4,"form":"(= 4 (+ 2 2))"}"#
//! );
//! ```

pub mod capability;
pub mod failure;
pub mod propagation;
pub mod reason;

// Re-export key types at crate root.
pub use capability::{describe, StructuredError, TraceCapture};
pub use failure::{ExpectationFailure, DEFAULT_MESSAGE, TYPE_NAME};
pub use propagation::{find_expectation_failure, FailureKind};
pub use reason::{Reason, WRAPPED_VALUE_KEY};
