//! Raising expectation failures and recognizing them on the catching side.
//!
//! Two paths are supported:
//!
//! - `Result`: the failure is an ordinary error value, returned with `?`,
//!   possibly wrapped by other errors. [`find_expectation_failure`] walks
//!   the `source()` chain to recover it.
//! - Unwinding: [`ExpectationFailure::raise`] unwinds with the failure as
//!   the panic payload, and [`ExpectationFailure::from_panic_payload`]
//!   recovers it after `catch_unwind`. The panic hook is bypassed, so the
//!   textual form reaches output through the `error` event `raise` emits.

use crate::failure::ExpectationFailure;
use std::any::Any;
use std::error::Error;

impl ExpectationFailure {
    /// Unwind with this failure as the panic payload.
    ///
    /// Unwinds via `resume_unwind`: the panic hook does not run and no
    /// backtrace is captured, even under `RUST_BACKTRACE`. The textual form
    /// is logged at `error` level first, so an uncaught raise is not silent.
    pub fn raise(self) -> ! {
        tracing::error!(failure = %self, "expectation failure raised");
        std::panic::resume_unwind(Box::new(self))
    }

    /// Recover a failure from a payload returned by `catch_unwind`.
    pub fn from_panic_payload(payload: &(dyn Any + Send)) -> Option<&ExpectationFailure> {
        payload.downcast_ref::<ExpectationFailure>()
    }
}

/// Find the first expectation failure in an error's `source()` chain,
/// starting with the error itself.
pub fn find_expectation_failure<'a>(
    error: &'a (dyn Error + 'static),
) -> Option<&'a ExpectationFailure> {
    std::iter::successors(Some(error), |&err| err.source())
        .find_map(|err| err.downcast_ref::<ExpectationFailure>())
}

/// How a runner should treat a caught error.
#[derive(Debug, Clone, Copy)]
pub enum FailureKind<'a> {
    /// An expectation did not hold; render its reason.
    Expectation(&'a ExpectationFailure),
    /// Anything else: an unexpected error in the code under test.
    Unexpected(&'a (dyn Error + 'static)),
}

impl<'a> FailureKind<'a> {
    /// Classify a caught error by searching its `source()` chain.
    pub fn classify(error: &'a (dyn Error + 'static)) -> Self {
        match find_expectation_failure(error) {
            Some(failure) => Self::Expectation(failure),
            None => {
                tracing::debug!(error = %error, "caught error is not an expectation failure");
                Self::Unexpected(error)
            }
        }
    }

    /// Whether the error was an expectation failure.
    pub fn is_expectation(&self) -> bool {
        matches!(self, Self::Expectation(_))
    }
}
