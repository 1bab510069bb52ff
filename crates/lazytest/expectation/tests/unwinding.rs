//! Raising unwinds without the panic hook and still leaves the failure's
//! textual form in the log.
//!
//! Kept in its own test binary: the panic hook is process-wide.

use lazytest_expectation::{ExpectationFailure, Reason};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

static HOOK_CALLS: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn raise_skips_panic_hook_and_logs_textual_form() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|_| {
        HOOK_CALLS.fetch_add(1, Ordering::SeqCst);
    }));

    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let failure = ExpectationFailure::new(Reason::new().with("expected", 1).with("actual", 2));
    let expected = failure.clone();

    let payload = tracing::subscriber::with_default(subscriber, || {
        panic::catch_unwind(move || {
            failure.raise();
        })
    })
    .unwrap_err();

    panic::set_hook(previous);

    assert_eq!(HOOK_CALLS.load(Ordering::SeqCst), 0);
    assert_eq!(
        ExpectationFailure::from_panic_payload(payload.as_ref()),
        Some(&expected)
    );

    let output = log.contents();
    assert!(output.contains("ERROR"));
    assert!(output.contains(r#"lazytest::ExpectationFailure: {"actual":2,"expected":1}"#));
}

#[test]
fn raised_failure_crosses_thread_boundary() {
    let handle = std::thread::spawn(|| {
        ExpectationFailure::with_message(Some("late"), Reason::new().with("form", "(nil? x)"))
            .raise();
    });
    let payload = handle.join().unwrap_err();
    let failure = ExpectationFailure::from_panic_payload(payload.as_ref()).unwrap();
    assert_eq!(failure.message(), "late");
}
