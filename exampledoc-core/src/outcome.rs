//! Example Outcomes
//!
//! Examples report failure through return values (`Result`) or by panicking.
//! Both are folded into an explicit `ExampleStatus` by the execution harness.

use crate::Console;
use std::any::Any;
use std::error::Error;

/// Boxed error returned by a failing example
pub type ExampleError = Box<dyn Error + Send + Sync + 'static>;

/// Result of invoking an example's entry operation
pub type ExampleResult = Result<(), ExampleError>;

/// An example implemented as a type.
///
/// Types annotated with `#[example]` are instantiated through `Default` and
/// then have `main` invoked once.
pub trait Example: Default {
    /// The code to be exemplified
    fn main(&mut self, out: &mut Console) -> ExampleResult;
}

/// Conversion of an example's return value into an `ExampleResult`.
///
/// Implemented for `()` and for `Result<(), E>` whenever `E` converts into
/// a boxed error (which covers `anyhow::Error` and any `std::error::Error`).
pub trait IntoExampleResult {
    /// Perform the conversion
    fn into_example_result(self) -> ExampleResult;
}

impl IntoExampleResult for () {
    fn into_example_result(self) -> ExampleResult {
        Ok(())
    }
}

impl<E> IntoExampleResult for Result<(), E>
where
    E: Into<ExampleError>,
{
    fn into_example_result(self) -> ExampleResult {
        self.map_err(Into::into)
    }
}

/// Execution status of an example
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExampleStatus {
    /// Entry operation returned normally (also the state before execution)
    #[default]
    Success,
    /// Entry operation failed
    Failed {
        /// Message of the innermost cause
        message: String,
    },
}

impl ExampleStatus {
    /// `0` on success, `-1` on failure
    pub fn exit_code(&self) -> i32 {
        match self {
            ExampleStatus::Success => 0,
            ExampleStatus::Failed { .. } => -1,
        }
    }

    /// Failure message, present iff the example failed
    pub fn error(&self) -> Option<&str> {
        match self {
            ExampleStatus::Success => None,
            ExampleStatus::Failed { message } => Some(message),
        }
    }

    /// Whether the example succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, ExampleStatus::Success)
    }
}

/// Message of the innermost cause in an error's `source()` chain.
///
/// Wrapping layers are discarded: only the root cause is reported.
pub fn innermost_message(error: &(dyn Error + 'static)) -> String {
    let mut cause = error;
    while let Some(next) = cause.source() {
        cause = next;
    }
    cause.to_string()
}

/// Message carried by a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Wrapper {
        inner: Inner,
    }

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Exception has been thrown by the target of an invocation.")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "CodeExample0:error")
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.inner)
        }
    }

    impl Error for Inner {}

    #[test]
    fn test_innermost_message_skips_wrappers() {
        let err = Wrapper { inner: Inner };
        assert_eq!(innermost_message(&err), "CodeExample0:error");
    }

    #[test]
    fn test_innermost_message_of_leaf() {
        let err: ExampleError = "plain failure".into();
        assert_eq!(innermost_message(err.as_ref()), "plain failure");
    }

    #[test]
    fn test_status_invariants() {
        let ok = ExampleStatus::default();
        assert_eq!(ok.exit_code(), 0);
        assert!(ok.error().is_none());

        let failed = ExampleStatus::Failed {
            message: "boom".to_string(),
        };
        assert_eq!(failed.exit_code(), -1);
        assert_eq!(failed.error(), Some("boom"));
        assert!(!failed.is_success());
    }

    #[test]
    fn test_into_example_result() {
        assert!(().into_example_result().is_ok());
        let failed: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
        let err = failed.into_example_result().unwrap_err();
        assert_eq!(err.to_string(), "disk");
    }

    #[test]
    fn test_panic_message_variants() {
        let payload: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(payload.as_ref()), "static str");
        let payload: Box<dyn Any + Send> = Box::new(format!("owned {}", 1));
        assert_eq!(panic_message(payload.as_ref()), "owned 1");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "Unknown panic");
    }
}
