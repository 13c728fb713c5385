//! Example Execution
//!
//! Runs an example's entry operation with its output captured into a
//! [`Console`], folding returned errors and panics into an
//! [`ExampleStatus`].
//!
//! Executions are serialized process-wide. While one is in flight the
//! panic hook is swapped for one that logs through `tracing`, so a
//! panicking example does not print a backtrace notice into the report.

use super::ExampleInfo;
use exampledoc_core::{Console, ExampleStatus, innermost_message, panic_message};
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::debug;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

static EXECUTION_LOCK: Mutex<()> = Mutex::new(());

/// Holds the execution lock and the displaced panic hook
struct ExecutionGuard {
    previous_hook: Option<PanicHook>,
    _lock: MutexGuard<'static, ()>,
}

impl ExecutionGuard {
    fn acquire() -> Self {
        let lock = EXECUTION_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(|info| {
            debug!(panic = %info, "example panicked");
        }));

        Self {
            previous_hook: Some(previous_hook),
            _lock: lock,
        }
    }
}

impl Drop for ExecutionGuard {
    fn drop(&mut self) {
        if let Some(hook) = self.previous_hook.take() {
            panic::set_hook(hook);
        }
    }
}

/// Execute one example, recording its status, output and duration.
///
/// Never fails: errors and panics raised by the example become a
/// [`ExampleStatus::Failed`] carrying the innermost message. Output written
/// before a failure is kept.
pub fn execute(example: &mut ExampleInfo) {
    let _guard = ExecutionGuard::acquire();
    debug!(example = %example.name, "executing");

    let runner = example.def.runner_fn;
    let mut console = Console::new();
    let start = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(|| runner(&mut console)));
    example.duration = start.elapsed();

    example.status = match result {
        Ok(Ok(())) => ExampleStatus::Success,
        Ok(Err(error)) => ExampleStatus::Failed {
            message: innermost_message(&*error),
        },
        Err(payload) => ExampleStatus::Failed {
            message: panic_message(payload.as_ref()),
        },
    };
    example.output = console.into_string();

    debug!(
        example = %example.name,
        exit_code = example.status.exit_code(),
        duration_us = example.duration.as_micros() as u64,
        "executed"
    );
}
