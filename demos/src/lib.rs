//! exampledoc Demos
//!
//! A tiny integer-operation library whose documentation examples are run
//! by exampledoc. This crate is not published; it exists to show the whole
//! pipeline on a real code base.
//!
//! Run the examples and regenerate their artifacts with:
//! ```sh
//! cargo run -p exampledoc-demos -- --config demos/exampledoc.toml
//! ```
//!
//! ## Examples
//!
//! | Example | Source |
//! |---------|--------|
//! | `demos.code_examples.squaring` | `src/code_examples/squaring.rs` |
//! | `demos.code_examples.advanced.squaring_all` | `src/code_examples/advanced/squaring_all.rs` |
//! | `demos.code_examples.advanced.running_total` | `src/code_examples/advanced/running_total.rs` |

pub mod advanced;

/// Errors raised by integer operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    /// The operation has no result representable as an `i32`
    #[error("the operation overflows for operand {operand}")]
    Overflow {
        /// Offending operand
        operand: i32,
    },

    /// No operands were supplied
    #[error("the array of operands is empty")]
    EmptyOperands,
}

/// Apply a checked operation to an operand.
///
/// `func` returns `None` when the result does not fit in an `i32`.
pub fn operate<F>(func: F, operand: i32) -> Result<i32, OperationError>
where
    F: Fn(i32) -> Option<i32>,
{
    func(operand).ok_or(OperationError::Overflow { operand })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(operand: i32) -> Option<i32> {
        operand.checked_mul(operand)
    }

    #[test]
    fn test_operate() {
        assert_eq!(operate(square, 2), Ok(4));
        assert_eq!(operate(square, -3), Ok(9));
    }

    #[test]
    fn test_operate_overflow() {
        assert_eq!(
            operate(square, i32::MAX),
            Err(OperationError::Overflow { operand: i32::MAX })
        );
    }
}
