//! Operations over arrays of integers

use crate::{OperationError, operate};

/// Apply a checked operation to every operand, failing on the first overflow
pub fn operate_all<F>(func: F, operands: &[i32]) -> Result<Vec<i32>, OperationError>
where
    F: Fn(i32) -> Option<i32>,
{
    if operands.is_empty() {
        return Err(OperationError::EmptyOperands);
    }
    operands
        .iter()
        .map(|&operand| operate(&func, operand))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operate_all() {
        let doubled = operate_all(|x| x.checked_mul(2), &[1, 2, 3]).unwrap();
        assert_eq!(doubled, vec![2, 4, 6]);
    }

    #[test]
    fn test_empty_operands() {
        assert_eq!(
            operate_all(|x| Some(x), &[]),
            Err(OperationError::EmptyOperands)
        );
    }

    #[test]
    fn test_first_overflow_wins() {
        assert_eq!(
            operate_all(|x| x.checked_mul(x), &[2, i32::MAX, i32::MIN]),
            Err(OperationError::Overflow { operand: i32::MAX })
        );
    }
}
