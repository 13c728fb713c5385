use exampledoc::prelude::*;
use exampledoc_demos::OperationError;
use exampledoc_demos::advanced::operate_all;

#[example(name = "demos.code_examples.advanced.squaring_all")]
fn squaring_all(out: &mut Console) -> Result<(), OperationError> {
    // Define an operator that squares its operand
    let square = |operand: i32| operand.checked_mul(operand);

    // Define an array of operands
    let operands = [2, 4, 8];

    // Operate on it
    let results = operate_all(square, &operands)?;

    // Show results
    for (operand, result) in operands.iter().zip(&results) {
        writeln!(out, "The result of squaring {} is {}.", operand, result);
    }

    // Check that an empty array of operands is rejected
    if let Err(e) = operate_all(square, &[]) {
        writeln!(out);
        writeln!(out, "Cannot operate on an empty array:");
        writeln!(out, "{}", e);
    }

    Ok(())
}
