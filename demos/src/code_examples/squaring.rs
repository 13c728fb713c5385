use exampledoc::prelude::*;
use exampledoc_demos::operate;

#[example(name = "demos.code_examples.squaring")]
fn squaring(out: &mut Console) {
    // Define an operator that squares its operand
    let square = |operand: i32| operand.checked_mul(operand);

    // Define an operand
    let integer = 2;

    // Operate on it
    writeln!(out, "Squaring {}...", integer);
    match operate(square, integer) {
        Ok(result) => writeln!(out, "...the result is {}.", result),
        Err(e) => writeln!(out, "...failed: {}", e),
    }

    // Check that overflowing results are rejected
    if let Err(e) = operate(square, i32::MAX) {
        writeln!(out);
        writeln!(out, "Cannot square {}:", i32::MAX);
        writeln!(out, "{}", e);
    }
}
