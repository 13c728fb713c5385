use exampledoc::prelude::*;
use exampledoc_demos::operate;

#[example(name = "demos.code_examples.advanced.running_total")]
#[derive(Default)]
struct RunningTotal {
    total: i32,
}

impl Example for RunningTotal {
    fn main(&mut self, out: &mut Console) -> ExampleResult {
        // Accumulate operands, one checked addition at a time
        for operand in [10, 20, 30] {
            let total = self.total;
            self.total = operate(|x| x.checked_add(total), operand)?;
            writeln!(out, "After adding {} the total is {}.", operand, self.total);
        }
        Ok(())
    }
}
