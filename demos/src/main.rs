//! Runs the documentation examples of `exampledoc-demos`.

mod code_examples;

fn main() -> anyhow::Result<()> {
    exampledoc::run()
}
