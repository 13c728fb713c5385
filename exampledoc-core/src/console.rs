//! Console - Output Capture Sink
//!
//! Every example receives a `&mut Console` instead of writing to the process
//! standard output. Text written through it becomes the example's captured
//! output.

use std::fmt;

/// In-memory text sink handed to an example's entry operation.
///
/// `write!`/`writeln!` work directly on a `Console` without importing any
/// trait, and never fail:
///
/// ```
/// use exampledoc_core::Console;
///
/// let mut out = Console::new();
/// writeln!(out, "Squaring {}...", 2);
/// out.println("...the result is 4.");
/// assert_eq!(out.contents(), "Squaring 2...\n...the result is 4.\n");
/// ```
#[derive(Debug, Default, Clone)]
pub struct Console {
    buffer: String,
}

impl Console {
    /// Create an empty console
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text without a line terminator
    pub fn print(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Append text followed by a line terminator
    pub fn println(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Append an empty line
    pub fn newline(&mut self) {
        self.buffer.push('\n');
    }

    /// Formatted write used by `write!` and `writeln!`.
    ///
    /// Shadows `fmt::Write::write_fmt` so callers need no trait import and no
    /// error handling.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        // Writing into a String cannot fail.
        let _ = fmt::Write::write_fmt(&mut self.buffer, args);
    }

    /// Everything written so far
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the console, returning the captured text
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl std::io::Write for Console {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
