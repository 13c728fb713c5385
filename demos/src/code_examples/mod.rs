//! Documentation examples.
//!
//! Each example lives in the file its qualified name points to, relative to
//! `demos.code_examples`, so exampledoc can publish its source.

mod advanced;
mod squaring;
