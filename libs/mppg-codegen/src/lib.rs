//! # MPPG Codegen
//!
//! Translates an MPPG program into a Rust program that performs the same
//! computations through `nc_curves` and prints what the interpreter would.
//!
//! ## Architecture
//!
//! ```text
//! Program (mppg-eval) → Generator → GeneratedLine → cleanup → wrap_main
//!                          │
//!                  resolver + dispatch (static, never forced)
//! ```
//!
//! ## Example
//!
//! ```rust
//! let lines = mppg_codegen::generate("f := ratency(1, 2)\nx := 3/2\nf * x").unwrap();
//! assert!(lines.contains(&"    let mut x: Rational = Rational::new(3, 2)?;".to_string()));
//! assert!(lines.contains(&"    println!(\"{}\", f.scale(&x)?);".to_string()));
//! ```

pub mod emitter;
pub mod error;
pub mod generator;

#[cfg(test)]
mod tests;

// Re-export public API
pub use error::{CodegenError, CodegenResult};
pub use generator::{cleanup, wrap_main, GeneratedLine, Generator, LineKind};

use mppg_eval::Program;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Translate `program_text` into the lines of a Rust source file.
///
/// ## Errors
///
/// [`CodegenError::Syntax`] when any line fails to parse, and
/// [`CodegenError::Statement`] when a statement does not resolve.
pub fn generate(program_text: &str) -> CodegenResult<Vec<String>> {
    let program = Program::from_text(program_text);
    let lines = Generator::new().program(&program)?;
    Ok(wrap_main(cleanup(&lines)))
}
