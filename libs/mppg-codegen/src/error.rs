//! Error types for code generation.

use mppg_eval::EvalError;
use mppg_parser::Diagnostic;
use thiserror::Error;

/// Result type for code generation.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Why a program could not be translated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    /// The program does not parse; nothing is generated.
    #[error("{} syntax error(s), first at line {}", .diagnostics.len(), first_line(.diagnostics))]
    Syntax { diagnostics: Vec<Diagnostic> },

    /// A statement does not resolve: unknown name or invalid operand types.
    #[error("line {line}: {source}")]
    Statement {
        line: usize,
        #[source]
        source: EvalError,
    },

    /// An expression shape with no Rust rendering.
    #[error("cannot emit {what}")]
    Unsupported { what: String },
}

impl CodegenError {
    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported { what: what.into() }
    }
}

fn first_line(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.first().map_or(0, |diagnostic| diagnostic.line)
}
