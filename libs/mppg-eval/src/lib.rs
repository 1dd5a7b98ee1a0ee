//! # MPPG Eval
//!
//! Resolution and execution of MPPG programs over exact curves.
//!
//! ## Architecture
//!
//! ```text
//! Source → mppg-parser (CST) → Statement → ExpressionNode → Expression → Value
//!                                  │              │
//!                              Environment    dispatch / constructor
//! ```
//!
//! ## Example
//!
//! ```rust
//! use config::constants::ExecutionConfig;
//! use mppg_eval::execute;
//!
//! let source = "f := ratency(1, 2)\nx := 3\nf * x\nx * x\nprintExpression(f)";
//! let outputs = execute(source, &ExecutionConfig::default()).unwrap();
//! let printed: Vec<_> = outputs
//!     .iter()
//!     .filter(|output| output.is_explicit_print())
//!     .map(|output| output.text())
//!     .collect();
//! assert_eq!(printed[1], "9");
//! assert_eq!(printed[2], "f := ratency(1, 2)");
//! ```

pub mod constructor;
pub mod environment;
pub mod error;
pub mod expression;
pub mod formatter;
pub mod literal;
pub mod plot;
pub mod program;
pub mod statement;
pub mod value;

// Re-export public API
pub use environment::{Environment, StorePermissions};
pub use error::{ErrorKind, EvalError, EvalResult};
pub use expression::{EvaluationStrategy, Expression, ExpressionNode};
pub use formatter::{StatementFormatter, TranscriptFormatter};
pub use plot::{PlotRequest, PlotSettings, Plotter};
pub use program::{ErrorPolicy, Program};
pub use statement::{Statement, StatementOutput};
pub use value::{Value, ValueTag};

use config::constants::ExecutionConfig;
use formatter::SilentFormatter;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Run a whole program under `config`, without plotting.
///
/// Returns the output of every statement, or the first error when
/// `config.stop_on_error` is set.
pub fn execute(source: &str, config: &ExecutionConfig) -> EvalResult<Vec<StatementOutput>> {
    Program::from_text(source)
        .with_permissions(StorePermissions::from(config))
        .run(
            &mut SilentFormatter,
            EvaluationStrategy::from_lazy(config.lazy),
            ErrorPolicy::from_stop_on_error(config.stop_on_error),
        )
}
