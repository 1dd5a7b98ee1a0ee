//! # Statement Generator
//!
//! Walks a parsed program statement by statement, resolving each one
//! against a shadow environment exactly as the interpreter would, and
//! records what to emit. Nothing is ever forced: lazy and eager programs
//! translate to the same source.
//!
//! Every assignment is first recorded as a declaration. [`cleanup`] then
//! turns each later declaration of an already declared name into a plain
//! reassignment, unless the name changes type, in which case the new
//! `let mut` shadows the old binding.

use crate::emitter::{comparison, owned, receiver, rust_identifier, rust_type};
use crate::error::{CodegenError, CodegenResult};
use config::constants::{CODEGEN_COMMENT_MARKER, CODEGEN_CURVE_CRATE, CODEGEN_INDENT};
use mppg_eval::environment::{Environment, StorePermissions};
use mppg_eval::expression::dispatch::{dispatch_comparison, Promotion};
use mppg_eval::expression::ExpressionNode;
use mppg_eval::statement::{Statement, StatementKind};
use mppg_eval::{EvalError, EvalResult, Expression, Program, ValueTag};
use mppg_parser::{CstNode, NodeKind};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, info};

// =============================================================================
// GENERATED LINES
// =============================================================================

/// One emitted line, before cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `name := expression`; rendered by [`cleanup`].
    Declaration {
        name: String,
        tag: ValueTag,
        value: String,
    },
    Code(String),
    Comment(String),
    Blank,
}

/// A line of the body of `main`, with the source comment attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLine {
    pub kind: LineKind,
    pub comment: Option<String>,
}

impl GeneratedLine {
    fn new(kind: LineKind) -> Self {
        Self {
            kind,
            comment: None,
        }
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Translates statements into [`GeneratedLine`]s.
#[derive(Default)]
pub struct Generator {
    environment: Environment,
    lines: Vec<GeneratedLine>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate every statement of `program`.
    pub fn program(mut self, program: &Program) -> CodegenResult<Vec<GeneratedLine>> {
        if program.has_syntax_errors() {
            return Err(CodegenError::Syntax {
                diagnostics: program.diagnostics().to_vec(),
            });
        }
        for statement in program.statements() {
            let mut line = GeneratedLine::new(self.statement(statement)?);
            line.comment = statement.inline_comment().map(str::to_string);
            self.lines.push(line);
        }
        info!(lines = self.lines.len(), "generated program");
        Ok(self.lines)
    }

    fn statement(&mut self, statement: &Statement) -> CodegenResult<LineKind> {
        debug!(line = statement.line(), kind = ?statement.kind(), "generating statement");
        let at_line = |source: EvalError| CodegenError::Statement {
            line: statement.line(),
            source,
        };

        let kind = match statement.kind() {
            StatementKind::Empty => LineKind::Blank,
            StatementKind::Comment => LineKind::Comment(statement.text().to_string()),
            StatementKind::Invalid { message } => {
                return Err(at_line(EvalError::Syntax {
                    line: statement.line(),
                    message: message.clone(),
                }))
            }

            StatementKind::Assignment { name, expression } => {
                let expression = self.resolve(expression).map_err(at_line)?;
                let value = owned(&expression)?;
                let tag = expression.tag();
                self.environment
                    .store(name, expression, StorePermissions::default())
                    .map_err(at_line)?;
                LineKind::Declaration {
                    name: name.clone(),
                    tag,
                    value,
                }
            }

            StatementKind::Expression(expression) => {
                let expression = self.resolve(expression).map_err(at_line)?;
                LineKind::Code(format!("println!(\"{{}}\", {});", receiver(&expression)?))
            }

            StatementKind::Assertion {
                left,
                operator,
                right,
            } => {
                let left = self.resolve(left).map_err(at_line)?;
                let right = self.resolve(right).map_err(at_line)?;
                let (left, right) = match dispatch_comparison(left.tag(), right.tag()) {
                    Promotion::None => (left, right),
                    Promotion::Left => (left.promoted(), right),
                    Promotion::Right => (left, right.promoted()),
                };
                LineKind::Code(format!(
                    "println!(\"{{}}\", {});",
                    comparison(&left, *operator, &right)?
                ))
            }

            StatementKind::PrintExpression { name } => {
                let expression = self.environment.lookup(name).map_err(at_line)?;
                let canonical = format!("{} := {}", name, expression);
                LineKind::Code(format!("println!(\"{{}}\", {:?});", canonical))
            }

            StatementKind::Plot { arguments } => {
                LineKind::Comment(format!("// plot {}", self.plotted(arguments).map_err(at_line)?))
            }
        };
        Ok(kind)
    }

    fn resolve(&self, syntax: &CstNode) -> EvalResult<Rc<Expression>> {
        ExpressionNode::new(syntax).resolve(&self.environment)
    }

    /// Canonical text of the plotted expressions, resolved to check them.
    fn plotted(&self, arguments: &[CstNode]) -> EvalResult<String> {
        let names = arguments
            .iter()
            .filter(|argument| argument.kind != NodeKind::PlotSetting)
            .map(|syntax| self.resolve(syntax).map(|expression| expression.to_string()))
            .collect::<EvalResult<Vec<_>>>()?;
        Ok(names.join(", "))
    }
}

// =============================================================================
// CLEANUP
// =============================================================================

/// Render lines, declaring each name once per type.
///
/// ## Example
///
/// ```rust
/// use mppg_codegen::generator::{cleanup, GeneratedLine, LineKind};
/// use mppg_eval::ValueTag;
///
/// let declare = |value: &str| GeneratedLine {
///     kind: LineKind::Declaration {
///         name: "x".into(),
///         tag: ValueTag::Number,
///         value: value.into(),
///     },
///     comment: None,
/// };
/// let lines = cleanup(&[declare("a"), declare("b")]);
/// assert_eq!(lines, ["let mut x: Rational = a;", "x = b;"]);
/// ```
pub fn cleanup(lines: &[GeneratedLine]) -> Vec<String> {
    let mut declared: HashMap<&str, ValueTag> = HashMap::new();
    lines
        .iter()
        .map(|line| {
            let code = match &line.kind {
                LineKind::Declaration { name, tag, value } => {
                    let identifier = rust_identifier(name);
                    if declared.insert(name.as_str(), *tag) == Some(*tag) {
                        format!("{} = {};", identifier, value)
                    } else {
                        format!("let mut {}: {} = {};", identifier, rust_type(*tag), value)
                    }
                }
                LineKind::Code(code) => code.clone(),
                LineKind::Comment(text) => comment(text),
                LineKind::Blank => String::new(),
            };
            match &line.comment {
                Some(text) if code.is_empty() => comment(text),
                Some(text) => format!("{} {}", code, comment(text)),
                None => code,
            }
        })
        .collect()
}

/// A source comment with the generated-code marker.
fn comment(text: &str) -> String {
    let body = text.strip_prefix("//").unwrap_or(text);
    format!("{}{}", CODEGEN_COMMENT_MARKER, body)
}

/// Wrap a cleaned body in a complete Rust program.
pub fn wrap_main(body: Vec<String>) -> Vec<String> {
    let mut lines = vec![
        format!("use {}::{{Curve, Element, Rational}};", CODEGEN_CURVE_CRATE),
        String::new(),
        "fn main() -> Result<(), Box<dyn std::error::Error>> {".to_string(),
    ];
    lines.extend(body.into_iter().map(|line| {
        if line.is_empty() {
            line
        } else {
            format!("{}{}", CODEGEN_INDENT, line)
        }
    }));
    lines.push(format!("{}Ok(())", CODEGEN_INDENT));
    lines.push("}".to_string());
    lines
}
