//! # Statements
//!
//! One statement per source line. A statement keeps its own syntax and
//! creates fresh expression nodes on every execution, so re-running it sees
//! the environment as it is at that time.
//!
//! ## Example
//!
//! ```rust
//! use mppg_eval::environment::{Environment, StorePermissions};
//! use mppg_eval::expression::EvaluationStrategy;
//! use mppg_eval::plot::NullPlotter;
//! use mppg_eval::statement::{ExecutionContext, Statement};
//!
//! let cst = mppg_parser::parse("x := 3/2 + 1/2");
//! let statement = Statement::from_syntax(&cst.root.children[0], None);
//! let mut environment = Environment::new();
//! let mut plotter = NullPlotter;
//! let mut context = ExecutionContext {
//!     environment: &mut environment,
//!     strategy: EvaluationStrategy::Eager,
//!     permissions: StorePermissions::default(),
//!     plotter: &mut plotter,
//! };
//! assert_eq!(statement.execute(&mut context).unwrap(), "x : Number");
//! ```

mod output;


pub use output::StatementOutput;

use crate::environment::{Environment, StorePermissions};
use crate::error::{EvalError, EvalResult};
use crate::expression::dispatch::{dispatch_comparison, ComparisonOperator, Promotion};
use crate::expression::{EvaluationStrategy, ExpressionNode};
use crate::plot::{PlotRequest, PlotSettings, PlottedCurve, Plotter};
use mppg_parser::{CstNode, NodeKind};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, warn};

// =============================================================================
// STATEMENT
// =============================================================================

/// What a statement does, with the syntax it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Empty,
    Comment,
    Assignment {
        name: String,
        expression: CstNode,
    },
    Expression(CstNode),
    Assertion {
        left: CstNode,
        operator: ComparisonOperator,
        right: CstNode,
    },
    PrintExpression {
        name: String,
    },
    Plot {
        arguments: Vec<CstNode>,
    },
    /// A line that did not parse; executing it raises the syntax error.
    Invalid {
        message: String,
    },
}

/// One line of a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// 1-based source line.
    line: usize,
    text: String,
    inline_comment: Option<String>,
    kind: StatementKind,
}

impl Statement {
    /// Build from a statement node of the syntax tree.
    ///
    /// `syntax_error` is the parser's message for an `Error` node.
    pub fn from_syntax(node: &CstNode, syntax_error: Option<&str>) -> Self {
        let kind = match statement_kind(node) {
            Ok(kind) => kind,
            Err(error) => StatementKind::Invalid {
                message: error.to_string(),
            },
        };
        let kind = match (kind, syntax_error) {
            (StatementKind::Invalid { .. }, Some(message)) => StatementKind::Invalid {
                message: message.to_string(),
            },
            (kind, _) => kind,
        };
        Self {
            line: node.span.start.line + 1,
            text: node.text_or_empty().to_string(),
            inline_comment: node.inline_comment().map(str::to_string),
            kind,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Source text, without the inline comment.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn inline_comment(&self) -> Option<&str> {
        self.inline_comment.as_deref()
    }

    pub fn kind(&self) -> &StatementKind {
        &self.kind
    }

    /// Execute and return the rendered result.
    pub fn execute(&self, context: &mut ExecutionContext<'_>) -> EvalResult<String> {
        self.execute_to_output(context)
            .map(|output| output.text().to_string())
    }

    /// Execute against the context's environment.
    pub fn execute_to_output(
        &self,
        context: &mut ExecutionContext<'_>,
    ) -> EvalResult<StatementOutput> {
        let statement = self.text.clone();
        let output = match &self.kind {
            StatementKind::Empty | StatementKind::Comment => StatementOutput::Plain { statement },

            StatementKind::Invalid { message } => {
                return Err(EvalError::Syntax {
                    line: self.line,
                    message: message.clone(),
                })
            }

            StatementKind::Assignment { name, expression } => {
                let expression = ExpressionNode::new(expression).resolve(context.environment)?;
                context.strategy.settle(&expression)?;
                let tag = expression.tag();
                let environment = &mut *context.environment;
                match context.strategy {
                    EvaluationStrategy::Eager => {
                        environment.store(name, expression, context.permissions)?
                    }
                    EvaluationStrategy::Lazy => {
                        environment.store_deferred(name, expression, context.permissions)?
                    }
                }
                StatementOutput::Assignment {
                    statement,
                    text: format!("{} : {}", name, tag),
                    name: name.clone(),
                    tag,
                }
            }

            StatementKind::Expression(expression) => {
                let value = ExpressionNode::new(expression)
                    .resolve(context.environment)?
                    .force()?;
                StatementOutput::Expression {
                    statement,
                    text: value.to_string(),
                    value,
                }
            }

            StatementKind::Assertion {
                left,
                operator,
                right,
            } => {
                let left = ExpressionNode::new(left).resolve(context.environment)?;
                let right = ExpressionNode::new(right).resolve(context.environment)?;
                let (left, right) = match dispatch_comparison(left.tag(), right.tag()) {
                    Promotion::None => (left, right),
                    Promotion::Left => (left.promoted(), right),
                    Promotion::Right => (left, right.promoted()),
                };
                let started = Instant::now();
                let result = operator.compare(&left.force()?, &right.force()?)?;
                let elapsed = started.elapsed();
                debug!(line = self.line, result, ?elapsed, "assertion evaluated");
                StatementOutput::Assertion {
                    statement,
                    text: result.to_string(),
                    result,
                    elapsed,
                }
            }

            StatementKind::PrintExpression { name } => {
                let expression = context.environment.lookup(name)?;
                StatementOutput::PrintExpression {
                    statement,
                    text: format!("{} := {}", name, expression),
                    expression,
                }
            }

            StatementKind::Plot { arguments } => self.plot(statement, arguments, context)?,
        };
        Ok(output)
    }

    fn plot(
        &self,
        statement: String,
        arguments: &[CstNode],
        context: &mut ExecutionContext<'_>,
    ) -> EvalResult<StatementOutput> {
        let (settings, expressions): (Vec<&CstNode>, Vec<&CstNode>) = arguments
            .iter()
            .partition(|argument| argument.kind == NodeKind::PlotSetting);
        let settings = PlotSettings::from_nodes(&settings)?;

        let mut curves = Vec::with_capacity(expressions.len());
        for syntax in expressions {
            let expression = ExpressionNode::new(syntax).resolve(context.environment)?;
            let value = expression.promoted().force()?;
            curves.push(PlottedCurve {
                name: expression.to_string(),
                curve: Rc::clone(value.as_curve()?),
            });
        }
        let request = PlotRequest { curves, settings };

        let (text, error) = match context.plotter.plot(&request) {
            Ok(()) => (
                format!(
                    "plotted {} to {}",
                    request.names().collect::<Vec<_>>().join(", "),
                    request.settings.output
                ),
                None,
            ),
            Err(reason) => {
                warn!(line = self.line, %reason, "plot failed");
                let error = EvalError::Plot { reason };
                (format!("{}: {}", error.kind(), error), Some(error))
            }
        };
        Ok(StatementOutput::Plot {
            statement,
            text,
            request,
            error,
        })
    }
}

fn statement_kind(node: &CstNode) -> EvalResult<StatementKind> {
    let child = |index: usize| {
        node.child(index).ok_or_else(|| {
            EvalError::malformed(format!("{:?} has no child {}", node.kind, index))
        })
    };
    let kind = match node.kind {
        NodeKind::Empty => StatementKind::Empty,
        NodeKind::Comment => StatementKind::Comment,
        NodeKind::Error => StatementKind::Invalid {
            message: format!("cannot parse '{}'", node.text_or_empty()),
        },
        NodeKind::Assignment => StatementKind::Assignment {
            name: child(0)?.text_or_empty().to_string(),
            expression: child(1)?.clone(),
        },
        NodeKind::ExpressionCommand => StatementKind::Expression(child(0)?.clone()),
        NodeKind::Assertion => {
            let symbol = child(1)?.text_or_empty();
            StatementKind::Assertion {
                left: child(0)?.clone(),
                operator: ComparisonOperator::from_symbol(symbol).ok_or_else(|| {
                    EvalError::malformed(format!("unknown comparison {}", symbol))
                })?,
                right: child(2)?.clone(),
            }
        }
        NodeKind::PrintExpression => StatementKind::PrintExpression {
            name: child(0)?.text_or_empty().to_string(),
        },
        NodeKind::Plot => StatementKind::Plot {
            arguments: node
                .children
                .iter()
                .filter(|argument| argument.kind != NodeKind::InlineComment)
                .cloned()
                .collect(),
        },
        other => {
            return Err(EvalError::malformed(format!(
                "{:?} is not a statement",
                other
            )))
        }
    };
    Ok(kind)
}

// =============================================================================
// EXECUTION CONTEXT
// =============================================================================

/// Everything a statement touches while it executes.
pub struct ExecutionContext<'a> {
    pub environment: &'a mut Environment,
    pub strategy: EvaluationStrategy,
    pub permissions: StorePermissions,
    pub plotter: &'a mut dyn Plotter,
}
