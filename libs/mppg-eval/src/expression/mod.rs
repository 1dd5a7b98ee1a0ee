//! # Expressions
//!
//! A resolved expression is a typed tree of literals, variable references and
//! applied operations. Its type is fixed at resolution, its value computed
//! at most once, on the first [`Expression::force`].
//!
//! Variables bind the expression stored under the name when they were
//! resolved, so later reassignments never reach back into earlier values.
//!
//! ## Module Structure
//!
//! - `operation` - what each applied node computes, and its spelling
//! - `dispatch` - operand-type tables for overloaded operators
//! - `resolver` - syntax to typed expression
//!
//! ## Example
//!
//! ```rust
//! use mppg_eval::environment::Environment;
//! use mppg_eval::expression::resolve;
//!
//! let cst = mppg_parser::parse("ratency(2, 1) * 3");
//! let syntax = &cst.root.children[0].children[0];
//! let expression = resolve(syntax, &Environment::new()).unwrap();
//! assert_eq!(expression.to_string(), "ratency(2, 1) * 3");
//! assert!(!expression.is_forced());
//! expression.force().unwrap();
//! assert!(expression.is_forced());
//! ```

pub mod dispatch;
mod operation;
mod resolver;

#[cfg(test)]
mod tests;

pub use operation::{Limit, Notation, Operation};
pub use resolver::{resolve, ExpressionNode};

use crate::error::{EvalError, EvalResult};
use crate::value::{Value, ValueTag};
use nc_curves::Rational;
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

// =============================================================================
// EXPRESSION
// =============================================================================

/// Shape of an expression.
#[derive(Debug)]
pub enum ExpressionKind {
    Literal(Value),
    Variable {
        name: String,
        bound: Rc<Expression>,
    },
    Apply {
        operation: Operation,
        operands: Vec<Rc<Expression>>,
    },
}

/// A typed expression with a memoized value.
#[derive(Debug)]
pub struct Expression {
    kind: ExpressionKind,
    tag: ValueTag,
    cache: OnceCell<Value>,
}

impl Expression {
    pub fn literal(value: Value) -> Rc<Self> {
        Rc::new(Self {
            tag: value.tag(),
            kind: ExpressionKind::Literal(value),
            cache: OnceCell::new(),
        })
    }

    pub fn number(number: Rational) -> Rc<Self> {
        Self::literal(Value::Number(number))
    }

    /// Reference to `bound` under `name`.
    pub fn variable(name: impl Into<String>, bound: Rc<Expression>) -> Rc<Self> {
        Rc::new(Self {
            tag: bound.tag,
            kind: ExpressionKind::Variable {
                name: name.into(),
                bound,
            },
            cache: OnceCell::new(),
        })
    }

    pub fn apply(operation: Operation, operands: Vec<Rc<Expression>>) -> Rc<Self> {
        Rc::new(Self {
            tag: operation.result_tag(),
            kind: ExpressionKind::Apply {
                operation,
                operands,
            },
            cache: OnceCell::new(),
        })
    }

    /// This expression as a curve: numbers become constant curves.
    pub fn promoted(self: &Rc<Self>) -> Rc<Self> {
        match self.tag {
            ValueTag::Number => Self::apply(Operation::Constant, vec![Rc::clone(self)]),
            ValueTag::Function => Rc::clone(self),
        }
    }

    pub fn kind(&self) -> &ExpressionKind {
        &self.kind
    }

    pub fn tag(&self) -> ValueTag {
        self.tag
    }

    /// Whether the value has been computed.
    pub fn is_forced(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Compute the value, or return the one computed before.
    ///
    /// A failure is not cached: forcing again recomputes.
    pub fn force(&self) -> EvalResult<Value> {
        if let Some(value) = self.cache.get() {
            return Ok(value.clone());
        }
        let value = match &self.kind {
            ExpressionKind::Literal(value) => value.clone(),
            ExpressionKind::Variable { bound, .. } => bound.force()?,
            ExpressionKind::Apply {
                operation,
                operands,
            } => {
                let values = operands
                    .iter()
                    .map(|operand| operand.force())
                    .collect::<EvalResult<Vec<_>>>()?;
                trace!(?operation, "applying");
                operation.apply(&values)?
            }
        };
        if value.tag() != self.tag {
            return Err(EvalError::TypeMismatch {
                expected: self.tag,
                found: value.tag(),
            });
        }
        Ok(self.cache.get_or_init(|| value).clone())
    }

    /// Infix operands that need parentheses when nested.
    fn is_compound(&self) -> bool {
        match &self.kind {
            ExpressionKind::Apply {
                operation,
                operands,
            } => match operation.notation() {
                Notation::Infix(_) | Notation::Prefix(_) => true,
                Notation::Implicit => operands.iter().any(|operand| operand.is_compound()),
                Notation::Call(_) | Notation::ValueAt(_) => false,
            },
            _ => false,
        }
    }
}

// =============================================================================
// CANONICAL FORM
// =============================================================================

struct Operand<'a>(&'a Expression);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_compound() {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Canonical MPPG text; re-parses to an equivalent expression.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (operation, operands) = match &self.kind {
            ExpressionKind::Literal(value) => return write!(f, "{}", value),
            ExpressionKind::Variable { name, .. } => return f.write_str(name),
            ExpressionKind::Apply {
                operation,
                operands,
            } => (operation, operands),
        };
        match (operation.notation(), operands.as_slice()) {
            (Notation::Infix(symbol), [left, right]) => {
                write!(f, "{} {} {}", Operand(left), symbol, Operand(right))
            }
            (Notation::Prefix(symbol), [operand]) => write!(f, "{}{}", symbol, Operand(operand)),
            (Notation::Implicit, [operand]) => write!(f, "{}", operand),
            (Notation::ValueAt(limit), [function, time]) => {
                write!(f, "{}({}{})", function, time, limit.suffix())
            }
            (Notation::Call(name), arguments) => {
                write!(f, "{}(", name)?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                f.write_str(")")
            }
            _ => write!(f, "<malformed {:?}>", operation),
        }
    }
}

// =============================================================================
// EVALUATION STRATEGY
// =============================================================================

/// When assigned expressions are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvaluationStrategy {
    /// At assignment.
    #[default]
    Eager,
    /// On first use: a print, plot or assertion, or an expression that
    /// reads the name.
    Lazy,
}

impl EvaluationStrategy {
    pub fn from_lazy(lazy: bool) -> Self {
        if lazy {
            Self::Lazy
        } else {
            Self::Eager
        }
    }

    /// Bring an assigned expression to the state it is stored in.
    pub fn settle(self, expression: &Expression) -> EvalResult<()> {
        match self {
            Self::Eager => expression.force().map(|_| ()),
            Self::Lazy => Ok(()),
        }
    }
}
