//! Syntax to typed expressions.
//!
//! Resolution looks names up, dispatches overloaded operators and builds
//! literal curves. It never forces a value.

use super::dispatch::{
    dispatch_binary, dispatch_call, dispatch_negation, dispatch_value_at, BinaryOperator,
    BinaryRule, Promotion,
};
use super::operation::Limit;
use super::Expression;
use crate::constructor::curve_literal;
use crate::environment::Environment;
use crate::error::{EvalError, EvalResult};
use crate::literal::parse_number;
use crate::value::{NodeTag, Value, ValueTag};
use mppg_parser::{Builtin, CstNode, NodeKind};
use std::cell::OnceCell;
use std::rc::Rc;
use tracing::trace;

/// An expression in a statement, resolved on demand.
///
/// Its type is `Undetermined` until resolution succeeds.
#[derive(Debug)]
pub struct ExpressionNode<'a> {
    syntax: &'a CstNode,
    resolved: OnceCell<Rc<Expression>>,
}

impl<'a> ExpressionNode<'a> {
    pub fn new(syntax: &'a CstNode) -> Self {
        Self {
            syntax,
            resolved: OnceCell::new(),
        }
    }

    pub fn syntax(&self) -> &'a CstNode {
        self.syntax
    }

    pub fn tag(&self) -> NodeTag {
        self.resolved
            .get()
            .map_or(NodeTag::Undetermined, |expression| expression.tag().into())
    }

    /// Resolve against `environment`; later calls return the first result.
    pub fn resolve(&self, environment: &Environment) -> EvalResult<Rc<Expression>> {
        if let Some(expression) = self.resolved.get() {
            return Ok(Rc::clone(expression));
        }
        let expression = resolve(self.syntax, environment)?;
        Ok(Rc::clone(self.resolved.get_or_init(|| expression)))
    }
}

/// Resolve an expression node against the variables in `environment`.
pub fn resolve(node: &CstNode, environment: &Environment) -> EvalResult<Rc<Expression>> {
    match node.kind {
        NodeKind::NumberLiteral => Ok(Expression::number(parse_number(node)?)),
        NodeKind::VariableName => variable(node.text_or_empty(), environment),
        NodeKind::FunctionBinary | NodeKind::NumberBinary => binary(node, environment),
        NodeKind::Negation => {
            let operand = resolve(child(node, 0)?, environment)?;
            Ok(Expression::apply(
                dispatch_negation(operand.tag()),
                vec![operand],
            ))
        }
        NodeKind::FunctionCall | NodeKind::NumberCall => call(node, environment),
        NodeKind::ValueAt => value_at(node, environment),
        NodeKind::UltimatelyAffine | NodeKind::UltimatelyPseudoPeriodic => {
            Ok(Expression::literal(Value::function(curve_literal(node)?)))
        }
        other => Err(EvalError::malformed(format!(
            "{:?} is not an expression",
            other
        ))),
    }
}

fn child(node: &CstNode, index: usize) -> EvalResult<&CstNode> {
    node.child(index)
        .ok_or_else(|| EvalError::malformed(format!("{:?} has no child {}", node.kind, index)))
}

fn variable(name: &str, environment: &Environment) -> EvalResult<Rc<Expression>> {
    let bound = environment.lookup(name)?;
    Ok(Expression::variable(name, bound))
}

fn binary(node: &CstNode, environment: &Environment) -> EvalResult<Rc<Expression>> {
    let [left, operator, right] = node.children.as_slice() else {
        return Err(EvalError::malformed("a binary expression needs three children"));
    };
    let symbol = operator.text_or_empty();
    let operator = BinaryOperator::from_symbol(symbol)
        .ok_or_else(|| EvalError::malformed(format!("unknown operator {}", symbol)))?;
    let rule = BinaryRule::from_kind(node.kind)
        .ok_or_else(|| EvalError::malformed("not a binary expression"))?;

    let left = resolve(left, environment)?;
    let right = resolve(right, environment)?;
    let plan = dispatch_binary(operator, rule, left.tag(), right.tag()).ok_or_else(|| {
        EvalError::invalid(format!("{} {} {}", left.tag(), symbol, right.tag()))
    })?;
    trace!(
        operator = symbol,
        operation = ?plan.operation,
        reinterpreted = plan.reinterpreted,
        "dispatched binary operator"
    );

    let (left, right) = match plan.promotion {
        Promotion::None => (left, right),
        Promotion::Left => (left.promoted(), right),
        Promotion::Right => (left, right.promoted()),
    };
    let operands = if plan.swap {
        vec![right, left]
    } else {
        vec![left, right]
    };
    Ok(Expression::apply(plan.operation, operands))
}

fn call(node: &CstNode, environment: &Environment) -> EvalResult<Rc<Expression>> {
    let name = node.text_or_empty();
    let builtin = Builtin::from_name(name)
        .ok_or_else(|| EvalError::invalid(format!("unknown function {}", name)))?;
    let arguments = node
        .children
        .iter()
        .map(|argument| resolve(argument, environment))
        .collect::<EvalResult<Vec<_>>>()?;

    let tags: Vec<ValueTag> = arguments.iter().map(|argument| argument.tag()).collect();
    let promotions = dispatch_call(builtin, &tags).ok_or_else(|| {
        EvalError::invalid(format!(
            "{} expects ({}), got ({})",
            name,
            builtin
                .parameters()
                .iter()
                .map(|parameter| format!("{:?}", parameter))
                .collect::<Vec<_>>()
                .join(", "),
            tags.iter()
                .map(ValueTag::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let operands = arguments
        .into_iter()
        .zip(promotions)
        .map(|(argument, promote)| {
            if promote {
                argument.promoted()
            } else {
                argument
            }
        })
        .collect();
    Ok(Expression::apply(super::Operation::Builtin(builtin), operands))
}

/// Children: variable name, time expression, optional limit marker.
fn value_at(node: &CstNode, environment: &Environment) -> EvalResult<Rc<Expression>> {
    let function = variable(child(node, 0)?.text_or_empty(), environment)?;
    let time = resolve(child(node, 1)?, environment)?;
    let limit = match node.find_child(NodeKind::LimitMarker).map(CstNode::text_or_empty) {
        None => Limit::Exact,
        Some("-") => Limit::Left,
        Some("+") => Limit::Right,
        Some(other) => {
            return Err(EvalError::malformed(format!("unknown limit marker {}", other)))
        }
    };
    let operation = dispatch_value_at(limit, function.tag(), time.tag()).ok_or_else(|| {
        EvalError::invalid(format!(
            "cannot take the value of a {} at a {}",
            function.tag(),
            time.tag()
        ))
    })?;
    Ok(Expression::apply(operation, vec![function, time]))
}
