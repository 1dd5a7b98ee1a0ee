//! # Environment
//!
//! Named, typed expressions in insertion order. A name keeps one binding;
//! storing again replaces it, subject to the overwrite and change-type
//! permissions.
//!
//! A deferred store (lazy evaluation) remembers the binding it replaced.
//! If the new expression fails when first evaluated, the name reads as if
//! the store had never happened, which is what an eager store does.
//!
//! ## Example
//!
//! ```rust
//! use mppg_eval::environment::{Environment, StorePermissions};
//! use mppg_eval::expression::Expression;
//! use nc_curves::Rational;
//!
//! let mut environment = Environment::new();
//! let two = Expression::number(Rational::from_integer(2));
//! environment.store("x", two.clone(), StorePermissions::default()).unwrap();
//! assert!(environment
//!     .store("x", two, StorePermissions { overwrite: false, change_type: false })
//!     .is_err());
//! ```

use crate::error::{EvalError, EvalResult};
use crate::expression::Expression;
use crate::value::ValueTag;
use config::constants::ExecutionConfig;
use indexmap::IndexMap;
use std::rc::Rc;
use tracing::debug;

/// What a store may replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePermissions {
    /// Replace a binding of the same type.
    pub overwrite: bool,
    /// Replace a binding of the other type.
    pub change_type: bool,
}

impl Default for StorePermissions {
    fn default() -> Self {
        Self {
            overwrite: true,
            change_type: true,
        }
    }
}

impl From<&ExecutionConfig> for StorePermissions {
    fn from(config: &ExecutionConfig) -> Self {
        Self {
            overwrite: config.allow_overwrite,
            change_type: config.allow_type_change,
        }
    }
}

/// One name's binding.
#[derive(Debug, Clone)]
enum Binding {
    /// Stored after evaluating successfully, or stored as is.
    Settled(Rc<Expression>),
    /// Stored unevaluated over `previous`, if the name had a binding.
    Deferred {
        expression: Rc<Expression>,
        previous: Option<Box<Binding>>,
    },
}

impl Binding {
    /// The expression the name stands for; `None` when a deferred store
    /// over a new name fails.
    fn effective(&self) -> Option<Rc<Expression>> {
        match self {
            Self::Settled(expression) => Some(Rc::clone(expression)),
            Self::Deferred {
                expression,
                previous,
            } => match expression.force() {
                Ok(_) => Some(Rc::clone(expression)),
                Err(error) => {
                    debug!(%error, "deferred binding failed, reading the previous one");
                    previous.as_ref().and_then(|binding| binding.effective())
                }
            },
        }
    }
}

/// Variable bindings of a running program.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: IndexMap<String, Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `expression`.
    pub fn store(
        &mut self,
        name: &str,
        expression: Rc<Expression>,
        permissions: StorePermissions,
    ) -> EvalResult<()> {
        self.check_permissions(name, &expression, permissions)?;
        debug!(name, tag = %expression.tag(), "stored variable");
        self.bindings
            .insert(name.to_string(), Binding::Settled(expression));
        Ok(())
    }

    /// Bind `name` to an unevaluated `expression`, keeping the current
    /// binding for when it fails.
    pub fn store_deferred(
        &mut self,
        name: &str,
        expression: Rc<Expression>,
        permissions: StorePermissions,
    ) -> EvalResult<()> {
        self.check_permissions(name, &expression, permissions)?;
        debug!(name, tag = %expression.tag(), "stored deferred variable");
        let previous = self.bindings.get(name).cloned().map(Box::new);
        self.bindings.insert(
            name.to_string(),
            Binding::Deferred {
                expression,
                previous,
            },
        );
        Ok(())
    }

    fn check_permissions(
        &self,
        name: &str,
        expression: &Expression,
        permissions: StorePermissions,
    ) -> EvalResult<()> {
        let Some(existing) = self.bindings.get(name).and_then(Binding::effective) else {
            return Ok(());
        };
        let (from, to) = (existing.tag(), expression.tag());
        if from != to && !permissions.change_type {
            return Err(EvalError::TypeChangeNotAllowed {
                name: name.to_string(),
                from,
                to,
            });
        }
        if from == to && !permissions.overwrite {
            return Err(EvalError::OverwriteNotAllowed {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> EvalResult<Rc<Expression>> {
        self.bindings
            .get(name)
            .and_then(Binding::effective)
            .ok_or_else(|| EvalError::VariableNotFound {
                name: name.to_string(),
            })
    }

    pub fn tag_of(&self, name: &str) -> Option<ValueTag> {
        self.lookup(name).ok().map(|expression| expression.tag())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Names in first-assignment order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
