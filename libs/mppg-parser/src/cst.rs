//! # Concrete Syntax Tree (CST)
//!
//! CST types representing parsed MPPG source. Every line of the source maps
//! to exactly one statement child of the [`NodeKind::Program`] root, so the
//! statement index doubles as the 0-based line number.
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::cst::NodeKind;
//!
//! let cst = mppg_parser::parse("f := zero");
//! assert_eq!(cst.root.kind, NodeKind::Program);
//! assert_eq!(cst.root.children[0].kind, NodeKind::Assignment);
//! ```

use crate::error::ParseError;
use crate::span::Span;
use serde::{Deserialize, Serialize};

// =============================================================================
// CST
// =============================================================================

/// Concrete Syntax Tree result.
///
/// Contains the root node and any parse errors.
#[derive(Debug, Clone)]
pub struct Cst {
    /// Root node of the syntax tree.
    pub root: CstNode,
    /// Parse errors encountered.
    pub errors: Vec<ParseError>,
}

impl Cst {
    /// Create a new CST.
    pub fn new(root: CstNode, errors: Vec<ParseError>) -> Self {
        Self { root, errors }
    }

    /// Check if parsing was successful (no errors).
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// CST NODE
// =============================================================================

/// A node in the Concrete Syntax Tree.
///
/// Statement nodes carry their own source text (without the inline comment)
/// in `text`; terminals carry the token text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CstNode {
    /// Node type.
    pub kind: NodeKind,
    /// Source span.
    pub span: Span,
    /// Child nodes.
    pub children: Vec<CstNode>,
    /// Text content (for terminals and statements).
    pub text: Option<String>,
}

impl CstNode {
    /// Create a new CST node.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            text: None,
        }
    }

    /// Create node with text content.
    pub fn with_text(kind: NodeKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Create node with children.
    pub fn with_children(kind: NodeKind, span: Span, children: Vec<CstNode>) -> Self {
        Self {
            kind,
            span,
            children,
            text: None,
        }
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: CstNode) {
        self.children.push(child);
    }

    /// Get text content, or empty string if none.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Find first child with given kind.
    pub fn find_child(&self, kind: NodeKind) -> Option<&CstNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Find all children with given kind.
    pub fn find_children(&self, kind: NodeKind) -> Vec<&CstNode> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }

    /// Child at `index`, if present.
    pub fn child(&self, index: usize) -> Option<&CstNode> {
        self.children.get(index)
    }

    /// Inline comment attached to a statement node, if any.
    pub fn inline_comment(&self) -> Option<&str> {
        self.find_child(NodeKind::InlineComment).map(CstNode::text_or_empty)
    }

    /// Whether the node is number syntax: it can only denote a Number.
    ///
    /// Names are not number syntax; their type is only known from the
    /// environment.
    ///
    /// ## Example
    ///
    /// ```rust
    /// let cst = mppg_parser::parse("3/2 + 1/2\nf + 1");
    /// assert!(cst.root.children[0].children[0].is_number_syntax());
    /// assert!(!cst.root.children[1].children[0].is_number_syntax());
    /// ```
    pub fn is_number_syntax(&self) -> bool {
        match self.kind {
            NodeKind::NumberLiteral
            | NodeKind::NumberBinary
            | NodeKind::NumberCall
            | NodeKind::ValueAt => true,
            NodeKind::Negation => self.children.first().is_some_and(CstNode::is_number_syntax),
            _ => false,
        }
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

/// Types of CST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Top-level
    /// Root node containing one statement per line.
    Program,

    // Statements
    /// `name := expression`
    Assignment,
    /// Bare expression whose value is printed.
    ExpressionCommand,
    /// `assert(left cmp right)`
    Assertion,
    /// `printExpression(name)`
    PrintExpression,
    /// `plot(expressions, settings)`
    Plot,
    /// Line holding only a comment.
    Comment,
    /// Blank line.
    Empty,
    /// Line that failed to parse.
    Error,
    /// Comment trailing a statement on the same line.
    InlineComment,

    // Expressions
    /// Number literal like `3/2` or `+inf`.
    NumberLiteral,
    /// Reference to a variable.
    VariableName,
    /// Binary form with at least one operand that is not number syntax.
    FunctionBinary,
    /// Binary form whose operands are both number syntax.
    NumberBinary,
    /// Unary minus.
    Negation,
    /// Builtin call producing a Function.
    FunctionCall,
    /// Builtin call producing a Number (`hdev`, `vdev`).
    NumberCall,
    /// `f(t)`, `f(t^-)` or `f(t^+)`.
    ValueAt,
    /// `-` or `+` after `^` in a value-at form.
    LimitMarker,
    /// Binary operator spelling.
    Operator,
    /// Assertion comparison spelling.
    ComparisonOperator,

    // Curve literals
    /// `uaf(elements)`
    UltimatelyAffine,
    /// `upp(transient, period(...), increment, length)`
    UltimatelyPseudoPeriodic,
    /// Transient element list of a UPP literal.
    Transient,
    /// `period(elements)`
    Period,
    /// Explicit per-period increment of a UPP literal.
    Increment,
    /// Restated period length of a UPP literal.
    PeriodLength,
    /// `[t, v]`
    PointElement,
    /// `[(t1, v1) slope (t2, v2)[` and its bracket variants.
    SegmentElement,
    /// `(t, v)` inside a segment.
    Endpoint,
    /// Explicit segment slope.
    Slope,
    /// `[` or `]` bounding a segment.
    Bracket,

    // Plot arguments
    /// `key=value`, or a bare `browser`/`gui` flag.
    PlotSetting,
    /// String value of a plot setting.
    StringLiteral,
    /// `[a, b]` axis range.
    Range,
    /// `true` or `false`.
    BooleanLiteral,
}

impl NodeKind {
    /// Grammar rule name used in diagnostics.
    pub const fn rule_name(&self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Assignment => "assignment",
            Self::ExpressionCommand => "expression_command",
            Self::Assertion => "assertion",
            Self::PrintExpression => "print_expression",
            Self::Plot => "plot",
            Self::Comment => "comment",
            Self::Empty => "empty",
            Self::Error => "error",
            Self::InlineComment => "inline_comment",
            Self::NumberLiteral => "number_literal",
            Self::VariableName => "variable_name",
            Self::FunctionBinary => "function_binary",
            Self::NumberBinary => "number_binary",
            Self::Negation => "negation",
            Self::FunctionCall => "function_call",
            Self::NumberCall => "number_call",
            Self::ValueAt => "value_at",
            Self::LimitMarker => "limit_marker",
            Self::Operator => "operator",
            Self::ComparisonOperator => "comparison_operator",
            Self::UltimatelyAffine => "ultimately_affine",
            Self::UltimatelyPseudoPeriodic => "ultimately_pseudo_periodic",
            Self::Transient => "transient",
            Self::Period => "period",
            Self::Increment => "increment",
            Self::PeriodLength => "period_length",
            Self::PointElement => "point",
            Self::SegmentElement => "segment",
            Self::Endpoint => "endpoint",
            Self::Slope => "slope",
            Self::Bracket => "bracket",
            Self::PlotSetting => "plot_setting",
            Self::StringLiteral => "string_literal",
            Self::Range => "range",
            Self::BooleanLiteral => "boolean_literal",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cst_node_with_text() {
        let node = CstNode::with_text(NodeKind::VariableName, Span::from_bytes(0, 1), "f");
        assert_eq!(node.kind, NodeKind::VariableName);
        assert_eq!(node.text_or_empty(), "f");
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_cst_node_find_child() {
        let mut parent = CstNode::new(NodeKind::Assignment, Span::zero());
        parent.add_child(CstNode::with_text(NodeKind::VariableName, Span::zero(), "f"));
        parent.add_child(CstNode::with_text(NodeKind::InlineComment, Span::zero(), "// c"));

        assert!(parent.find_child(NodeKind::VariableName).is_some());
        assert!(parent.find_child(NodeKind::NumberLiteral).is_none());
        assert_eq!(parent.inline_comment(), Some("// c"));
    }

    #[test]
    fn test_negation_number_syntax() {
        let number = CstNode::with_text(NodeKind::NumberLiteral, Span::zero(), "2");
        let name = CstNode::with_text(NodeKind::VariableName, Span::zero(), "x");
        let negated_number = CstNode::with_children(NodeKind::Negation, Span::zero(), vec![number]);
        let negated_name = CstNode::with_children(NodeKind::Negation, Span::zero(), vec![name]);
        assert!(negated_number.is_number_syntax());
        assert!(!negated_name.is_number_syntax());
    }

    #[test]
    fn test_node_kind_rule_name() {
        assert_eq!(NodeKind::Assertion.rule_name(), "assertion");
        assert_eq!(NodeKind::SegmentElement.rule_name(), "segment");
    }

    #[test]
    fn test_node_kind_serializes_snake_case() {
        let json = serde_json::to_string(&NodeKind::UltimatelyPseudoPeriodic).unwrap();
        assert_eq!(json, "\"ultimately_pseudo_periodic\"");
    }
}
