//! Abstract Syntax Tree (AST) for polar radius formulas.
//!
//! This crate defines the nodes produced by the parser, the fixed table of
//! callable functions, and utilities for traversing and printing trees.

pub mod ast;
pub mod builtins;
pub mod visit;

// Re-export commonly used types
pub use ast::{
    BinaryExpressionNode, BinaryOperator, CallExpressionNode, ExpressionNode, UnaryExpressionNode,
    UnaryOperator,
};
pub use builtins::BuiltinFunction;

use std::fmt::Write as _;

use visit::{Visitable, Visitor};

/// A result type for AST operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Serializes an AST node to a JSON string.
///
/// # Example
///
/// ```
/// use polar_ast::ast::*;
/// use polar_ast::to_json;
///
/// let expr = ExpressionNode::binary(
///     ExpressionNode::number(2.0),
///     BinaryOperator::Pow,
///     ExpressionNode::Variable,
/// );
/// let json = to_json(&expr).unwrap();
/// assert!(json.contains("\"Pow\""));
/// assert!(json.contains("\"Variable\""));
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Deserializes an AST node from a JSON string.
///
/// # Examples
///
/// ```no_run
/// use polar_ast::ast::*;
/// use polar_ast::from_json;
///
/// let json = r#"{"NumberLiteral":42.0}"#;
/// let expr: ExpressionNode = from_json(json).unwrap();
/// ```
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> serde::Deserialize<'de>>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Renders a tree one node per line, children indented under their parent.
///
/// ```text
/// Binary +
///   Number 1
///   Call sin
///     Variable theta
/// ```
#[derive(Default)]
pub struct AstPrinter {
    indent: usize,
    out: String,
}

impl AstPrinter {
    /// Creates a new `AstPrinter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints an AST node to a string.
    pub fn print(mut self, node: &ExpressionNode) -> String {
        node.accept(&mut self);
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{:width$}{}", "", text, width = self.indent * 2);
    }

    fn nested<T: Visitable + ?Sized>(&mut self, node: &T) {
        self.indent += 1;
        self.visit_children(node);
        self.indent -= 1;
    }
}

impl Visitor for AstPrinter {
    type Output = ();

    fn visit_number(&mut self, value: f64) {
        self.line(format_args!("Number {value}"));
    }

    fn visit_variable(&mut self) {
        self.line(format_args!("Variable theta"));
    }

    fn visit_unary_expr(&mut self, node: &UnaryExpressionNode) {
        self.line(format_args!("Unary {}", node.operator));
        self.nested(node)
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpressionNode) {
        self.line(format_args!("Binary {}", node.operator));
        self.nested(node)
    }

    fn visit_call_expr(&mut self, node: &CallExpressionNode) {
        self.line(format_args!("Call {}", node.callee));
        self.nested(node)
    }
}
