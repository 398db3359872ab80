//! Visitor pattern implementation for traversing the AST.
//!
//! This module provides a `Visitor` trait that can be implemented to perform
//! read-only analyses over a formula tree, and a `Visitable` trait that AST
//! nodes implement to accept visitors. A few ready-made analyses used by the
//! command-line tools live at the bottom of the module.

use std::collections::BTreeSet;

use crate::ast::*;

/// A trait for types that can be visited by a `Visitor`.
pub trait Visitable {
    /// Accepts a visitor and calls the appropriate visit method.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output;

    /// Visits the children of this node with the given visitor.
    ///
    /// The default implementation does nothing.
    fn visit_children<V: Visitor + ?Sized>(&self, _visitor: &mut V) -> V::Output {
        Default::default()
    }
}

/// A visitor for traversing the AST.
///
/// The default implementations walk into children and return
/// `Default::default()`.
pub trait Visitor {
    /// The output type of the visitor.
    type Output: Default;

    fn visit_number(&mut self, _value: f64) -> Self::Output {
        Default::default()
    }

    fn visit_variable(&mut self) -> Self::Output {
        Default::default()
    }

    fn visit_unary_expr(&mut self, node: &UnaryExpressionNode) -> Self::Output {
        self.visit_children(node)
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpressionNode) -> Self::Output {
        self.visit_children(node)
    }

    fn visit_call_expr(&mut self, node: &CallExpressionNode) -> Self::Output {
        self.visit_children(node)
    }

    // Helper to visit children of a node
    fn visit_children<T: Visitable + ?Sized>(&mut self, node: &T) -> Self::Output {
        node.visit_children(self)
    }
}

impl Visitable for ExpressionNode {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            ExpressionNode::NumberLiteral(value) => visitor.visit_number(*value),
            ExpressionNode::Variable => visitor.visit_variable(),
            ExpressionNode::Unary(node) => visitor.visit_unary_expr(node),
            ExpressionNode::Binary(node) => visitor.visit_binary_expr(node),
            ExpressionNode::Call(node) => visitor.visit_call_expr(node),
        }
    }
}

impl Visitable for UnaryExpressionNode {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_unary_expr(self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        self.argument.accept(visitor)
    }
}

impl Visitable for BinaryExpressionNode {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_binary_expr(self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        self.left.accept(visitor);
        self.right.accept(visitor)
    }
}

impl Visitable for CallExpressionNode {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_call_expr(self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        for argument in &self.arguments {
            argument.accept(visitor);
        }
        Default::default()
    }
}

/// A span in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The starting byte index (inclusive).
    pub start: usize,
    /// The ending byte index (exclusive).
    pub end: usize,
    /// The line number (1-based).
    pub line: u32,
    /// The column number (1-based).
    pub column: u32,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Finds out whether a formula depends on θ at all.
#[derive(Default)]
pub struct ThetaFinder {
    found: bool,
}

impl Visitor for ThetaFinder {
    type Output = ();

    fn visit_variable(&mut self) {
        self.found = true;
    }
}

/// Returns `true` when θ appears anywhere in `expr`.
///
/// A formula without θ draws a circle of constant radius.
pub fn references_theta(expr: &ExpressionNode) -> bool {
    let mut finder = ThetaFinder::default();
    expr.accept(&mut finder);
    finder.found
}

/// Collects the distinct function names called by a formula.
#[derive(Default)]
pub struct CallCollector {
    /// Names seen so far, sorted.
    pub names: BTreeSet<String>,
}

impl Visitor for CallCollector {
    type Output = ();

    fn visit_call_expr(&mut self, node: &CallExpressionNode) {
        self.names.insert(node.callee.clone());
        self.visit_children(node)
    }
}

/// Returns the sorted, de-duplicated callee names in `expr`.
pub fn called_functions(expr: &ExpressionNode) -> Vec<String> {
    let mut collector = CallCollector::default();
    expr.accept(&mut collector);
    collector.names.into_iter().collect()
}

/// Counts nodes and tracks the maximum depth of a tree.
#[derive(Default)]
pub struct NodeCounter {
    /// Total number of nodes visited.
    pub nodes: usize,
    /// Depth of the deepest node (a lone literal has depth 1).
    pub max_depth: usize,
    depth: usize,
}

impl NodeCounter {
    fn enter(&mut self) {
        self.nodes += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn leaf(&mut self) {
        self.enter();
        self.depth -= 1;
    }

    fn branch<T: Visitable + ?Sized>(&mut self, node: &T) {
        self.enter();
        self.visit_children(node);
        self.depth -= 1;
    }
}

impl Visitor for NodeCounter {
    type Output = ();

    fn visit_number(&mut self, _value: f64) {
        self.leaf()
    }

    fn visit_variable(&mut self) {
        self.leaf()
    }

    fn visit_unary_expr(&mut self, node: &UnaryExpressionNode) {
        self.branch(node)
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpressionNode) {
        self.branch(node)
    }

    fn visit_call_expr(&mut self, node: &CallExpressionNode) {
        self.branch(node)
    }
}
