// Abstract Syntax Tree (AST) definitions for polar formulas.
// Every node owns its children; trees are built once by the parser and
// only read afterwards.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExpressionNode {
    /// A numeric literal, including the value of the constant `pi`
    NumberLiteral(f64),
    /// The free variable θ
    Variable,
    Unary(Box<UnaryExpressionNode>),
    Binary(Box<BinaryExpressionNode>),
    Call(Box<CallExpressionNode>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryExpressionNode {
    pub operator: UnaryOperator,
    pub argument: ExpressionNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryExpressionNode {
    pub left: ExpressionNode,
    pub operator: BinaryOperator,
    pub right: ExpressionNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    /// Exponentiation, right-associative
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallExpressionNode {
    /// Function name as written in the source
    pub callee: String,
    pub arguments: Vec<ExpressionNode>,
}

impl ExpressionNode {
    pub fn number(value: f64) -> Self {
        ExpressionNode::NumberLiteral(value)
    }

    pub fn unary(operator: UnaryOperator, argument: ExpressionNode) -> Self {
        ExpressionNode::Unary(Box::new(UnaryExpressionNode { operator, argument }))
    }

    pub fn binary(left: ExpressionNode, operator: BinaryOperator, right: ExpressionNode) -> Self {
        ExpressionNode::Binary(Box::new(BinaryExpressionNode {
            left,
            operator,
            right,
        }))
    }

    pub fn call(callee: impl Into<String>, arguments: Vec<ExpressionNode>) -> Self {
        ExpressionNode::Call(Box::new(CallExpressionNode {
            callee: callee.into(),
            arguments,
        }))
    }
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        }
    }
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Pow => "^",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Fully parenthesized infix form: `2+3*4` prints as `(2 + (3 * 4))`.
impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::NumberLiteral(value) => write!(f, "{value}"),
            ExpressionNode::Variable => f.write_str("theta"),
            ExpressionNode::Unary(node) => write!(f, "({}{})", node.operator, node.argument),
            ExpressionNode::Binary(node) => {
                write!(f, "({} {} {})", node.left, node.operator, node.right)
            }
            ExpressionNode::Call(node) => {
                write!(f, "{}(", node.callee)?;
                for (i, arg) in node.arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
