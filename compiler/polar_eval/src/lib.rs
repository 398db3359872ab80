//! Evaluator for polar radius formulas.
//!
//! Walks an `ExpressionNode` with a value for θ and produces r(θ). All
//! arithmetic follows IEEE-754: dividing by zero yields an infinity or NaN
//! rather than an error.

use polar_ast::ast::{BinaryOperator, ExpressionNode, UnaryOperator};
use polar_ast::builtins::BuiltinFunction;
use thiserror::Error;

/// Failures that can only arise from trees the parser did not produce,
/// such as ones deserialized from JSON or built by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown function \"{0}\"")]
    UnknownFunction(String),

    #[error("arity mismatch: function \"{function}\" expects {expected} argument, got {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
}

/// Evaluate `node` at `theta`.
pub fn evaluate(node: &ExpressionNode, theta: f64) -> Result<f64, EvalError> {
    match node {
        ExpressionNode::NumberLiteral(value) => Ok(*value),
        ExpressionNode::Variable => Ok(theta),
        ExpressionNode::Unary(unary) => {
            let value = evaluate(&unary.argument, theta)?;
            Ok(match unary.operator {
                UnaryOperator::Plus => value,
                UnaryOperator::Minus => -value,
            })
        }
        ExpressionNode::Binary(binary) => {
            let left = evaluate(&binary.left, theta)?;
            let right = evaluate(&binary.right, theta)?;
            Ok(match binary.operator {
                BinaryOperator::Add => left + right,
                BinaryOperator::Sub => left - right,
                BinaryOperator::Mul => left * right,
                BinaryOperator::Div => left / right,
                BinaryOperator::Pow => left.powf(right),
            })
        }
        ExpressionNode::Call(call) => {
            let function = BuiltinFunction::lookup(&call.callee)
                .ok_or_else(|| EvalError::UnknownFunction(call.callee.clone()))?;
            // Every builtin takes exactly one argument
            let [argument] = call.arguments.as_slice() else {
                return Err(EvalError::ArityMismatch {
                    function: function.name().to_string(),
                    expected: function.arity(),
                    found: call.arguments.len(),
                });
            };
            Ok(function.apply(evaluate(argument, theta)?))
        }
    }
}

/// Checks that every call in `node` names a builtin with the right number
/// of arguments, without evaluating anything.
pub fn validate(node: &ExpressionNode) -> Result<(), EvalError> {
    match node {
        ExpressionNode::NumberLiteral(_) | ExpressionNode::Variable => Ok(()),
        ExpressionNode::Unary(unary) => validate(&unary.argument),
        ExpressionNode::Binary(binary) => {
            validate(&binary.left)?;
            validate(&binary.right)
        }
        ExpressionNode::Call(call) => {
            let function = BuiltinFunction::lookup(&call.callee)
                .ok_or_else(|| EvalError::UnknownFunction(call.callee.clone()))?;
            if call.arguments.len() != function.arity() {
                log::debug!("call to {} has {} arguments", call.callee, call.arguments.len());
                return Err(EvalError::ArityMismatch {
                    function: function.name().to_string(),
                    expected: function.arity(),
                    found: call.arguments.len(),
                });
            }
            call.arguments.iter().try_for_each(validate)
        }
    }
}
