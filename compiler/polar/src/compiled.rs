use std::fmt;
use std::sync::Arc;

use polar_ast::ast::ExpressionNode;
use polar_eval::EvalError;

/// A successfully compiled formula.
///
/// Cloning is cheap and shares the tree; the tree is never mutated after
/// compilation, so a compiled expression can be read from any thread.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    source: String,
    ast: Arc<ExpressionNode>,
}

impl CompiledExpression {
    pub(crate) fn new(source: &str, ast: ExpressionNode) -> Self {
        Self {
            source: source.to_string(),
            ast: Arc::new(ast),
        }
    }

    /// A formula that ignores θ and always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(&value.to_string(), ExpressionNode::number(value))
    }

    /// Wrap a tree that did not come from the parser, such as one
    /// deserialized from JSON, after checking every call in it.
    pub fn from_ast(source: impl Into<String>, ast: ExpressionNode) -> Result<Self, EvalError> {
        polar_eval::validate(&ast)?;
        Ok(Self {
            source: source.into(),
            ast: Arc::new(ast),
        })
    }

    /// The text this expression was compiled from, as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &ExpressionNode {
        &self.ast
    }

    /// r(θ), or the evaluator's error.
    pub fn try_evaluate(&self, theta: f64) -> Result<f64, EvalError> {
        polar_eval::evaluate(&self.ast, theta)
    }

    /// r(θ).
    ///
    /// Trees reaching this point have had every call checked, so the
    /// evaluator cannot fail; NaN stands in should it ever do so.
    pub fn evaluate(&self, theta: f64) -> f64 {
        self.try_evaluate(theta).unwrap_or(f64::NAN)
    }

    /// A standalone closure computing r(θ) that shares this tree.
    pub fn function(&self) -> impl Fn(f64) -> f64 + Send + Sync + 'static {
        let ast = Arc::clone(&self.ast);
        move |theta| polar_eval::evaluate(&ast, theta).unwrap_or(f64::NAN)
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use polar_ast::ast::BinaryOperator;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_thread_safety() {
        assert_send_sync::<CompiledExpression>();
        let compiled = compile("theta ^ 2").unwrap();
        let f = compiled.function();
        let handle = std::thread::spawn(move || f(3.0));
        assert_eq!(handle.join().unwrap(), 9.0);
    }

    #[test]
    fn test_clone_shares_tree() {
        let compiled = compile("sin(theta)").unwrap();
        let copy = compiled.clone();
        assert!(Arc::ptr_eq(&compiled.ast, &copy.ast));
        assert_eq!(copy.source(), "sin(theta)");
    }

    #[test]
    fn test_from_ast_validates_calls() {
        let ast = ExpressionNode::binary(
            ExpressionNode::Variable,
            BinaryOperator::Add,
            ExpressionNode::call("cosh", vec![ExpressionNode::Variable]),
        );
        assert_eq!(
            CompiledExpression::from_ast("theta + cosh(theta)", ast),
            Err(EvalError::UnknownFunction("cosh".to_string()))
        );

        let ok = CompiledExpression::from_ast("2 * theta", compile("2*theta").unwrap().ast().clone())
            .unwrap();
        assert_eq!(ok.evaluate(4.0), 8.0);
    }

    #[test]
    fn test_constant_matches_compiled_literal() {
        let constant = CompiledExpression::constant(5.0);
        assert_eq!(constant, compile("5").unwrap());
        assert_eq!(constant.evaluate(123.0), 5.0);
    }

    #[test]
    fn test_display() {
        let compiled = compile("r = 1 + 2 * theta").unwrap();
        assert_eq!(compiled.to_string(), "(1 + (2 * theta))");
        assert_eq!(compiled.source(), "r = 1 + 2 * theta");
    }
}
