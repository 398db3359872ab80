//! Serializable outcome of a compile, for JSON consumers.

use polar_ast::ast::ExpressionNode;
use serde::{Deserialize, Serialize};

use crate::{CompileError, CompiledExpression};

/// `{ "ok": true, "ast": ... }` or `{ "ok": false, "error": ..., "position": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileReport {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ast: Option<ExpressionNode>,
}

impl CompileReport {
    pub fn from_result(result: &Result<CompiledExpression, CompileError>) -> Self {
        match result {
            Ok(compiled) => Self {
                ok: true,
                error: None,
                position: None,
                ast: Some(compiled.ast().clone()),
            },
            Err(error) => Self {
                ok: false,
                error: Some(error.to_string()),
                position: Some(error.position()),
                ast: None,
            },
        }
    }

    /// Compile `source` and report the outcome.
    pub fn compile(source: &str) -> Self {
        Self::from_result(&crate::compile(source))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
