//! Compiles user-typed polar formulas into functions of θ.
//!
//! ```
//! let compiled = polar::compile("r = 109*sin(4*theta)+271").unwrap();
//! assert_eq!(compiled.evaluate(0.0), 271.0);
//!
//! let error = polar::compile("2**3").unwrap_err();
//! assert_eq!(error.to_string(), "unexpected token \"*\" at position 2");
//! ```
//!
//! Compilation either fully succeeds or fully fails. Callers that keep a
//! formula alive across edits should hold on to the last successful
//! [`CompiledExpression`] when a new one fails to compile.

pub mod compiled;
pub mod report;

pub use compiled::CompiledExpression;
pub use polar_eval::EvalError;
pub use polar_parser::{render_snippet, Diagnostic};
pub use report::CompileReport;

use polar_lexer::{LexError, Lexer, Location};
use polar_parser::{parse_formula, ParseError};
use thiserror::Error;

/// Why a formula failed to compile.
///
/// The message is the underlying tokenizer or parser message, unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CompileError {
    /// Byte offset into the source passed to [`compile`].
    pub fn position(&self) -> usize {
        match self {
            CompileError::Lex(e) => e.position(),
            CompileError::Parse(e) => e.position,
        }
    }

    /// A renderable diagnostic for this error against `source`.
    pub fn diagnostic(&self, source: &str) -> Diagnostic {
        match self {
            CompileError::Lex(e) => Diagnostic::from_lex_error(e, source),
            CompileError::Parse(e) => Diagnostic::from_parse_error(e, source),
        }
    }
}

/// Trims surrounding whitespace and an optional `r=` / `r =` prefix.
///
/// Returns the formula body and its byte offset within `source`.
pub fn strip_radius_prefix(source: &str) -> (&str, usize) {
    let trimmed = source.trim();
    let leading = source.len() - source.trim_start().len();
    let body = match trimmed
        .strip_prefix("r =")
        .or_else(|| trimmed.strip_prefix("r="))
    {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    };
    (body, leading + trimmed.len() - body.len())
}

/// Compile `source` into a reusable expression.
///
/// Error positions are byte offsets into `source` itself, including any
/// whitespace or `r =` prefix that was stripped.
pub fn compile(source: &str) -> Result<CompiledExpression, CompileError> {
    let (body, offset) = strip_radius_prefix(source);
    let start = Location::default().advanced_by(&source[..offset]);
    let tokens = Lexer::starting_at(body, start).tokenize()?;
    let ast = parse_formula(&tokens)?;
    log::debug!("compiled {:?} from {} tokens", body, tokens.len());
    Ok(CompiledExpression::new(source, ast))
}
