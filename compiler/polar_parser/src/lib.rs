//! Parser for polar radius formulas.
//!
//! Turns the token stream produced by `polar_lexer` into a
//! `polar_ast::ExpressionNode`, reporting the first grammar violation with
//! its byte offset.

pub mod parser;

pub use parser::diagnostics::{render_snippet, Diagnostic};
pub use parser::{parse_formula, ParseError, ParseErrorKind, TokenSlice, MAX_NESTING_DEPTH};


// Integration tests are in the tests/ directory
