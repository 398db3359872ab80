// Parser implementation for polar formulas using nom over a token slice.
// Each production takes a `TokenSlice` and returns the remaining slice with
// the node it built, following nom's `IResult` protocol.

use std::fmt;

use nom::combinator::all_consuming;
use nom::error::ErrorKind;
use nom::{IResult, InputLength};
use polar_ast::ast::ExpressionNode;
use polar_lexer::token::{Token, TokenType};
use thiserror::Error;

pub mod diagnostics;
pub mod expressions;
#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod tests;

pub use expressions::{
    parse_call, parse_expression, parse_power, parse_primary, parse_term, parse_unary,
};

/// Deepest tree the parser builds before giving up.
///
/// Nested parentheses, calls, signs and exponents count towards it, as does
/// every operator of a flat `+ -` or `* /` chain.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Result type shared by every production.
pub type PResult<'a, O> = IResult<TokenSlice<'a>, O, ParseError>;

/// A borrowed view of the remaining tokens.
///
/// The stream produced by the lexer ends with an `Eof` token; that token is
/// never consumed and does not count towards the input length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSlice<'a>(pub &'a [Token]);

impl<'a> TokenSlice<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenSlice(tokens)
    }

    /// The next token, without consuming it.
    pub fn peek(&self) -> Option<&'a Token> {
        self.0.first()
    }

    pub fn peek_type(&self) -> Option<&'a TokenType> {
        self.peek().map(|token| &token.token_type)
    }

    /// The slice with its first token consumed.
    ///
    /// `Eof` is sticky: advancing past it returns the same slice.
    pub fn advance(&self) -> Self {
        match self.0.split_first() {
            Some((first, rest)) if !first.is_eof() => TokenSlice(rest),
            _ => *self,
        }
    }

    /// Byte offset of the next token.
    ///
    /// Lexer output always ends with `Eof`, which carries the input length.
    /// An exhausted hand-built stream has no position to report and gives 0.
    pub fn position(&self) -> usize {
        self.peek().map(Token::position).unwrap_or(0)
    }

    /// Text naming the next token in error messages.
    pub fn describe_next(&self) -> String {
        match self.peek() {
            Some(token) if !token.is_eof() => token.lexeme.clone(),
            _ => TokenType::Eof.describe(),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().map_or(true, Token::is_eof)
    }
}

impl InputLength for TokenSlice<'_> {
    fn input_len(&self) -> usize {
        match self.0.last() {
            Some(last) if last.is_eof() => self.0.len() - 1,
            _ => self.0.len(),
        }
    }
}

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken(String),
    UnknownIdentifier(String),
    UnknownFunction(String),
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
    MissingClosingParenthesis,
    UnexpectedExtraInput,
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedToken(token) => write!(f, "unexpected token \"{token}\""),
            ParseErrorKind::UnknownIdentifier(name) => write!(f, "unknown identifier \"{name}\""),
            ParseErrorKind::UnknownFunction(name) => write!(f, "unknown function \"{name}\""),
            ParseErrorKind::ArityMismatch {
                function,
                expected,
                found,
            } => write!(
                f,
                "arity mismatch: function \"{function}\" expects {expected} argument, got {found}"
            ),
            ParseErrorKind::MissingClosingParenthesis => {
                f.write_str("missing closing parenthesis \")\"")
            }
            ParseErrorKind::UnexpectedExtraInput => {
                f.write_str("unexpected extra input after valid expression")
            }
            ParseErrorKind::NestingTooDeep => f.write_str("expression nested too deeply"),
        }
    }
}

/// A grammar violation at a byte offset of the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// An `unexpected token` error for the head of `input`.
    pub fn unexpected(input: TokenSlice<'_>) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken(input.describe_next()),
            input.position(),
        )
    }
}

impl<'a> nom::error::ParseError<TokenSlice<'a>> for ParseError {
    fn from_error_kind(input: TokenSlice<'a>, kind: ErrorKind) -> Self {
        match kind {
            // Raised by `all_consuming` when tokens remain
            ErrorKind::Eof => Self::new(ParseErrorKind::UnexpectedExtraInput, input.position()),
            _ => Self::unexpected(input),
        }
    }

    fn append(_input: TokenSlice<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

/// Parse a complete token stream into a single expression.
///
/// The stream must be fully consumed; anything left before `Eof` is
/// reported as `unexpected extra input`.
pub fn parse_formula(tokens: &[Token]) -> Result<ExpressionNode, ParseError> {
    let input = TokenSlice::new(tokens);
    log::trace!("parsing {} tokens", input.input_len());
    match all_consuming(|i| parse_expression(i, 0))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::unexpected(input)),
    }
}
