use polar_ast::builtins::BuiltinFunction;
use polar_ast::visit::Span;
use polar_lexer::token::Location;
use polar_lexer::LexError;

use super::{ParseError, ParseErrorKind};

/// A user-facing description of an error in a formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic covering the character at `position`.
    pub fn at_position<S: Into<String>>(source: &str, position: usize, message: S) -> Self {
        Self {
            message: message.into(),
            span: span_at(source, position),
            help: None,
        }
    }

    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Diagnostic for a tokenizer failure in `source`.
    pub fn from_lex_error(error: &LexError, source: &str) -> Self {
        let help = match error {
            LexError::MultipleDots { .. } => "a number may contain at most one '.'",
            LexError::InvalidNumber { .. } => "a number needs at least one digit",
            LexError::UnexpectedCharacter { .. } => {
                "formulas are built from numbers, theta, pi, function calls and + - * / ^ ( ) ,"
            }
        };
        Self::at_position(source, error.position(), error.to_string()).with_help(help)
    }

    /// Diagnostic for a grammar violation in `source`.
    pub fn from_parse_error(error: &ParseError, source: &str) -> Self {
        let diagnostic = Self::at_position(source, error.position, error.to_string());
        match help_for_kind(&error.kind) {
            Some(help) => diagnostic.with_help(help),
            None => diagnostic,
        }
    }
}

fn help_for_kind(kind: &ParseErrorKind) -> Option<String> {
    match kind {
        ParseErrorKind::UnexpectedToken(token) if token == "*" => {
            Some("'**' is not an operator; use '^' for powers".to_string())
        }
        ParseErrorKind::UnexpectedToken(token) if token == "EOF" => {
            Some("the formula ended where a value was expected".to_string())
        }
        ParseErrorKind::UnexpectedToken(_) => None,
        ParseErrorKind::UnknownIdentifier(_) => {
            Some("the only variable is 'theta' and the only constant is 'pi'".to_string())
        }
        ParseErrorKind::UnknownFunction(_) => Some(format!(
            "available functions: {}",
            BuiltinFunction::names()
        )),
        ParseErrorKind::ArityMismatch { .. } => {
            Some("every function takes exactly one argument".to_string())
        }
        ParseErrorKind::MissingClosingParenthesis => {
            Some("Did you forget a matching ')'?".to_string())
        }
        ParseErrorKind::UnexpectedExtraInput => {
            Some("Did you forget an operator between two values?".to_string())
        }
        ParseErrorKind::NestingTooDeep => {
            Some("remove redundant parentheses or split the formula".to_string())
        }
    }
}

/// Build a span covering the character at byte `position` of `source`.
///
/// Positions at or past the end produce an empty span at the end of input.
fn span_at(source: &str, position: usize) -> Span {
    let position = position.min(source.len());
    let before = source.get(..position).unwrap_or(source);
    let location = Location::default().advanced_by(before);
    let width = source[before.len()..]
        .chars()
        .next()
        .map_or(0, char::len_utf8);
    Span {
        start: before.len(),
        end: before.len() + width,
        line: location.line as u32,
        column: location.column as u32,
    }
}

/// Render a diagnostic with the offending line and a caret marker.
///
/// ```text
/// error: unexpected token "*" at position 2
///  --> 1:3
///   |
/// 1 | 2**3
///   |   ^
///   = help: '**' is not an operator; use '^' for powers
/// ```
pub fn render_snippet(diagnostic: &Diagnostic, source: &str) -> String {
    let span = diagnostic.span;
    let line_number = span.line.max(1) as usize;
    let line_text = source.lines().nth(line_number - 1).unwrap_or("");
    let gutter = " ".repeat(line_number.to_string().len());
    let column = span.column.max(1) as usize;
    let carets = source
        .get(span.start..span.end)
        .map_or(1, |text| text.chars().count().max(1));

    let mut out = format!(
        "error: {}\n{gutter}--> {}:{}\n{gutter} |\n{} | {}\n{gutter} | {}{}\n",
        diagnostic.message,
        span.line,
        span.column,
        line_number,
        line_text,
        " ".repeat(column - 1),
        "^".repeat(carets),
    );
    if let Some(help) = &diagnostic.help {
        out.push_str(&format!("{gutter} = help: {help}\n"));
    }
    out
}
