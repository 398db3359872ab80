use std::fmt;

/// Represents a token's location in the source code.
///
/// Line and column numbers are 1-based; the offset is the 0-based byte
/// offset from the start of the source and is what error messages report as
/// the "position".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// The 1-based line number in the source
    pub line: usize,
    /// The 1-based column number in the source
    pub column: usize,
    /// The 0-based byte offset from the start of the source
    pub offset: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl Location {
    /// Returns the location reached after walking over `text` from `self`.
    pub fn advanced_by(mut self, text: &str) -> Self {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        self.offset += 1;
                    }
                    self.line += 1;
                    self.column = 1;
                }
                _ => self.column += 1,
            }
            self.offset += c.len_utf8();
        }
        self
    }
}

/// The kind of a token, with the literal payload where there is one.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Literals and names
    Number(f64),
    Identifier(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    // Punctuation
    LeftParen,
    RightParen,
    Comma,

    /// End of input; always the last token of a tokenized formula
    Eof,
}

impl TokenType {
    /// Short human-readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenType::Number(n) => n.to_string(),
            TokenType::Identifier(name) => name.clone(),
            TokenType::Plus => "+".to_string(),
            TokenType::Minus => "-".to_string(),
            TokenType::Star => "*".to_string(),
            TokenType::Slash => "/".to_string(),
            TokenType::Caret => "^".to_string(),
            TokenType::LeftParen => "(".to_string(),
            TokenType::RightParen => ")".to_string(),
            TokenType::Comma => ",".to_string(),
            TokenType::Eof => "EOF".to_string(),
        }
    }
}

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub token_type: TokenType,
    /// The exact source text of the token (empty for `Eof`)
    pub lexeme: String,
    /// Where the token starts
    pub location: Location,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, location: Location) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// Create the end-of-input token
    pub fn eof(location: Location) -> Self {
        Self::new(TokenType::Eof, "", location)
    }

    /// Byte offset where the token begins
    pub fn position(&self) -> usize {
        self.location.offset
    }

    /// Whether this is the end-of-input token
    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.token_type, self.location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.line, self.column, self.offset)
    }
}
