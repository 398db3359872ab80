//! Lexer for polar formulas, built on the 'logos' crate.
//! Produces numbers, identifiers, the five arithmetic operators, parentheses
//! and commas, each tagged with its source location.

use logos::Logos;
use thiserror::Error;

use crate::logos_token::{LogosToken, RawLexError};
use crate::token::{Location, Token, TokenType};

/// A lexical error, reported at the byte offset where it occurred.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A numeric literal contains a second `.`
    #[error("invalid number literal with multiple dots at position {position}")]
    MultipleDots {
        /// Offset of the offending dot
        position: usize,
    },

    /// A numeric literal that cannot be read as a float
    #[error("invalid number literal \"{literal}\" at position {position}")]
    InvalidNumber {
        /// The captured text
        literal: String,
        /// Offset where the literal starts
        position: usize,
    },

    /// A character that starts no token
    #[error("unexpected character \"{character}\" at position {position}")]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Offset of the character
        position: usize,
    },
}

impl LexError {
    /// Byte offset the error refers to
    pub fn position(&self) -> usize {
        match self {
            LexError::MultipleDots { position }
            | LexError::InvalidNumber { position, .. }
            | LexError::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

/// Formula lexer.
///
/// Iterates over `Result<Token, LexError>`; the end-of-input token is not
/// yielded by the iterator, use [`Lexer::tokenize`] to get the full stream.
pub struct Lexer<'source> {
    /// The source text being lexed
    source: &'source str,
    /// Location of the last synchronised byte
    location: Location,
    /// Byte offset within `source` matching `location`
    cursor: usize,
    /// The inner logos lexer
    inner: logos::Lexer<'source, LogosToken>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source text
    pub fn new(source: &'source str) -> Self {
        Self::starting_at(source, Location::default())
    }

    /// Create a lexer whose reported locations start at `start`.
    ///
    /// Used when `source` is a slice of a larger text so that positions
    /// still refer to the original input.
    pub fn starting_at(source: &'source str, start: Location) -> Self {
        Self {
            source,
            location: start,
            cursor: 0,
            inner: LogosToken::lexer(source),
        }
    }

    /// Lex the whole input, appending the end-of-input token.
    ///
    /// Stops at the first error.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        for token in self.by_ref() {
            tokens.push(token?);
        }
        let end = self.source.len();
        self.sync_position_to(end);
        tokens.push(Token::eof(self.location));
        log::trace!("tokenized {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Advance the tracked location up to byte `offset` of the source.
    fn sync_position_to(&mut self, offset: usize) {
        let text = &self.source[self.cursor..offset];
        self.location = self.location.advanced_by(text);
        self.cursor = offset;
    }

    fn convert_token(&self, logos_token: LogosToken, lexeme: &str) -> Token {
        let token_type = match logos_token {
            LogosToken::Number(value) => TokenType::Number(value),
            LogosToken::Identifier => TokenType::Identifier(lexeme.to_string()),
            LogosToken::Plus => TokenType::Plus,
            LogosToken::Minus => TokenType::Minus,
            LogosToken::Star => TokenType::Star,
            LogosToken::Slash => TokenType::Slash,
            LogosToken::Caret => TokenType::Caret,
            LogosToken::LeftParen => TokenType::LeftParen,
            LogosToken::RightParen => TokenType::RightParen,
            LogosToken::Comma => TokenType::Comma,
        };
        Token::new(token_type, lexeme, self.location)
    }

    fn convert_error(&self, error: RawLexError, lexeme: &str) -> LexError {
        let position = self.location.offset;
        match error {
            RawLexError::MultipleDots(index) => LexError::MultipleDots {
                position: position + index,
            },
            RawLexError::InvalidNumber => LexError::InvalidNumber {
                literal: lexeme.to_string(),
                position,
            },
            RawLexError::UnexpectedCharacter => LexError::UnexpectedCharacter {
                character: lexeme.chars().next().unwrap_or('\u{FFFD}'),
                position,
            },
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = self.inner.span();
        self.sync_position_to(span.start);
        let source = self.source;
        // Error spans are not guaranteed to sit on char boundaries.
        let lexeme = source.get(span.clone()).unwrap_or(&source[span.start..]);
        Some(match result {
            Ok(token) => Ok(self.convert_token(token, lexeme)),
            Err(error) => Err(self.convert_error(error, lexeme)),
        })
    }
}

/// Tokenize `source` into a stream terminated by an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
