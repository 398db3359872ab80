//! Test utilities for the parser

// This module is only used for testing purposes
#![allow(dead_code)]

use polar_ast::ast::ExpressionNode;
use polar_lexer::token::{Location, Token, TokenType};

use super::{parse_formula, ParseError};

/// Creates a token with default location for testing
pub fn create_token(token_type: TokenType, lexeme: &str) -> Token {
    Token::new(token_type, lexeme, Location::default())
}

/// Creates a number token for testing
pub fn create_number(value: f64) -> Token {
    create_token(TokenType::Number(value), &value.to_string())
}

/// Creates an identifier token for testing
pub fn create_identifier(name: &str) -> Token {
    create_token(TokenType::Identifier(name.to_string()), name)
}

/// Tokenizes a string for testing
pub fn tokenize(input: &str) -> Vec<Token> {
    polar_lexer::tokenize(input).expect("test input should tokenize")
}

/// Tokenizes and parses a string
pub fn parse(input: &str) -> Result<ExpressionNode, ParseError> {
    parse_formula(&tokenize(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_token() {
        let token = create_number(2.5);
        assert_eq!(token.token_type, TokenType::Number(2.5));
        assert_eq!(token.lexeme, "2.5");
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("1 + 2");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].token_type, TokenType::Plus);
        assert!(tokens[3].is_eof());
    }
}
