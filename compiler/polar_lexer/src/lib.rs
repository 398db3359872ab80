//! Polar formula lexical analyzer
//!
//! This crate converts formula text such as `109*sin(4*theta)+271` into a
//! stream of tokens for the parser. Every token carries its source location
//! and the stream always ends with an `Eof` token.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lexer;
pub mod logos_token;
pub mod token;

// Re-export the main types for convenience
pub use lexer::{tokenize, LexError, Lexer};
pub use logos_token::LogosToken;
pub use token::{Location, Token, TokenType};
