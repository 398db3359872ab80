use logos::Logos;

/// Failure detail attached to a logos error.
///
/// Logos produces `RawLexError::UnexpectedCharacter` (the default) for any
/// input that matches no token; the number callback produces the other two.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawLexError {
    /// No token matches at this point
    #[default]
    UnexpectedCharacter,
    /// A numeric literal holds more than one `.`; the payload is the byte
    /// index of the second dot within the literal
    MultipleDots(usize),
    /// The captured literal does not parse as a float (e.g. a lone `.`)
    InvalidNumber,
}

/// Raw token type used by the logos lexer
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = RawLexError)]
#[logos(skip r"[ \t\n\r\x0C]+")]
pub enum LogosToken {
    // --- Literals ---
    #[regex(r"[0-9.]+", parse_number)]
    Number(f64),

    // --- Identifiers (function names, `theta`, `pi`) ---
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // --- Operators ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,

    // --- Delimiters ---
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(",")]
    Comma,
}

fn parse_number(lex: &mut logos::Lexer<LogosToken>) -> Result<f64, RawLexError> {
    let literal = lex.slice();
    if let Some((second_dot, _)) = literal.match_indices('.').nth(1) {
        return Err(RawLexError::MultipleDots(second_dot));
    }
    literal.parse().map_err(|_| RawLexError::InvalidNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_forms() {
        for (src, expected) in [("3.14", 3.14), (".5", 0.5), ("5.", 5.0), ("271", 271.0)] {
            let mut lex = LogosToken::lexer(src);
            assert_eq!(lex.next(), Some(Ok(LogosToken::Number(expected))), "{src}");
            assert_eq!(lex.next(), None);
        }
    }

    #[test]
    fn test_number_errors() {
        let mut lex = LogosToken::lexer("1.2.3");
        assert_eq!(lex.next(), Some(Err(RawLexError::MultipleDots(3))));

        let mut lex = LogosToken::lexer(".");
        assert_eq!(lex.next(), Some(Err(RawLexError::InvalidNumber)));
    }

    #[test]
    fn test_unrecognised_input() {
        let mut lex = LogosToken::lexer("2 % 3");
        assert_eq!(lex.next(), Some(Ok(LogosToken::Number(2.0))));
        assert_eq!(lex.next(), Some(Err(RawLexError::UnexpectedCharacter)));
        assert_eq!(lex.span(), 2..3);
    }
}
