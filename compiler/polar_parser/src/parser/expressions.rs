//! Expression productions.
//!
//! ```text
//! Expression := Term (('+' | '-') Term)*
//! Term       := Unary (('*' | '/') Unary)*
//! Unary      := ('+' | '-') Unary | Power
//! Power      := Primary ('^' Unary)?
//! Primary    := Number | Identifier '(' Arguments? ')' | 'theta' | 'pi' | '(' Expression ')'
//! ```
//!
//! `depth` bounds the depth of the tree being built. Open parentheses,
//! call argument lists, unary signs and `^` add one level each, and every
//! operator folded into a `+ -` or `* /` chain adds one more. Past
//! `MAX_NESTING_DEPTH` parsing stops with `NestingTooDeep`.

use nom::combinator::cut;
use nom::multi::separated_list1;
use polar_ast::ast::{BinaryOperator, ExpressionNode, UnaryOperator};
use polar_ast::builtins::BuiltinFunction;
use polar_lexer::token::{Token, TokenType};

use super::{PResult, ParseError, ParseErrorKind, TokenSlice, MAX_NESTING_DEPTH};

fn fail<O>(kind: ParseErrorKind, position: usize) -> Result<O, nom::Err<ParseError>> {
    Err(nom::Err::Failure(ParseError::new(kind, position)))
}

fn check_depth(input: TokenSlice<'_>, depth: usize) -> Result<(), nom::Err<ParseError>> {
    if depth > MAX_NESTING_DEPTH {
        return fail(ParseErrorKind::NestingTooDeep, input.position());
    }
    Ok(())
}

/// Consume one token of the given type.
fn token<'a>(expected: TokenType) -> impl Fn(TokenSlice<'a>) -> PResult<'a, &'a Token> {
    move |input: TokenSlice<'a>| match input.peek() {
        Some(token) if token.token_type == expected => Ok((input.advance(), token)),
        _ => Err(nom::Err::Error(ParseError::unexpected(input))),
    }
}

fn closing_paren(input: TokenSlice<'_>) -> PResult<'_, ()> {
    match input.peek_type() {
        Some(TokenType::RightParen) => Ok((input.advance(), ())),
        _ => fail(ParseErrorKind::MissingClosingParenthesis, input.position()),
    }
}

/// `Term (('+' | '-') Term)*`, left-associative.
pub fn parse_expression(input: TokenSlice<'_>, depth: usize) -> PResult<'_, ExpressionNode> {
    check_depth(input, depth)?;
    log::trace!("parse_expression at {}", input.position());
    let (mut input, mut left) = parse_term(input, depth)?;
    let mut chain = depth;
    loop {
        let operator = match input.peek_type() {
            Some(TokenType::Plus) => BinaryOperator::Add,
            Some(TokenType::Minus) => BinaryOperator::Sub,
            _ => break,
        };
        chain += 1;
        check_depth(input, chain)?;
        let (rest, right) = parse_term(input.advance(), chain)?;
        left = ExpressionNode::binary(left, operator, right);
        input = rest;
    }
    Ok((input, left))
}

/// `Unary (('*' | '/') Unary)*`, left-associative.
pub fn parse_term(input: TokenSlice<'_>, depth: usize) -> PResult<'_, ExpressionNode> {
    let (mut input, mut left) = parse_unary(input, depth)?;
    let mut chain = depth;
    loop {
        let operator = match input.peek_type() {
            Some(TokenType::Star) => BinaryOperator::Mul,
            Some(TokenType::Slash) => BinaryOperator::Div,
            _ => break,
        };
        chain += 1;
        check_depth(input, chain)?;
        let (rest, right) = parse_unary(input.advance(), chain)?;
        left = ExpressionNode::binary(left, operator, right);
        input = rest;
    }
    Ok((input, left))
}

/// A prefix sign binds looser than `^`, so `-2^2` is `-(2^2)`.
pub fn parse_unary(input: TokenSlice<'_>, depth: usize) -> PResult<'_, ExpressionNode> {
    check_depth(input, depth)?;
    let operator = match input.peek_type() {
        Some(TokenType::Plus) => UnaryOperator::Plus,
        Some(TokenType::Minus) => UnaryOperator::Minus,
        _ => return parse_power(input, depth),
    };
    let (rest, argument) = parse_unary(input.advance(), depth + 1)?;
    Ok((rest, ExpressionNode::unary(operator, argument)))
}

/// `Primary ('^' Unary)?`. The exponent re-enters `Unary`, which makes
/// `^` right-associative and admits `2^-1`.
pub fn parse_power(input: TokenSlice<'_>, depth: usize) -> PResult<'_, ExpressionNode> {
    let (input, base) = parse_primary(input, depth)?;
    match input.peek_type() {
        Some(TokenType::Caret) => {
            let (rest, exponent) = parse_unary(input.advance(), depth + 1)?;
            Ok((
                rest,
                ExpressionNode::binary(base, BinaryOperator::Pow, exponent),
            ))
        }
        _ => Ok((input, base)),
    }
}

pub fn parse_primary(input: TokenSlice<'_>, depth: usize) -> PResult<'_, ExpressionNode> {
    let Some(head) = input.peek() else {
        return Err(nom::Err::Error(ParseError::unexpected(input)));
    };
    match &head.token_type {
        TokenType::Number(value) => Ok((input.advance(), ExpressionNode::number(*value))),
        TokenType::Identifier(name) => {
            let rest = input.advance();
            if rest.peek_type() == Some(&TokenType::LeftParen) {
                return parse_call(input, depth);
            }
            match name.as_str() {
                "theta" => Ok((rest, ExpressionNode::Variable)),
                "pi" => Ok((rest, ExpressionNode::number(std::f64::consts::PI))),
                _ => fail(
                    ParseErrorKind::UnknownIdentifier(name.clone()),
                    head.position(),
                ),
            }
        }
        TokenType::LeftParen => {
            let (rest, inner) = parse_expression(input.advance(), depth + 1)?;
            let (rest, ()) = closing_paren(rest)?;
            Ok((rest, inner))
        }
        _ => Err(nom::Err::Error(ParseError::unexpected(input))),
    }
}

/// `Identifier '(' (Expression (',' Expression)*)? ')'`.
///
/// The callee must name a builtin and receive exactly its arity.
pub fn parse_call(input: TokenSlice<'_>, depth: usize) -> PResult<'_, ExpressionNode> {
    let (rest, callee) = match input.peek() {
        Some(Token {
            token_type: TokenType::Identifier(name),
            ..
        }) => (input.advance(), name),
        _ => return Err(nom::Err::Error(ParseError::unexpected(input))),
    };
    let callee_position = input.position();
    let Some(function) = BuiltinFunction::lookup(callee) else {
        return fail(
            ParseErrorKind::UnknownFunction(callee.clone()),
            callee_position,
        );
    };

    let (rest, _) = token(TokenType::LeftParen)(rest)?;
    check_depth(rest, depth + 1)?;
    let (rest, arguments) = if rest.peek_type() == Some(&TokenType::RightParen) {
        (rest, Vec::new())
    } else {
        separated_list1(
            token(TokenType::Comma),
            cut(|i| parse_expression(i, depth + 1)),
        )(rest)?
    };
    let (rest, ()) = closing_paren(rest)?;

    if arguments.len() != function.arity() {
        return fail(
            ParseErrorKind::ArityMismatch {
                function: function.name().to_string(),
                expected: function.arity(),
                found: arguments.len(),
            },
            callee_position,
        );
    }
    Ok((rest, ExpressionNode::call(function.name(), arguments)))
}
