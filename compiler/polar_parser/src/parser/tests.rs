use nom::InputLength;
use polar_ast::ast::{BinaryOperator, ExpressionNode, UnaryOperator};
use pretty_assertions::assert_eq;

use super::test_utils::{create_identifier, create_number, create_token, parse, tokenize};
use super::*;

fn kind_of(input: &str) -> ParseErrorKind {
    parse(input).unwrap_err().kind
}

#[test]
fn test_token_slice_navigation() {
    let tokens = tokenize("sin(theta)");
    let slice = TokenSlice::new(&tokens);
    assert_eq!(slice.input_len(), 4);
    assert_eq!(slice.position(), 0);
    let rest = slice.advance().advance();
    assert_eq!(rest.peek_type(), Some(&TokenType::Identifier("theta".into())));
    assert_eq!(rest.position(), 4);

    let end = rest.advance().advance();
    assert!(end.is_at_end());
    assert_eq!(end.input_len(), 0);
    // Eof is never consumed
    assert_eq!(end.advance(), end);
    assert_eq!(end.describe_next(), "EOF");
}

#[test]
fn test_number_and_constants() {
    assert_eq!(parse("271").unwrap(), ExpressionNode::number(271.0));
    assert_eq!(parse("theta").unwrap(), ExpressionNode::Variable);
    assert_eq!(
        parse("pi").unwrap(),
        ExpressionNode::number(std::f64::consts::PI)
    );
}

#[test]
fn test_left_associative_subtraction() {
    let expected = ExpressionNode::binary(
        ExpressionNode::binary(
            ExpressionNode::number(1.0),
            BinaryOperator::Sub,
            ExpressionNode::number(2.0),
        ),
        BinaryOperator::Sub,
        ExpressionNode::number(3.0),
    );
    assert_eq!(parse("1 - 2 - 3").unwrap(), expected);
}

#[test]
fn test_power_binds_tighter_than_sign() {
    let expected = ExpressionNode::unary(
        UnaryOperator::Minus,
        ExpressionNode::binary(
            ExpressionNode::number(2.0),
            BinaryOperator::Pow,
            ExpressionNode::number(2.0),
        ),
    );
    assert_eq!(parse("-2^2").unwrap(), expected);
}

#[test]
fn test_negative_exponent() {
    let expected = ExpressionNode::binary(
        ExpressionNode::number(2.0),
        BinaryOperator::Pow,
        ExpressionNode::unary(UnaryOperator::Minus, ExpressionNode::number(1.0)),
    );
    assert_eq!(parse("2^-1").unwrap(), expected);
}

#[test]
fn test_call() {
    let expected = ExpressionNode::call(
        "sqrt",
        vec![ExpressionNode::binary(
            ExpressionNode::Variable,
            BinaryOperator::Add,
            ExpressionNode::number(1.0),
        )],
    );
    assert_eq!(parse("sqrt ( theta + 1 )").unwrap(), expected);
}

#[test]
fn test_unknown_identifier() {
    let err = parse("2 * x").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownIdentifier("x".into()));
    assert_eq!(err.position, 4);
    assert_eq!(err.to_string(), "unknown identifier \"x\" at position 4");
}

#[test]
fn test_function_name_without_call() {
    assert_eq!(kind_of("sin"), ParseErrorKind::UnknownIdentifier("sin".into()));
}

#[test]
fn test_unknown_function() {
    let err = parse("1 + foo(1)").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownFunction("foo".into()));
    assert_eq!(err.position, 4);
}

#[test]
fn test_arity_mismatch() {
    for (source, found) in [("sin()", 0), ("atan(1, 2)", 2), ("abs(1,2,3)", 3)] {
        let err = parse(source).unwrap_err();
        assert!(
            matches!(err.kind, ParseErrorKind::ArityMismatch { expected: 1, found: f, .. } if f == found),
            "{source}: {err}"
        );
        assert_eq!(err.position, 0);
    }
}

#[test]
fn test_trailing_comma_in_call() {
    let err = parse("sin(1,)").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken(")".into()));
    assert_eq!(err.position, 6);
}

#[test]
fn test_missing_closing_parenthesis() {
    let err = parse("(1+2").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingClosingParenthesis);
    assert_eq!(err.position, 4);

    let err = parse("cos(theta").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingClosingParenthesis);
    assert_eq!(err.position, 9);
}

#[test]
fn test_unexpected_extra_input() {
    let err = parse("1 2").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedExtraInput);
    assert_eq!(err.position, 2);

    assert_eq!(kind_of("(1))"), ParseErrorKind::UnexpectedExtraInput);
}

#[test]
fn test_unexpected_token() {
    let err = parse("2**3").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken("*".into()));
    assert_eq!(err.position, 2);

    assert_eq!(kind_of(")"), ParseErrorKind::UnexpectedToken(")".into()));
    assert_eq!(kind_of("1 +"), ParseErrorKind::UnexpectedToken("EOF".into()));
}

#[test]
fn test_empty_input() {
    let err = parse("   ").unwrap_err();
    assert_eq!(err.to_string(), "unexpected token \"EOF\" at position 3");

    let err = parse_formula(&[]).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken("EOF".into()));
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_NESTING_DEPTH + 10;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(kind_of(&source), ParseErrorKind::NestingTooDeep);

    let source = format!("{}1", "-".repeat(depth));
    assert_eq!(kind_of(&source), ParseErrorKind::NestingTooDeep);

    let depth = MAX_NESTING_DEPTH / 2;
    let source = format!("{}theta{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(parse(&source).unwrap(), ExpressionNode::Variable);
}

#[test]
fn test_flat_chains_count_towards_nesting() {
    let within = vec!["1"; MAX_NESTING_DEPTH].join("+");
    let ExpressionNode::Binary(root) = parse(&within).unwrap() else {
        panic!("expected a binary chain");
    };
    assert_eq!(root.operator, BinaryOperator::Add);

    let long = vec!["theta"; 20_000].join("+");
    let err = parse(&long).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
    // The 257th `+` is where the budget runs out
    assert_eq!(err.position, 256 * 6 + 5);

    let product = vec!["2"; 20_000].join("*");
    assert_eq!(kind_of(&product), ParseErrorKind::NestingTooDeep);

    // Chains inside parentheses share the budget of the enclosing level
    let half = vec!["1"; MAX_NESTING_DEPTH / 2].join("-");
    let parens = MAX_NESTING_DEPTH / 2 + 10;
    let source = format!("{}{half}{}", "(".repeat(parens), ")".repeat(parens));
    assert_eq!(kind_of(&source), ParseErrorKind::NestingTooDeep);
}

#[test]
fn test_exhausted_slice_position() {
    let tokens = vec![create_number(1.0)];
    let slice = TokenSlice::new(&tokens).advance();
    assert_eq!(slice.peek(), None);
    assert_eq!(slice.position(), 0);
    assert_eq!(slice.describe_next(), "EOF");
}

#[test]
fn test_hand_built_tokens() {
    // A stream without a trailing Eof still parses
    let tokens = vec![
        create_identifier("abs"),
        create_token(TokenType::LeftParen, "("),
        create_number(-3.0),
        create_token(TokenType::RightParen, ")"),
    ];
    assert_eq!(
        parse_formula(&tokens).unwrap(),
        ExpressionNode::call("abs", vec![ExpressionNode::number(-3.0)])
    );
}
