use crate::lexer::prelude::{Lexer, LexicalErrorType, Token};

use super::prelude::{parse_source, Expression, ParseError, ParseErrorType, Parser};

fn parsed(input: &str) -> String {
    match parse_source(input) {
        Ok(expression) => expression.to_string(),
        Err(err) => panic!("{input:?} failed to parse: {err:?}"),
    }
}

fn parse_failure(input: &str) -> ParseError {
    match parse_source(input) {
        Ok(expression) => panic!("{input:?} parsed as {expression}"),
        Err(err) => err,
    }
}

#[test]
fn test_left_associative_operators() {
    assert_eq!(parsed("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(parsed("20 / 4 / 5"), "((20 / 4) / 5)");
    assert_eq!(parsed("7 // 2 % 3"), "((7 // 2) % 3)");
    assert_eq!(parsed("1 << 2 >> 3"), "((1 << 2) >> 3)");
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(parsed("2 ** 3 ** 2"), "(2 ** (3 ** 2))");
}

#[test]
fn test_power_against_unary() {
    // the base binds tighter than a leading minus, the exponent does not
    assert_eq!(parsed("-2 ** 2"), "(-(2 ** 2))");
    assert_eq!(parsed("2 ** -3"), "(2 ** (-3))");
    assert_eq!(parsed("~2 ** 2"), "(~(2 ** 2))");
}

#[test]
fn test_precedence_tiers() {
    assert_eq!(parsed("1 + 2 * 3 ** 2"), "(1 + (2 * (3 ** 2)))");
    assert_eq!(parsed("1 | 2 ^ 3 & 4 << 5"), "(1 | (2 ^ (3 & (4 << 5))))");
    assert_eq!(parsed("1 + 2 << 3"), "((1 + 2) << 3)");
    assert_eq!(parsed("1 & 2 == 3"), "((1 & 2) == 3)");
}

#[test]
fn test_boolean_operators() {
    assert_eq!(parsed("not a and b or c"), "(((not a) and b) or c)");
    assert_eq!(parsed("a or b and c"), "(a or (b and c))");
    assert_eq!(parsed("not not a"), "(not (not a))");
}

#[test]
fn test_stacked_unary_operators() {
    assert_eq!(parsed("- - 1"), "(-(-1))");
    assert_eq!(parsed("+-~1"), "(+(-(~1)))");
}

#[test]
fn test_comparison_chains() {
    assert_eq!(parsed("1 < x <= 10"), "(1 < x <= 10)");
    assert_eq!(parsed("a == b != c"), "(a == b != c)");
    assert_eq!(parsed("a < b + 1"), "(a < (b + 1))");
}

#[test]
fn test_two_token_comparison_operators() {
    assert_eq!(parsed("a is not b"), "(a is not b)");
    assert_eq!(parsed("a not in b"), "(a not in b)");
    assert_eq!(parsed("a is b"), "(a is b)");
    assert_eq!(parsed("a in b"), "(a in b)");
    // `not` in operand position is the prefix operator
    assert_eq!(parsed("not a in b"), "(not (a in b))");
}

#[test]
fn test_ternary() {
    assert_eq!(parsed("a if b else c"), "(a if b else c)");
    assert_eq!(
        parsed("a if b else c if d else e"),
        "(a if b else (c if d else e))"
    );
    assert_eq!(parsed("1 or 2 if 0 else 3"), "((1 or 2) if 0 else 3)");
}

#[test]
fn test_walrus() {
    assert_eq!(parsed("x := 1 + 2"), "(x := (1 + 2))");
    assert_eq!(parsed("x := y := 1"), "(x := (y := 1))");
    assert_eq!(parsed("a and (x := b)"), "(a and (x := b))");
}

#[test]
fn test_assignment() {
    assert_eq!(parsed("a = 1 + 2"), "(a = (1 + 2))");
    assert_eq!(parsed("a = b = 7"), "(a = b = 7)");
    assert_eq!(parsed("a = b if c else d"), "(a = (b if c else d))");
}

#[test]
fn test_assignment_chains_flatten() {
    let parsed = parse_source("a = b = 7").expect("should parse");

    match parsed {
        Expression::Assign(assign) => {
            let targets = assign
                .targets
                .iter()
                .map(|target| target.value.as_str())
                .collect::<Vec<_>>();

            assert_eq!(targets, vec!["a", "b"]);
        },
        other => panic!("expected an assignment, got {other}"),
    }
}

#[test]
fn test_tuples() {
    assert_eq!(parsed("1, 2, 3"), "(1, 2, 3)");
    assert_eq!(parsed("1,"), "(1,)");
    assert_eq!(parsed("()"), "()");
    assert_eq!(parsed("(1)"), "1");
    assert_eq!(parsed("(1, 2,)"), "(1, 2)");
    assert_eq!(parsed("(1, 2), 3"), "((1, 2), 3)");
    assert_eq!(parsed("a = 1, 2"), "((a = 1), 2)");
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_failure("").error, ParseErrorType::EmptyInput);
    assert_eq!(parse_failure("   ").error, ParseErrorType::EmptyInput);
    assert_eq!(parse_failure("# just a comment").error, ParseErrorType::EmptyInput);
}

#[test]
fn test_unexpected_eof() {
    assert_eq!(parse_failure("1 +").error, ParseErrorType::UnexpectedEof);
    assert_eq!(parse_failure("a and").error, ParseErrorType::UnexpectedEof);
}

#[test]
fn test_unclosed_paren() {
    assert_eq!(parse_failure("(1 + 2").error, ParseErrorType::UnclosedParen);
    assert_eq!(parse_failure("((1) + 2").error, ParseErrorType::UnclosedParen);
}

#[test]
fn test_invalid_assignment_targets() {
    assert_eq!(
        parse_failure("1 = 2").error,
        ParseErrorType::InvalidAssignmentTarget
    );
    assert_eq!(
        parse_failure("1 := 2").error,
        ParseErrorType::InvalidAssignmentTarget
    );
    assert_eq!(
        parse_failure("(a, b) = 2").error,
        ParseErrorType::InvalidAssignmentTarget
    );
}

#[test]
fn test_missing_else() {
    assert_eq!(parse_failure("1 if 2").error, ParseErrorType::ExpectedElse);
    assert_eq!(parse_failure("1 if 2 then 3").error, ParseErrorType::ExpectedElse);
}

#[test]
fn test_trailing_tokens() {
    assert_eq!(
        parse_failure("1 2").error,
        ParseErrorType::UnexpectedToken {
            token: Token::Int(2),
            expected: vec!["end of input".to_string()],
        }
    );
}

#[test]
fn test_lexical_errors_take_priority() {
    let err = parse_failure("1 $ 2");

    match err.error {
        ParseErrorType::LexError { error } => {
            assert_eq!(error.error, LexicalErrorType::UnrecognizedToken { tok: '$' });
        },
        other => panic!("expected a lexical error, got {other:?}"),
    }
}

#[test]
fn test_comment_spans_are_collected() {
    let input = "1 + 2 # hi";
    let lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    let expression = parser.parse().expect("should parse");

    assert_eq!(expression.to_string(), "(1 + 2)");
    assert_eq!(parser.comments.len(), 1);
    assert_eq!(parser.comments[0].start, 6);
    assert_eq!(parser.comments[0].end, 10);
}
