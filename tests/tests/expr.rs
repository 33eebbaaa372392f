//! Expression-evaluator scenarios driven through the table-driven parser.


use common::{assert_close, expr_semantics, expr_tables, result_num, tokenize, END};
use rascent::{ErrorKind, Parser, TermId};

fn eval(input: &str) -> f64 {
    let tables = expr_tables();
    let parser = Parser::with_semantics(&tables, expr_semantics());
    result_num(parser.parse(tokenize(input)).expect("parse must succeed"))
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_close(eval("1 + 2 * 3"), 7.0);
}

#[test]
fn test_power_is_right_associative() {
    assert_close(eval("2 ^ 3 ^ 2"), 512.0);
}

#[test]
fn test_brackets_override_precedence() {
    assert_close(eval("( 1 + 2 ) * 3"), 9.0);
}

#[test]
fn test_function_call() {
    assert_close(eval("sqrt ( 16 )"), 4.0);
}

#[test]
fn test_zero_argument_function_call() {
    assert!((0.0..1.0).contains(&eval("rand01 ( )")));
    assert_close(eval("rand01 ( ) * 0"), 0.0);
}

#[test]
fn test_two_argument_function_call() {
    assert_close(eval("log ( 2 , 8 )"), 3.0);
}

#[test]
fn test_unary_minus() {
    assert_close(eval("1 - -2"), 3.0);
    assert_close(eval("- 2 ^ 2"), -4.0);
}

#[test]
fn test_modulus_and_division_associate_left() {
    assert_close(eval("7 % 4 / 2"), 1.5);
}

#[test]
fn test_identifier_lookup() {
    assert_close(eval("pi * 2"), 2.0 * std::f64::consts::PI);
}

#[test]
fn test_real_literals() {
    assert_close(eval("1.5 * 4"), 6.0);
}

#[test]
fn test_truncated_input_is_a_syntax_error() {
    let tables = expr_tables();
    let parser = Parser::with_semantics(&tables, expr_semantics());

    let err = parser.parse(tokenize("1 +")).unwrap_err();
    match err.kind() {
        ErrorKind::NoAction { lookahead, .. } => {
            assert_eq!(*lookahead, TermId::Num(END));
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
    assert_eq!(err.position(), Some(2));
}

#[test]
fn test_empty_input_is_a_syntax_error() {
    let tables = expr_tables();
    let parser = Parser::with_semantics(&tables, expr_semantics());

    let err = parser.parse(tokenize("")).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NoAction { state: 0, .. }));
}

#[test]
fn test_unbalanced_brackets_are_rejected() {
    let tables = expr_tables();
    let parser = Parser::with_semantics(&tables, expr_semantics());

    assert!(parser.parse(tokenize("( 1 + 2")).is_err());
    assert!(parser.parse(tokenize("1 + 2 )")).is_err());
}

#[test]
fn test_partial_invocations_do_not_change_values() {
    let tables = expr_tables();

    for input in ["1 + 2 * 3", "2 ^ 3 ^ 2", "sqrt ( 16 )", "( 1 - 2 ) * 3"] {
        let with_partials = Parser::with_semantics(&tables, expr_semantics());
        let mut without = Parser::with_semantics(&tables, expr_semantics());
        without.use_partials = false;

        assert_eq!(
            with_partials.parse(tokenize(input)).unwrap(),
            without.parse(tokenize(input)).unwrap(),
        );
    }
}

#[test]
fn test_reparse_is_deterministic() {
    let tables = expr_tables();
    let parser = Parser::with_semantics(&tables, expr_semantics());

    let first = parser.parse(tokenize("sqrt ( 16 ) + 2 ^ 3")).unwrap();
    let second = parser.parse(tokenize("sqrt ( 16 ) + 2 ^ 3")).unwrap();
    assert_eq!(first, second);
}
