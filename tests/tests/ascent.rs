//! Equivalence of the generated recursive-ascent parsers with the
//! table-driven interpreter: same accepted language, same values, same
//! partial-invocation behavior.


#[path = "generated/diff_parser.rs"]
mod diff_parser;
#[path = "generated/expr_parser.rs"]
mod expr_parser;

use common::{
    assert_close, diff_semantics, diff_tables, expr_semantics, expr_tables, result_num,
    result_pair, tokenize, Value,
};
use rascent::{NoCustomError, Symbol};

fn driven(input: &str) -> rascent::RascentResult<Option<Symbol<Value>>, NoCustomError> {
    let tables = expr_tables();
    rascent::Parser::with_semantics(&tables, expr_semantics()).parse(tokenize(input))
}

fn ascended(input: &str) -> rascent::RascentResult<Option<Symbol<Value>>, NoCustomError> {
    expr_parser::Parser::new(expr_semantics()).parse(tokenize(input))
}

#[test]
fn test_generated_parser_accepts_the_same_values() {
    for input in [
        "1 + 2 * 3",
        "2 ^ 3 ^ 2",
        "( 1 + 2 ) * 3",
        "sqrt ( 16 )",
        "log ( 2 , 8 )",
        "pow ( 2 , 5 )",
        "+ 3 * 2",
        "1 - -2",
        "- 2 ^ 2",
        "7 % 4 / 2",
        "pi * 2",
        "1.5 * 4",
    ] {
        let interpreted = driven(input).expect("interpreter must accept");
        let generated = ascended(input).expect("generated parser must accept");
        assert_eq!(interpreted, generated, "diverged on {:?}", input);
    }
}

#[test]
fn test_generated_parser_rejects_the_same_inputs() {
    for input in ["", "1 +", "( 1 + 2", "1 + 2 )", "1 2"] {
        assert!(driven(input).is_err(), "interpreter accepted {:?}", input);
        assert!(ascended(input).is_err(), "generated parser accepted {:?}", input);
    }
}

#[test]
fn test_generated_parser_scenarios() {
    assert_close(result_num(ascended("1 + 2 * 3").unwrap()), 7.0);
    assert_close(result_num(ascended("2 ^ 3 ^ 2").unwrap()), 512.0);
    assert_close(result_num(ascended("( 1 + 2 ) * 3").unwrap()), 9.0);
    assert_close(result_num(ascended("sqrt ( 16 )").unwrap()), 4.0);
}

#[test]
fn test_generated_parser_runs_partial_bindings() {
    let (symtab, semantics) = diff_semantics();
    let parser = diff_parser::Parser::new(semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 5 , x * x")).unwrap());

    assert_close(value, 25.0);
    assert_close(derivative, 10.0);
    assert_close(symtab.borrow().vars["x"], 5.0);
}

#[test]
fn test_generated_parser_honors_disabled_partials() {
    let (symtab, semantics) = diff_semantics();
    let mut parser = diff_parser::Parser::new(semantics);
    parser.use_partials = false;

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 5 , x * x")).unwrap());

    assert_close(value, 9.0);
    assert_close(derivative, 6.0);
    assert_close(symtab.borrow().vars["x"], 3.0);
}

#[test]
fn test_generated_and_driven_partial_modes_match() {
    let tables = diff_tables();

    for use_partials in [true, false] {
        let (_, semantics) = diff_semantics();
        let mut driven = rascent::Parser::with_semantics(&tables, semantics);
        driven.use_partials = use_partials;

        let (_, semantics) = diff_semantics();
        let mut generated = diff_parser::Parser::new(semantics);
        generated.use_partials = use_partials;

        let input = "x = sqrt ( 16 ) , x ^ 2";
        assert_eq!(
            driven.parse(tokenize(input)).unwrap(),
            generated.parse(tokenize(input)).unwrap(),
        );
    }
}
