//! Differentiator scenarios: forward-mode derivatives with a variable bound
//! from a partial invocation, in both partial modes.


use common::{assert_close, diff_semantics, diff_tables, result_pair, tokenize};
use rascent::Parser;

#[test]
fn test_binding_happens_before_the_expression_is_parsed() {
    let tables = diff_tables();
    let (symtab, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 5 , x * x")).unwrap());

    // `x := 5` was bound on the rule prefix, before `x * x` was evaluated
    assert_close(value, 25.0);
    assert_close(derivative, 10.0);
    assert_close(symtab.borrow().vars["x"], 5.0);
}

#[test]
fn test_disabled_partials_leave_the_stale_binding() {
    let tables = diff_tables();
    let (symtab, semantics) = diff_semantics();
    let mut parser = Parser::with_semantics(&tables, semantics);
    parser.use_partials = false;

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 5 , x * x")).unwrap());

    // without partial invocations the binding action never ran, so the
    // expression saw the pre-seeded `x = 3`
    assert_close(value, 9.0);
    assert_close(derivative, 6.0);
    assert_close(symtab.borrow().vars["x"], 3.0);
}

#[test]
fn test_binding_through_a_function_call() {
    let tables = diff_tables();
    let (_, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = sqrt ( 16 ) , x ^ 2")).unwrap());

    assert_close(value, 16.0);
    assert_close(derivative, 8.0);
}

#[test]
fn test_polynomial_derivative() {
    let tables = diff_tables();
    let (_, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 2 , x ^ 3")).unwrap());

    assert_close(value, 8.0);
    assert_close(derivative, 12.0);
}

#[test]
fn test_modulus_value_with_flat_derivative() {
    let tables = diff_tables();
    let (_, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 5 , x % 3")).unwrap());

    assert_close(value, 2.0);
    assert_close(derivative, 0.0);
}

#[test]
fn test_unary_plus_passes_the_pair_through() {
    let tables = diff_tables();
    let (_, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 4 , + x")).unwrap());

    assert_close(value, 4.0);
    assert_close(derivative, 1.0);
}

#[test]
fn test_zero_argument_call_is_a_constant() {
    let tables = diff_tables();
    let (_, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 1 , rand01 ( )")).unwrap());

    assert!((0.0..1.0).contains(&value));
    assert_close(derivative, 0.0);
}

#[test]
fn test_power_function_chain_rule() {
    let tables = diff_tables();
    let (_, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 2 , pow ( x , 3 )")).unwrap());

    assert_close(value, 8.0);
    assert_close(derivative, 12.0);
}

#[test]
fn test_logarithm_argument_derivative() {
    let tables = diff_tables();
    let (_, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 8 , log ( 2 , x )")).unwrap());

    assert_close(value, 3.0);
    assert_close(derivative, 1.0 / (8.0 * 2.0_f64.ln()));
}

#[test]
fn test_quotient_rule() {
    let tables = diff_tables();
    let (_, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("x = 3 , x / ( x + 1 )")).unwrap());

    assert_close(value, 0.75);
    assert_close(derivative, 0.0625);
}

#[test]
fn test_rebinding_the_differentiation_variable() {
    let tables = diff_tables();
    let (symtab, semantics) = diff_semantics();
    let parser = Parser::with_semantics(&tables, semantics);

    let (value, derivative) =
        result_pair(parser.parse(tokenize("y = 4 , y * y + 1")).unwrap());

    assert_close(value, 17.0);
    assert_close(derivative, 8.0);
    assert_eq!(symtab.borrow().diff_var, "y");
}
