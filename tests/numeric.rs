use approx::assert_relative_eq;
use calclab::numeric::{compile, eval, sample, simpson, to_float};
use calclab::parse_expr;

#[test]
fn tree_walker_and_tape_agree() {
    let expr = parse_expr("x^2 + sin(x) - 3/x").expect("parse");
    let tape = compile(&expr, "x").expect("compile");
    for x in [0.5, 1.0, 2.25, -3.0] {
        assert_relative_eq!(eval(&expr, "x", x), tape.call(x), epsilon = 1e-12);
    }
}

#[test]
fn simpson_is_exact_for_cubics() {
    let expr = parse_expr("x^3").expect("parse");
    let tape = compile(&expr, "x").expect("compile");
    assert_relative_eq!(simpson(&tape, 0.0, 2.0, 10), 4.0, epsilon = 1e-12);
}

#[test]
fn simpson_rounds_odd_subinterval_counts_up() {
    let expr = parse_expr("x^3").expect("parse");
    let tape = compile(&expr, "x").expect("compile");
    // 3 becomes 4, which is still exact for a cubic.
    assert_relative_eq!(simpson(&tape, 0.0, 1.0, 3), 0.25, epsilon = 1e-12);
}

#[test]
fn simpson_handles_transcendentals() {
    let expr = parse_expr("sin(x)").expect("parse");
    let tape = compile(&expr, "x").expect("compile");
    assert_relative_eq!(
        simpson(&tape, 0.0, std::f64::consts::PI, 1000),
        2.0,
        epsilon = 1e-9
    );
}

#[test]
fn sample_covers_both_endpoints() {
    let expr = parse_expr("x^2").expect("parse");
    let tape = compile(&expr, "x").expect("compile");
    let points = sample(&tape, 0.0, 2.0, 4);
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], (0.0, 0.0));
    assert_relative_eq!(points[4].0, 2.0, epsilon = 1e-12);
    assert_relative_eq!(points[4].1, 4.0, epsilon = 1e-12);
}

#[test]
fn to_float_requires_a_closed_expression() {
    let closed = parse_expr("3/4 + 1").expect("parse");
    assert_relative_eq!(to_float(&closed).expect("closed"), 1.75, epsilon = 1e-12);

    let open = parse_expr("x + 1").expect("parse");
    assert!(to_float(&open).is_err());
}

#[test]
fn unbound_variables_are_nan_in_the_walker() {
    let expr = parse_expr("x*y").expect("parse");
    assert!(eval(&expr, "x", 2.0).is_nan());
}

#[test]
fn compile_rejects_unbound_variables() {
    let expr = parse_expr("x*y").expect("parse");
    assert!(compile(&expr, "x").is_err());
}
