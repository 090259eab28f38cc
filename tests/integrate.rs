use calclab::{integrate, parse_expr, simplify_fully, AnalysisError};

fn assert_integral_eq(var: &str, input: &str, expected: &str) {
    let expr = parse_expr(input).expect("parse input");
    let result = integrate(var, &expr).expect("integrate");
    let got = simplify_fully(result.antiderivative);
    let expected_expr = simplify_fully(parse_expr(expected).expect("parse expected"));
    assert_eq!(got, expected_expr, "integral of {input} d{var}");
}

#[test]
fn constants_and_powers() {
    assert_integral_eq("x", "5", "5*x");
    assert_integral_eq("x", "x", "x^2/2");
    assert_integral_eq("x", "x^3", "x^4/4");
    assert_integral_eq("x", "2*x^2+3*x", "2*x^3/3 + 3*x^2/2");
}

#[test]
fn linear_inner_arguments() {
    assert_integral_eq("x", "(2*x+1)^3", "(2*x+1)^4/8");
    assert_integral_eq("x", "sin(2*x)", "-cos(2*x)/2");
    assert_integral_eq("x", "exp(3*x)", "exp(3*x)/3");
    assert_integral_eq("x", "1/(2*x+3)", "log(2*x+3)/2");
}

#[test]
fn trig_family() {
    assert_integral_eq("x", "sin(x)", "-cos(x)");
    assert_integral_eq("x", "cos(x)", "sin(x)");
    assert_integral_eq("x", "tan(x)", "-log(cos(x))");
}

#[test]
fn logarithms_and_reciprocals() {
    assert_integral_eq("x", "1/x", "log(x)");
    assert_integral_eq("x", "log(x)", "x*log(x) - x");
}

#[test]
fn u_over_u_prime_quotients() {
    assert_integral_eq("x", "x/(x^2+4)", "log(x^2+4)/2");
    assert_integral_eq("x", "(2*x+2)/(x^2+2*x+5)", "log(x^2+2*x+5)");
}

#[test]
fn arctangent_denominators() {
    assert_integral_eq("x", "1/(x^2+1)", "arctan(x)");
}

#[test]
fn partial_fraction_decompositions() {
    assert_integral_eq("x", "(2*x+3)/(x+1)", "2*x + log(x+1)");
    assert_integral_eq("x", "1/(x^2-1)", "log(x-1)/2 - log(x+1)/2");
    assert_integral_eq("x", "(x+2)/(x+1)^2", "log(x+1) - (x+1)^(-1)");
}

#[test]
fn products_are_expanded_before_integrating() {
    assert_integral_eq("x", "(x+1)*(x-2)", "x^3/3 - x^2/2 - 2*x");
}

#[test]
fn integration_is_additive_and_homogeneous() {
    assert_integral_eq("x", "x + sin(x)", "x^2/2 - cos(x)");
    assert_integral_eq("x", "3*cos(x)", "3*sin(x)");
    assert_integral_eq("x", "-sin(x)", "cos(x)");
}

#[test]
fn differentiating_the_antiderivative_restores_the_integrand() {
    for input in ["x^2", "sin(2*x)", "exp(3*x)", "1/(x^2+1)"] {
        let expr = parse_expr(input).expect("parse");
        let anti = integrate("x", &expr).expect("integrate").antiderivative;
        let back = simplify_fully(calclab::differentiate("x", &anti));
        assert_eq!(back, simplify_fully(expr), "{input}");
    }
}

#[test]
fn non_elementary_integrands_error() {
    let expr = parse_expr("exp(x^2)").expect("parse");
    let err = integrate("x", &expr).expect_err("should not integrate");
    assert!(matches!(err, AnalysisError::Evaluation(_)), "{err:?}");
}
