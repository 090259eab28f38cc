use approx::assert_relative_eq;
use calclab::{analyze, parse_expr, pretty, simplify_fully, AnalysisError};

#[test]
fn quadratic_end_to_end() {
    let analysis = analyze("x^2", 0.0, 3.0).expect("analyze");
    assert_eq!(analysis.variable, "x");
    assert_eq!(pretty(analysis.derivative.as_ref().expect("derivative")), "2*x");
    let anti = analysis.antiderivative.as_ref().expect("antiderivative");
    assert_eq!(
        *anti,
        simplify_fully(parse_expr("x^3/3").expect("parse expected"))
    );
    assert_relative_eq!(analysis.definite.expect("definite"), 9.0, epsilon = 1e-9);
}

#[test]
fn informal_input_is_normalized_first() {
    let analysis = analyze("2x + 3", 0.0, 1.0).expect("analyze");
    assert_eq!(analysis.raw, "2x + 3");
    assert_eq!(analysis.normalized, "2*x + 3");
    assert_relative_eq!(analysis.definite.expect("definite"), 4.0, epsilon = 1e-9);
}

#[test]
fn parse_failure_is_the_only_fatal_error() {
    let err = analyze("x +* 2", 0.0, 1.0).expect_err("should fail");
    assert!(matches!(err, AnalysisError::Parse(_)), "{err:?}");
}

#[test]
fn linear_input_end_to_end() {
    let analysis = analyze("2x", 0.0, 1.0).expect("analyze");
    assert_eq!(analysis.normalized, "2*x");
    assert_eq!(pretty(analysis.derivative.as_ref().expect("derivative")), "2");
    assert_eq!(
        *analysis.antiderivative.as_ref().expect("antiderivative"),
        simplify_fully(parse_expr("x^2").expect("parse expected"))
    );
    assert_relative_eq!(analysis.definite.expect("definite"), 1.0, epsilon = 1e-9);
}

#[test]
fn definite_integrals_are_additive_over_adjacent_intervals() {
    let whole = analyze("x^2 + sin(x)", 0.0, 2.0)
        .expect("analyze")
        .definite
        .expect("definite");
    let left = analyze("x^2 + sin(x)", 0.0, 0.75)
        .expect("analyze")
        .definite
        .expect("definite");
    let right = analyze("x^2 + sin(x)", 0.75, 2.0)
        .expect("analyze")
        .definite
        .expect("definite");
    assert_relative_eq!(whole, left + right, epsilon = 1e-9);
}

#[test]
fn reversed_bounds_negate_the_integral() {
    let analysis = analyze("x^2", 3.0, 0.0).expect("analyze");
    assert_relative_eq!(analysis.definite.expect("definite"), -9.0, epsilon = 1e-9);
}

#[test]
fn empty_interval_is_zero() {
    let analysis = analyze("sin(x)", 2.0, 2.0).expect("analyze");
    assert_eq!(analysis.definite.expect("definite"), 0.0);
}

#[test]
fn non_elementary_integrands_keep_the_other_fields() {
    let analysis = analyze("exp(x^2)", 0.0, 1.0).expect("analyze");
    assert!(analysis.derivative.is_ok());
    assert!(matches!(
        analysis.antiderivative,
        Err(AnalysisError::Evaluation(_))
    ));
    assert!(matches!(
        analysis.steps,
        Err(AnalysisError::UnsupportedSteps)
    ));
    // No antiderivative, so the definite integral falls back to quadrature.
    assert_relative_eq!(
        analysis.definite.expect("definite"),
        1.462_651_745_9,
        epsilon = 1e-6
    );
    assert!(analysis.partial_fractions.is_none());
}

#[test]
fn division_after_a_power_keeps_conventional_precedence() {
    let analysis = analyze("x^3/3", 0.0, 3.0).expect("analyze");
    assert_eq!(
        simplify_fully(analysis.expr.clone()),
        simplify_fully(parse_expr("(x^3)/3").expect("parse expected"))
    );
    assert_relative_eq!(analysis.definite.expect("definite"), 6.75, epsilon = 1e-9);
}

#[test]
fn interior_singularities_are_a_domain_error() {
    // -1/x is finite at both endpoints, so the endpoint difference alone
    // would report -2 for a divergent positive integrand.
    let analysis = analyze("1/x^2", -1.0, 1.0).expect("analyze");
    assert!(matches!(analysis.definite, Err(AnalysisError::Domain(_))));
}

#[test]
fn out_of_domain_intervals_report_a_domain_error() {
    // log is undefined on the whole interval, so both the exact route and
    // the quadrature fallback come back non-finite.
    let analysis = analyze("log(x)", -2.0, -1.0).expect("analyze");
    assert!(matches!(analysis.definite, Err(AnalysisError::Domain(_))));
}

#[test]
fn variable_is_inferred_from_the_input() {
    let analysis = analyze("sin(t)", 0.0, std::f64::consts::PI).expect("analyze");
    assert_eq!(analysis.variable, "t");
    assert_relative_eq!(analysis.definite.expect("definite"), 2.0, epsilon = 1e-9);

    let constant = analyze("5", 0.0, 2.0).expect("analyze");
    assert_eq!(constant.variable, "x");
    assert_relative_eq!(constant.definite.expect("definite"), 10.0, epsilon = 1e-9);
}

#[test]
fn partial_fractions_only_appear_when_they_say_something_new() {
    let rational = analyze("(2x+3)/(x+1)", 0.0, 1.0).expect("analyze");
    assert!(rational.partial_fractions.is_some());

    let poly = analyze("x^2 + 1", 0.0, 1.0).expect("analyze");
    assert!(poly.partial_fractions.is_none());
}

#[test]
fn step_lines_narrate_the_derivation() {
    let analysis = analyze("sin(2x)", 0.0, 1.0).expect("analyze");
    let lines = analysis.step_lines().expect("steps");
    assert_eq!(
        lines,
        vec![
            "strategy: direct integration by fundamental rules",
            "  rewrite via linear substitution",
            "    apply the sine rule",
        ]
    );

    let sum = analyze("x + sin(x)", 0.0, 1.0).expect("analyze");
    let lines = sum.step_lines().expect("steps");
    assert_eq!(lines[0], "strategy: term-by-term integration");
}

#[test]
fn latex_rendering() {
    let analysis = analyze("1/(x^2+1)", 0.0, 1.0).expect("analyze");
    assert_eq!(analysis.latex(), "\\frac{1}{x^{2} + 1}");
    assert_eq!(
        analysis.antiderivative_latex().expect("antiderivative"),
        "\\arctan\\left(x\\right) + C"
    );
    assert_relative_eq!(
        analysis.definite.expect("definite"),
        std::f64::consts::FRAC_PI_4,
        epsilon = 1e-9
    );
}
