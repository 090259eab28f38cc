use calclab::{normalize, parse_expr, simplify_fully};

#[test]
fn digit_before_variable_gets_a_star() {
    assert_eq!(normalize("2x"), "2*x");
    assert_eq!(normalize("23x"), "23*x");
    assert_eq!(normalize("2x + 3y"), "2*x + 3*y");
}

#[test]
fn digit_before_paren_and_function() {
    assert_eq!(normalize("3(x+1)"), "3*(x+1)");
    assert_eq!(normalize("3sin(2x)"), "3*sin(2*x)");
}

#[test]
fn adjacent_groups_get_a_star() {
    assert_eq!(normalize("(x+1)(x-2)"), "(x+1)*(x-2)");
    assert_eq!(normalize("(x+1)(x-2)(x+3)"), "(x+1)*(x-2)*(x+3)");
}

#[test]
fn python_power_operator_is_rewritten() {
    assert_eq!(normalize("x**2"), "x^2");
    assert_eq!(normalize("2x**3 + x**2"), "2*x^3 + x^2");
}

#[test]
fn already_explicit_input_is_untouched() {
    assert_eq!(normalize("2*x + sin(x)"), "2*x + sin(x)");
    assert_eq!(normalize("x^2 / (x + 1)"), "x^2 / (x + 1)");
}

#[test]
fn normalization_is_idempotent() {
    for raw in ["2x", "3sin(2x)", "(x+1)(x-2)", "x**2 + 2x", "2(x+1)"] {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once, "{raw}");
    }
}

#[test]
fn letter_juxtaposition_is_left_alone() {
    // `xcos(x)` is ambiguous with a multi-letter identifier, so it passes
    // through unchanged and fails at the parser instead.
    assert_eq!(normalize("xcos(x)"), "xcos(x)");
    assert!(parse_expr("xcos(x)").is_err());
}

#[test]
fn power_binds_tighter_than_division() {
    let quotient = simplify_fully(parse_expr("x^3/3").expect("parse"));
    let grouped = simplify_fully(parse_expr("(x^3)/3").expect("parse"));
    assert_eq!(quotient, grouped);

    // Quotients of literals still reduce to exact constants.
    let fraction = simplify_fully(parse_expr("3/4").expect("parse"));
    assert_eq!(fraction, simplify_fully(parse_expr("0.75").expect("parse")));
}

#[test]
fn normalized_input_parses() {
    for raw in ["2x", "3sin(2x)", "(x+1)(x-2)", "x**2 + 2x", "2(x+1)"] {
        let normalized = normalize(raw);
        assert!(parse_expr(&normalized).is_ok(), "{raw} -> {normalized}");
    }
}
