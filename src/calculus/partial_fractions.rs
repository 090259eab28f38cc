//! Standalone partial-fraction decomposition for display purposes.

use crate::calculus::integral::rational::{decompose, term_to_expr};
use crate::expr::{add, Expr};
use crate::simplify::simplify;

/// Rewrite a rational expression in `var` as a sum of partial fractions.
///
/// Returns `None` when the expression is not rational in `var` or its
/// denominator does not factor over the supported field.
pub fn partial_fractions(var: &str, expr: &Expr) -> Option<Expr> {
    let terms = decompose(expr, var)?;
    let combined = terms
        .iter()
        .map(|t| term_to_expr(t, var))
        .reduce(add)?;
    Some(simplify(combined))
}
