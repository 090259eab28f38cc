use super::common::{coeff_of_var, scale_by, substitution_step};
use crate::calculus::steps::{Rule, StepNode};
use crate::expr::{func, neg, Expr, Func};

/// Sine, cosine, and tangent of a linear argument.
pub(super) fn integrate(expr: &Expr, var: &str) -> Option<(Expr, StepNode)> {
    let Expr::Func(f, arg) = expr else {
        return None;
    };
    let k = coeff_of_var(arg, var)?;
    let (result, rule) = match f {
        Func::Sin => (neg(func(Func::Cos, (**arg).clone())), Rule::Sine),
        Func::Cos => (func(Func::Sin, (**arg).clone()), Rule::Cosine),
        Func::Tan => (
            neg(func(Func::Log, func(Func::Cos, (**arg).clone()))),
            Rule::Tangent,
        ),
        _ => return None,
    };
    Some((scale_by(&k, result), substitution_step(arg, var, rule)))
}
