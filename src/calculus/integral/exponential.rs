use super::common::{coeff_of_var, scale_by, substitution_step};
use crate::calculus::steps::{Rule, StepNode};
use crate::expr::{func, Expr, Func};

/// `exp(a*x + b)` integrates to itself over the linear coefficient.
pub(super) fn integrate(expr: &Expr, var: &str) -> Option<(Expr, StepNode)> {
    let Expr::Func(Func::Exp, arg) = expr else {
        return None;
    };
    let k = coeff_of_var(arg, var)?;
    Some((
        scale_by(&k, func(Func::Exp, (**arg).clone())),
        substitution_step(arg, var, Rule::Exponential),
    ))
}
