use super::common::{coeff_of_var, scale_by, substitution_step};
use crate::calculus::steps::{Rule, StepNode};
use crate::expr::{func, mul, sub, Expr, Func};

/// `log(a*x + b)` via the linear change of variables: `(u log u - u) / a`.
pub(super) fn integrate(expr: &Expr, var: &str) -> Option<(Expr, StepNode)> {
    let Expr::Func(Func::Log, arg) = expr else {
        return None;
    };
    let k = coeff_of_var(arg, var)?;
    let u = (**arg).clone();
    let result = sub(mul(u.clone(), func(Func::Log, u.clone())), u);
    Some((
        scale_by(&k, result),
        substitution_step(arg, var, Rule::Logarithm),
    ))
}
