use super::common::{linear_parts, scale_by, substitution_step};
use crate::calculus::steps::{Rule, StepNode};
use crate::expr::{div, func, pow, Expr, Func, Rational};
use num_traits::{One, Zero};

/// Power-family rules: `x^n`, `(a*x+b)^n`, the `n == -1` logarithm case, and
/// `c / u^m` rewritten as a negative power.
pub(super) fn integrate(expr: &Expr, var: &str) -> Option<(Expr, StepNode)> {
    match expr {
        Expr::Variable(v) if v == var => {
            let half = Expr::Constant(Rational::new(1.into(), 2.into()));
            Some((
                crate::expr::mul(half, pow(Expr::var(var), Expr::integer(2))),
                StepNode::Leaf { rule: Rule::Power },
            ))
        }
        Expr::Pow(base, exp) => {
            let n = constant_exponent(exp)?;
            integrate_linear_power(base, &n, var)
        }
        Expr::Div(num, den) => {
            let Expr::Constant(c) = &**num else {
                return None;
            };
            match &**den {
                Expr::Pow(base, exp) => {
                    let m = constant_exponent(exp)?;
                    let (result, inner) = integrate_linear_power(base, &-m, var)?;
                    let scaled = if c.is_one() {
                        result
                    } else {
                        crate::expr::mul(Expr::Constant(c.clone()), result)
                    };
                    Some((
                        scaled,
                        StepNode::Wrapped {
                            rule: Rule::Rewrite,
                            substep: Box::new(inner),
                        },
                    ))
                }
                other => {
                    // c / (a*x + b) => (c/a) log(a*x + b)
                    let (k, _, v) = linear_parts(other)?;
                    if v != var || k.is_zero() {
                        return None;
                    }
                    let result = scale_by(
                        &(k / c.clone()),
                        func(Func::Log, other.clone()),
                    );
                    Some((result, substitution_step(other, var, Rule::Reciprocal)))
                }
            }
        }
        _ => None,
    }
}

fn integrate_linear_power(base: &Expr, n: &Rational, var: &str) -> Option<(Expr, StepNode)> {
    let (k, _, v) = linear_parts(base)?;
    if v != var || k.is_zero() {
        return None;
    }
    if n == &-Rational::one() {
        let result = scale_by(&k, func(Func::Log, base.clone()));
        return Some((result, substitution_step(base, var, Rule::Reciprocal)));
    }
    let next = n + Rational::one();
    let result = scale_by(
        &k,
        div(
            pow(base.clone(), Expr::Constant(next.clone())),
            Expr::Constant(next),
        ),
    );
    Some((result, substitution_step(base, var, Rule::Power)))
}

pub(super) fn constant_exponent(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Constant(n) => Some(n.clone()),
        Expr::Neg(inner) => match &**inner {
            Expr::Constant(n) => Some(-n.clone()),
            _ => None,
        },
        _ => None,
    }
}
