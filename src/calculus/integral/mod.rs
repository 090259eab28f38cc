//! Symbolic antidifferentiation with a record of the rules applied.
//!
//! Each rule module recognises one family of integrands and returns both the
//! antiderivative and the [`StepNode`] describing how it was obtained. The
//! dispatcher tries them in order from cheapest to most structural.

mod common;
mod exponential;
mod logarithmic;
mod power;
pub(crate) mod rational;
mod trig;

use crate::calculus::derivative::differentiate;
use crate::calculus::steps::{Rule, StepNode};
use crate::error::{AnalysisError, Result};
use crate::expr::{add, mul, neg, Expr, Rational};
use crate::simplify::simplify_fully;
use common::is_constant_wrt;
use num_traits::{One, Zero};

/// An antiderivative together with the tree of rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integration {
    pub antiderivative: Expr,
    pub steps: StepNode,
}

/// Integrate `expr` with respect to `var`.
///
/// Errors with [`AnalysisError::Evaluation`] when no rule chain applies, which
/// covers integrands without an elementary antiderivative as well as ones
/// outside the rule set.
pub fn integrate(var: &str, expr: &Expr) -> Result<Integration> {
    if let Some((antiderivative, steps)) = integrate_term(expr, var) {
        return Ok(Integration {
            antiderivative,
            steps,
        });
    }
    // Products and other shapes the rules don't match directly often reduce
    // to a sum of recognisable terms.
    let reduced = simplify_fully(expr.clone());
    if reduced != *expr {
        if let Some((antiderivative, steps)) = integrate_term(&reduced, var) {
            return Ok(Integration {
                antiderivative,
                steps: StepNode::Wrapped {
                    rule: Rule::Rewrite,
                    substep: Box::new(steps),
                },
            });
        }
    }
    Err(AnalysisError::Evaluation(format!(
        "no elementary antiderivative for {expr}"
    )))
}

fn integrate_term(expr: &Expr, var: &str) -> Option<(Expr, StepNode)> {
    if is_constant_wrt(expr, var) {
        return Some((
            mul(expr.clone(), Expr::var(var)),
            StepNode::Leaf {
                rule: Rule::Constant,
            },
        ));
    }

    let terms = split_sum(expr);
    if terms.len() > 1 {
        let mut parts = Vec::with_capacity(terms.len());
        let mut steps = Vec::with_capacity(terms.len());
        for term in &terms {
            let (part, step) = integrate_term(term, var)?;
            parts.push(part);
            steps.push(step);
        }
        let combined = parts.into_iter().reduce(add)?;
        return Some((
            combined,
            StepNode::Strategy {
                strategy: Rule::Sum,
                substeps: steps,
            },
        ));
    }

    if let Expr::Neg(inner) = expr {
        let (part, step) = integrate_term(inner, var)?;
        return Some((
            neg(part),
            StepNode::Wrapped {
                rule: Rule::ConstantMultiple,
                substep: Box::new(step),
            },
        ));
    }

    if let Some((coeff, inner)) = split_constant_factor(expr) {
        let (part, step) = integrate_term(&inner, var)?;
        return Some((
            mul(Expr::Constant(coeff), part),
            StepNode::Wrapped {
                rule: Rule::ConstantMultiple,
                substep: Box::new(step),
            },
        ));
    }

    power::integrate(expr, var)
        .or_else(|| trig::integrate(expr, var))
        .or_else(|| exponential::integrate(expr, var))
        .or_else(|| logarithmic::integrate(expr, var))
        .or_else(|| log_derivative(expr, var))
        .or_else(|| rational::integrate(expr, var))
}

/// Flatten nested sums and differences into a list of signed terms.
fn split_sum(expr: &Expr) -> Vec<Expr> {
    fn walk(expr: &Expr, negate: bool, out: &mut Vec<Expr>) {
        match expr {
            Expr::Add(a, b) => {
                walk(a, negate, out);
                walk(b, negate, out);
            }
            Expr::Sub(a, b) => {
                walk(a, negate, out);
                walk(b, !negate, out);
            }
            other => out.push(if negate {
                neg(other.clone())
            } else {
                other.clone()
            }),
        }
    }
    let mut out = Vec::new();
    walk(expr, false, &mut out);
    out
}

/// Pull a non-trivial constant coefficient out of a product or quotient.
fn split_constant_factor(expr: &Expr) -> Option<(Rational, Expr)> {
    let (coeff, rest) = match expr {
        Expr::Mul(a, b) => match (&**a, &**b) {
            (Expr::Constant(c), e) | (e, Expr::Constant(c)) => (c.clone(), e.clone()),
            _ => return None,
        },
        Expr::Div(num, den) => match (&**num, &**den) {
            (e, Expr::Constant(c)) if !c.is_zero() => (c.recip(), e.clone()),
            (Expr::Constant(c), e) if !c.is_one() => (
                c.clone(),
                Expr::Div(Box::new(Expr::integer(1)), Box::new(e.clone())),
            ),
            _ => return None,
        },
        _ => return None,
    };
    if coeff.is_one() {
        None
    } else {
        Some((coeff, rest))
    }
}

/// `u'/u` quotients: when the numerator is a constant multiple of the
/// denominator's derivative the integral is that multiple of `log u`.
fn log_derivative(expr: &Expr, var: &str) -> Option<(Expr, StepNode)> {
    let Expr::Div(num, den) = expr else {
        return None;
    };
    let d_den = simplify_fully(differentiate(var, den));
    if is_constant_wrt(&d_den, var) {
        return None;
    }
    let ratio = simplify_fully(Expr::Div(num.clone(), Box::new(d_den)));
    if !is_constant_wrt(&ratio, var) {
        return None;
    }
    let log = Expr::Func(crate::expr::Func::Log, den.clone());
    let result = if ratio.is_one() { log } else { mul(ratio, log) };
    Some((
        result,
        StepNode::Wrapped {
            rule: Rule::USubstitution,
            substep: Box::new(StepNode::Leaf {
                rule: Rule::Reciprocal,
            }),
        },
    ))
}
