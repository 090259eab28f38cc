use crate::calculus::steps::{Rule, StepNode};
use crate::expr::{div, Expr, Rational};
use num_traits::{One, Zero};

#[derive(Clone, Debug)]
enum LinearTerm {
    Var(Rational, String),
    Const(Rational),
}

/// Extract (coefficient, constant, variable) from a linear expression `a*x + b`.
pub(super) fn linear_parts(expr: &Expr) -> Option<(Rational, Rational, String)> {
    match expr {
        Expr::Add(a, b) => {
            let left = as_linear_term(a)?;
            let right = as_linear_term(b)?;
            match (left, right) {
                (LinearTerm::Var(coef, var), LinearTerm::Const(c)) => Some((coef, c, var)),
                (LinearTerm::Const(c), LinearTerm::Var(coef, var)) => Some((coef, c, var)),
                (LinearTerm::Var(c1, v1), LinearTerm::Var(c2, v2)) if v1 == v2 => {
                    Some((c1 + c2, Rational::zero(), v1))
                }
                (LinearTerm::Const(c1), LinearTerm::Const(c2)) => {
                    Some((Rational::zero(), c1 + c2, "x".into()))
                }
                _ => None,
            }
        }
        Expr::Sub(a, b) => {
            let left = as_linear_term(a)?;
            let right = as_linear_term(b)?;
            match (left, right) {
                (LinearTerm::Var(coef, var), LinearTerm::Const(c)) => Some((coef, -c, var)),
                (LinearTerm::Const(c), LinearTerm::Var(coef, var)) => Some((-coef, c, var)),
                (LinearTerm::Var(c1, v1), LinearTerm::Var(c2, v2)) if v1 == v2 => {
                    Some((c1 - c2, Rational::zero(), v1))
                }
                (LinearTerm::Const(c1), LinearTerm::Const(c2)) => {
                    Some((Rational::zero(), c1 - c2, "x".into()))
                }
                _ => None,
            }
        }
        Expr::Neg(inner) => {
            let (coef, constant, var) = linear_parts(inner)?;
            Some((-coef, -constant, var))
        }
        Expr::Mul(a, b) => {
            const_var(a, b).map(|(coef, var)| (coef, Rational::zero(), var))
        }
        Expr::Variable(v) => Some((Rational::one(), Rational::zero(), v.clone())),
        Expr::Constant(c) => Some((Rational::zero(), c.clone(), "x".into())),
        _ => None,
    }
}

/// Return the coefficient k in a linear term `k*var + b` if the expression is
/// linear in `var` with k non-zero.
pub(super) fn coeff_of_var(expr: &Expr, var: &str) -> Option<Rational> {
    if let Some((coef, _, v)) = linear_parts(expr) {
        if v == var && !coef.is_zero() {
            return Some(coef);
        }
    }
    None
}

fn as_linear_term(expr: &Expr) -> Option<LinearTerm> {
    if let Expr::Mul(a, b) = expr {
        if let Some((coef, var)) = const_var(a, b) {
            return Some(LinearTerm::Var(coef, var));
        }
    }
    match expr {
        Expr::Variable(v) => Some(LinearTerm::Var(Rational::one(), v.clone())),
        Expr::Constant(c) => Some(LinearTerm::Const(c.clone())),
        Expr::Neg(inner) => match as_linear_term(inner)? {
            LinearTerm::Var(c, v) => Some(LinearTerm::Var(-c, v)),
            LinearTerm::Const(c) => Some(LinearTerm::Const(-c)),
        },
        _ => None,
    }
}

fn const_var(a: &Expr, b: &Expr) -> Option<(Rational, String)> {
    match (a, b) {
        (Expr::Constant(c), Expr::Variable(v)) => Some((c.clone(), v.clone())),
        (Expr::Variable(v), Expr::Constant(c)) => Some((c.clone(), v.clone())),
        _ => None,
    }
}

pub(super) fn is_constant_wrt(expr: &Expr, var: &str) -> bool {
    match expr {
        Expr::Variable(v) => v != var,
        Expr::Constant(_) => true,
        Expr::Add(a, b)
        | Expr::Sub(a, b)
        | Expr::Mul(a, b)
        | Expr::Div(a, b)
        | Expr::Pow(a, b) => is_constant_wrt(a, var) && is_constant_wrt(b, var),
        Expr::Neg(a) | Expr::Func(_, a) => is_constant_wrt(a, var),
    }
}

/// Divide an antiderivative through by the inner linear coefficient.
pub(super) fn scale_by(k: &Rational, expr: Expr) -> Expr {
    if k.is_one() {
        expr
    } else {
        div(expr, Expr::Constant(k.clone()))
    }
}

/// Leaf step, wrapped in a linear-substitution node when the argument was not
/// the plain variable.
pub(super) fn substitution_step(arg: &Expr, var: &str, rule: Rule) -> StepNode {
    let plain = matches!(arg, Expr::Variable(v) if v == var);
    let leaf = StepNode::Leaf { rule };
    if plain {
        leaf
    } else {
        StepNode::Wrapped {
            rule: Rule::LinearSubstitution,
            substep: Box::new(leaf),
        }
    }
}
