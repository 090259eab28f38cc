//! Rational integrands: partial-fraction decomposition and the arctangent
//! rule for irreducible quadratic denominators.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::calculus::steps::{Rule, StepNode};
use crate::expr::{add, div, func, mul, pow, sub, Expr, Func, Rational};
use crate::poly::{rational_sqrt, Poly};

/// One summand of a partial-fraction decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PartialTerm {
    /// Polynomial part produced by the initial division.
    Quotient(Poly),
    /// `coeff / (x - root)^power`
    LinearPole {
        coeff: Rational,
        root: Rational,
        power: u32,
    },
    /// `(lin*x + constant) / (x^2 + p*x + q)` with `q - p^2/4 > 0`.
    QuadraticPole {
        lin: Rational,
        constant: Rational,
        p: Rational,
        q: Rational,
    },
}

/// Decompose a rational expression in `var` into partial fractions.
///
/// Supported denominators: any product of distinct rational linear factors,
/// a single repeated rational linear factor, or such factors times one
/// irreducible quadratic with a positive-definite completion. Anything else
/// returns `None`.
pub(crate) fn decompose(expr: &Expr, var: &str) -> Option<Vec<PartialTerm>> {
    let (num, den) = match expr {
        Expr::Div(n, d) => (Poly::from_expr(n, var)?, Poly::from_expr(d, var)?),
        other => (Poly::from_expr(other, var)?, Poly::one()),
    };
    if den.is_zero() {
        return None;
    }

    let lc = den.leading_coeff();
    let den = den.scale(&lc.recip());
    let num = num.scale(&lc.recip());

    let mut terms = Vec::new();
    if den.degree() == Some(0) {
        terms.push(PartialTerm::Quotient(num));
        return Some(terms);
    }

    let (quot, rem) = num.div_rem(&den);
    if !quot.is_zero() {
        terms.push(PartialTerm::Quotient(quot));
    }
    if rem.is_zero() {
        return Some(terms);
    }
    let num = rem;

    let (roots, remaining) = den.rational_roots();
    if remaining.degree().is_some_and(|d| d > 2) {
        return None;
    }
    let has_quadratic = remaining.degree() == Some(2);

    if roots.iter().any(|(_, m)| *m > 1) {
        // Only the single repeated pole den == (x - r)^m is supported.
        if has_quadratic || roots.len() != 1 {
            return None;
        }
        let (root, mult) = roots[0].clone();
        let mut deriv = num.clone();
        let mut fact = Rational::one();
        for k in 0..mult {
            if k > 0 {
                deriv = deriv.derivative();
                fact *= Rational::from_integer(BigInt::from(k));
            }
            let coeff = deriv.eval(&root) / &fact;
            if !coeff.is_zero() {
                terms.push(PartialTerm::LinearPole {
                    coeff,
                    root: root.clone(),
                    power: mult - k,
                });
            }
        }
        return Some(terms);
    }

    // Simple poles: cover-up coefficients A_i = N(r_i) / D'(r_i).
    let dden = den.derivative();
    let mut pole_terms: Vec<(Rational, Rational)> = Vec::new();
    for (root, _) in &roots {
        let coeff = num.eval(root) / dden.eval(root);
        pole_terms.push((coeff, root.clone()));
    }

    if has_quadratic {
        // Subtract the simple-pole parts and divide by the linear factors to
        // expose the quadratic numerator.
        let mut residue = num.clone();
        let mut linear_product = Poly::one();
        for (coeff, root) in &pole_terms {
            let cofactor = den.div_exact(&Poly::linear_from_root(root))?;
            residue = residue.sub(&cofactor.scale(coeff));
            linear_product = linear_product.mul(&Poly::linear_from_root(root));
        }
        let quad_num = residue.div_exact(&linear_product)?;
        if quad_num.degree().is_some_and(|d| d > 1) {
            return None;
        }
        let p = remaining.coeff(1);
        let q = remaining.coeff(0);
        let four = Rational::from_integer(4.into());
        if !(q.clone() - &p * &p / four).is_positive() {
            return None;
        }
        for (coeff, root) in pole_terms {
            if !coeff.is_zero() {
                terms.push(PartialTerm::LinearPole {
                    coeff,
                    root,
                    power: 1,
                });
            }
        }
        if !quad_num.is_zero() {
            terms.push(PartialTerm::QuadraticPole {
                lin: quad_num.coeff(1),
                constant: quad_num.coeff(0),
                p,
                q,
            });
        }
        return Some(terms);
    }

    for (coeff, root) in pole_terms {
        if !coeff.is_zero() {
            terms.push(PartialTerm::LinearPole {
                coeff,
                root,
                power: 1,
            });
        }
    }
    Some(terms)
}

pub(crate) fn term_to_expr(term: &PartialTerm, var: &str) -> Expr {
    match term {
        PartialTerm::Quotient(p) => p.to_expr(var),
        PartialTerm::LinearPole { coeff, root, power } => {
            let pole = sub(Expr::var(var), Expr::Constant(root.clone()));
            let den = if *power == 1 {
                pole
            } else {
                pow(pole, Expr::integer(BigInt::from(*power)))
            };
            div(Expr::Constant(coeff.clone()), den)
        }
        PartialTerm::QuadraticPole {
            lin,
            constant,
            p,
            q,
        } => {
            let num = Poly::from_coeffs(vec![constant.clone(), lin.clone()]).to_expr(var);
            div(num, quadratic_expr(p, q, var))
        }
    }
}

pub(super) fn integrate(expr: &Expr, var: &str) -> Option<(Expr, StepNode)> {
    if !matches!(expr, Expr::Div(..)) {
        return None;
    }
    let terms = decompose(expr, var)?;
    let mut parts = Vec::new();
    let mut steps = Vec::new();
    for term in &terms {
        let (part, step) = integrate_partial_term(term, var);
        parts.push(part);
        steps.push(step);
    }
    let combined = parts.into_iter().reduce(add)?;
    let step = if steps.len() == 1 {
        steps.remove(0)
    } else {
        StepNode::Strategy {
            strategy: Rule::PartialFractions,
            substeps: steps,
        }
    };
    Some((combined, step))
}

fn integrate_partial_term(term: &PartialTerm, var: &str) -> (Expr, StepNode) {
    match term {
        PartialTerm::Quotient(p) => {
            let rule = if p.degree() == Some(0) {
                Rule::Constant
            } else {
                Rule::Power
            };
            (p.integral().to_expr(var), StepNode::Leaf { rule })
        }
        PartialTerm::LinearPole {
            coeff,
            root,
            power: 1,
        } => {
            let pole = sub(Expr::var(var), Expr::Constant(root.clone()));
            (
                mul(Expr::Constant(coeff.clone()), func(Func::Log, pole)),
                StepNode::Leaf {
                    rule: Rule::Reciprocal,
                },
            )
        }
        PartialTerm::LinearPole { coeff, root, power } => {
            let next = Rational::one() - Rational::from_integer(BigInt::from(*power));
            let pole = sub(Expr::var(var), Expr::Constant(root.clone()));
            (
                mul(
                    Expr::Constant(coeff / &next),
                    pow(pole, Expr::Constant(next)),
                ),
                StepNode::Leaf { rule: Rule::Power },
            )
        }
        PartialTerm::QuadraticPole {
            lin,
            constant,
            p,
            q,
        } => integrate_quadratic_pole(lin, constant, p, q, var),
    }
}

/// `(lin*x + constant) / (x^2 + p*x + q)` splits into a `u'/u` logarithm and
/// an arctangent of the completed square.
fn integrate_quadratic_pole(
    lin: &Rational,
    constant: &Rational,
    p: &Rational,
    q: &Rational,
    var: &str,
) -> (Expr, StepNode) {
    let two = Rational::from_integer(2.into());
    let four = Rational::from_integer(4.into());
    let u = quadratic_expr(p, q, var);

    let mut parts = Vec::new();
    let mut steps = Vec::new();

    let half_lin = lin / &two;
    if !half_lin.is_zero() {
        parts.push(mul(Expr::Constant(half_lin.clone()), func(Func::Log, u.clone())));
        steps.push(StepNode::Wrapped {
            rule: Rule::USubstitution,
            substep: Box::new(StepNode::Leaf {
                rule: Rule::Reciprocal,
            }),
        });
    }

    let k = constant - &half_lin * p;
    if !k.is_zero() {
        let radius_sq = q - &(&(p * p) / &four);
        let radius = sqrt_expr(&radius_sq);
        let shift = add(
            Expr::var(var),
            Expr::Constant(p / &two),
        );
        let atan = func(Func::Atan, div(shift, radius.clone()));
        parts.push(mul(div(Expr::Constant(k), radius), atan));
        steps.push(StepNode::Leaf {
            rule: Rule::Arctangent,
        });
    }

    let combined = parts
        .into_iter()
        .reduce(add)
        .unwrap_or_else(crate::expr::zero);
    let step = if steps.len() == 1 {
        steps.remove(0)
    } else {
        StepNode::Strategy {
            strategy: Rule::Sum,
            substeps: steps,
        }
    };
    (combined, step)
}

fn quadratic_expr(p: &Rational, q: &Rational, var: &str) -> Expr {
    Poly::from_coeffs(vec![q.clone(), p.clone(), Rational::one()]).to_expr(var)
}

/// Exact constant when the rational is a perfect square, symbolic half power
/// otherwise.
fn sqrt_expr(r: &Rational) -> Expr {
    match rational_sqrt(r) {
        Some(s) => Expr::Constant(s),
        None => pow(
            Expr::Constant(r.clone()),
            Expr::Constant(Rational::new(1.into(), 2.into())),
        ),
    }
}
