//! Dense univariate polynomials with exact rational coefficients.
//!
//! Backing store is an ascending coefficient vector with no trailing zeros;
//! the zero polynomial is the empty vector.

use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::expr::{add, mul, pow, zero as zero_expr, Expr, Rational};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<Rational>,
}

impl Poly {
    pub fn zero() -> Self {
        Poly { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Poly::constant(Rational::one())
    }

    pub fn constant(c: Rational) -> Self {
        Poly::from_coeffs(vec![c])
    }

    /// `x - root`
    pub fn linear_from_root(root: &Rational) -> Self {
        Poly::from_coeffs(vec![-root.clone(), Rational::one()])
    }

    pub fn from_coeffs(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Poly { coeffs }
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    pub fn coeff(&self, power: usize) -> Rational {
        self.coeffs.get(power).cloned().unwrap_or_else(Rational::zero)
    }

    pub fn leading_coeff(&self) -> Rational {
        self.coeffs.last().cloned().unwrap_or_else(Rational::zero)
    }

    pub fn eval(&self, x: &Rational) -> Rational {
        let mut acc = Rational::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    pub fn scale(&self, k: &Rational) -> Self {
        if k.is_zero() {
            return Poly::zero();
        }
        Poly::from_coeffs(self.coeffs.iter().map(|c| c * k).collect())
    }

    pub fn neg(&self) -> Self {
        Poly::from_coeffs(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len).map(|i| self.coeff(i) + other.coeff(i)).collect();
        Poly::from_coeffs(coeffs)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Poly::zero();
        }
        let mut coeffs = vec![Rational::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Poly::from_coeffs(coeffs)
    }

    /// Euclidean division; the divisor must be non-zero.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let Some(ddeg) = divisor.degree() else {
            return (Poly::zero(), self.clone());
        };
        let dlead = divisor.leading_coeff();
        let mut rem = self.clone();
        let mut quot_coeffs =
            vec![Rational::zero(); self.coeffs.len().saturating_sub(divisor.coeffs.len()) + 1];
        while let Some(rdeg) = rem.degree() {
            if rdeg < ddeg {
                break;
            }
            let factor = rem.leading_coeff() / dlead.clone();
            let shift = rdeg - ddeg;
            quot_coeffs[shift] = factor.clone();
            let mut scaled = vec![Rational::zero(); shift];
            scaled.extend(divisor.coeffs.iter().map(|c| c * &factor));
            rem = rem.sub(&Poly::from_coeffs(scaled));
        }
        (Poly::from_coeffs(quot_coeffs), rem)
    }

    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (quot, rem) = self.div_rem(divisor);
        if rem.is_zero() {
            Some(quot)
        } else {
            None
        }
    }

    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Poly::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * Rational::from_integer(BigInt::from(i)))
            .collect();
        Poly::from_coeffs(coeffs)
    }

    /// Antiderivative with zero constant term.
    pub fn integral(&self) -> Self {
        let mut coeffs = vec![Rational::zero()];
        coeffs.extend(
            self.coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| c / Rational::from_integer(BigInt::from(i + 1))),
        );
        Poly::from_coeffs(coeffs)
    }

    /// Convert an expression that is polynomial in `var` (with rational
    /// coefficients) into coefficient form.
    pub fn from_expr(expr: &Expr, var: &str) -> Option<Self> {
        match expr {
            Expr::Constant(c) => Some(Poly::constant(c.clone())),
            Expr::Variable(v) if v == var => {
                Some(Poly::from_coeffs(vec![Rational::zero(), Rational::one()]))
            }
            Expr::Variable(_) => None,
            Expr::Add(a, b) => Some(Poly::from_expr(a, var)?.add(&Poly::from_expr(b, var)?)),
            Expr::Sub(a, b) => Some(Poly::from_expr(a, var)?.sub(&Poly::from_expr(b, var)?)),
            Expr::Mul(a, b) => Some(Poly::from_expr(a, var)?.mul(&Poly::from_expr(b, var)?)),
            Expr::Div(a, b) => {
                if let Expr::Constant(c) = &**b {
                    if c.is_zero() {
                        return None;
                    }
                    return Some(Poly::from_expr(a, var)?.scale(&c.recip()));
                }
                None
            }
            Expr::Pow(base, exp) => {
                let Expr::Constant(e) = &**exp else {
                    return None;
                };
                if !e.is_integer() || e.is_negative() {
                    return None;
                }
                let n = e.to_integer().to_usize()?;
                if n > 64 {
                    return None;
                }
                let base = Poly::from_expr(base, var)?;
                let mut acc = Poly::one();
                for _ in 0..n {
                    acc = acc.mul(&base);
                }
                Some(acc)
            }
            Expr::Neg(a) => Some(Poly::from_expr(a, var)?.neg()),
            Expr::Func(..) => None,
        }
    }

    /// Rebuild as an expression tree; the caller usually simplifies the result.
    pub fn to_expr(&self, var: &str) -> Expr {
        if self.is_zero() {
            return zero_expr();
        }
        let mut terms: Vec<Expr> = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let monomial = match i {
                0 => Expr::Constant(c.clone()),
                _ => {
                    let x = match i {
                        1 => Expr::var(var),
                        _ => pow(Expr::var(var), Expr::integer(BigInt::from(i))),
                    };
                    if c.is_one() {
                        x
                    } else {
                        mul(Expr::Constant(c.clone()), x)
                    }
                }
            };
            terms.push(monomial);
        }
        let mut iter = terms.into_iter();
        let first = iter.next().unwrap_or_else(zero_expr);
        iter.fold(first, add)
    }

    /// Peel off rational roots with multiplicities; returns the roots found
    /// and the root-free remaining factor.
    pub fn rational_roots(&self) -> (Vec<(Rational, u32)>, Poly) {
        let mut rem = self.clone();
        let mut out: Vec<(Rational, u32)> = Vec::new();
        while rem.degree().is_some_and(|d| d >= 1) {
            let Some(root) = rem.find_rational_root() else {
                break;
            };
            let factor = Poly::linear_from_root(&root);
            let mut mult = 0u32;
            while let Some(quot) = rem.div_exact(&factor) {
                rem = quot;
                mult += 1;
            }
            out.push((root, mult));
        }
        (out, rem)
    }

    fn find_rational_root(&self) -> Option<Rational> {
        match self.degree()? {
            0 => None,
            1 => Some(-self.coeff(0) / self.coeff(1)),
            2 => {
                let a = self.coeff(2);
                let b = self.coeff(1);
                let c = self.coeff(0);
                let disc = &b * &b - Rational::from_integer(4.into()) * &a * &c;
                if disc.is_negative() {
                    return None;
                }
                let s = rational_sqrt(&disc)?;
                Some((-b + s) / (Rational::from_integer(2.into()) * a))
            }
            _ => self.search_candidate_roots(),
        }
    }

    /// Rational-root-theorem search over an integerized copy. Gives up when
    /// the leading or trailing coefficient is too large to factor cheaply.
    fn search_candidate_roots(&self) -> Option<Rational> {
        if self.coeff(0).is_zero() {
            return Some(Rational::zero());
        }
        let scale = self
            .coeffs
            .iter()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
        let ints: Vec<BigInt> = self
            .coeffs
            .iter()
            .map(|c| (c * Rational::from_integer(scale.clone())).to_integer())
            .collect();
        let lead = ints.last()?.abs().to_i64()?;
        let tail = ints.first()?.abs().to_i64()?;
        for p in divisors(tail) {
            for q in divisors(lead) {
                for candidate in [
                    Rational::new(BigInt::from(p), BigInt::from(q)),
                    Rational::new(BigInt::from(-p), BigInt::from(q)),
                ] {
                    if self.eval(&candidate).is_zero() {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }
}

/// Exact square root of a non-negative rational, when one exists.
pub fn rational_sqrt(r: &Rational) -> Option<Rational> {
    if r.is_negative() {
        return None;
    }
    let num = r.numer().sqrt();
    let den = r.denom().sqrt();
    if &(&num * &num) == r.numer() && &(&den * &den) == r.denom() {
        Some(Rational::new(num, den))
    } else {
        None
    }
}

fn divisors(n: i64) -> Vec<i64> {
    let n = n.abs().max(1);
    let mut out = Vec::new();
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            out.push(d);
            if d != n / d {
                out.push(n / d);
            }
        }
        d += 1;
    }
    out.sort_unstable();
    out
}
