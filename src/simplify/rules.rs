use std::collections::HashMap;

use crate::expr::{one, zero, Expr, Func, Rational};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

const DISTRIBUTE_TERM_LIMIT: usize = 64;

/// Canonical multiset of non-constant factors, used to merge like terms.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub(super) struct TermKey(pub(super) Vec<Expr>);

pub fn simplify(expr: Expr) -> Expr {
    let mut cache = HashMap::new();
    simplify_cached(expr, &mut cache)
}

fn simplify_cached(expr: Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    if let Some(hit) = cache.get(&expr) {
        return hit.clone();
    }

    let key = expr.clone();
    let result = match expr {
        Expr::Add(a, b) => simplify_add(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Sub(a, b) => simplify_sub(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Mul(a, b) => simplify_mul(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Div(a, b) => simplify_div(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Pow(a, b) => simplify_pow(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Neg(a) => simplify_neg(simplify_cached(*a, cache)),
        Expr::Func(f, a) => simplify_func(f, simplify_cached(*a, cache)),
        e => e,
    };

    cache.insert(key, result.clone());
    result
}

fn simplify_func(f: Func, arg: Expr) -> Expr {
    use Func::*;
    match (f, arg) {
        (Sin | Tan | Asin | Atan, a) if a.is_zero() => zero(),
        (Cos | Exp, a) if a.is_zero() => one(),
        (Log, a) if a.is_one() => zero(),
        (Exp, Expr::Func(Log, inner)) => *inner,
        (Log, Expr::Func(Exp, inner)) => *inner,
        (Abs, Expr::Constant(c)) => Expr::Constant(c.abs()),
        (Abs, Expr::Neg(inner)) => simplify_func(Abs, *inner),
        (Abs, Expr::Func(Abs, inner)) => Expr::Func(Abs, inner),
        (Cos, Expr::Neg(inner)) => Expr::Func(Cos, inner),
        (Sin | Tan | Asin | Atan, Expr::Neg(inner)) => simplify_neg(Expr::Func(f, inner)),
        (f, a) => Expr::Func(f, a.boxed()),
    }
}

/// Apply simplification passes until the expression stops changing or we hit the iteration cap.
pub fn simplify_fully(expr: Expr) -> Expr {
    simplify_with_limit(expr, 64)
}

/// Apply simplification passes up to `max_iters`, returning the last value if convergence is not reached.
pub fn simplify_with_limit(expr: Expr, max_iters: usize) -> Expr {
    let mut cache = HashMap::new();
    let mut current = expr;
    for _ in 0..max_iters {
        let next =
            super::trig::combine_once(&simplify_cached(current.clone(), &mut cache), &mut cache);
        if next == current {
            return current;
        }
        current = next;
    }
    current
}

pub(super) fn simplify_in(expr: Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    simplify_cached(expr, cache)
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    rebuild_sum(collect_sum(
        flatten_sum(&x).into_iter().chain(flatten_sum(&y)),
    ))
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    simplify_add(x, simplify_neg(y))
}

pub(super) fn flatten_sum(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Add(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b));
            out
        }
        Expr::Sub(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b).into_iter().map(simplify_neg));
            out
        }
        Expr::Neg(a) => flatten_sum(a).into_iter().map(simplify_neg).collect(),
        other => vec![other.clone()],
    }
}

fn count_sum_terms(expr: &Expr) -> usize {
    match expr {
        Expr::Add(a, b) | Expr::Sub(a, b) => count_sum_terms(a) + count_sum_terms(b),
        Expr::Neg(inner) => count_sum_terms(inner),
        _ => 1,
    }
}

pub(super) fn split_coeff(expr: &Expr) -> (Rational, Expr) {
    match expr {
        Expr::Constant(c) => (c.clone(), one()),
        Expr::Neg(e) => {
            let (c, b) = split_coeff(e);
            (-c, b)
        }
        Expr::Mul(a, b) => {
            let (ca, ba) = split_coeff(a);
            let (cb, bb) = split_coeff(b);
            (ca * cb, mul_norm(ba, bb))
        }
        other => (Rational::one(), other.clone()),
    }
}

fn canonical_factors(expr: &Expr) -> Vec<Expr> {
    merge_powers(flatten_mul(expr))
}

/// Collapse repeated bases in a factor list into powers: `[x, x]` becomes
/// `[x^2]`, and constant exponents over the same base sum.
fn merge_powers(factors: Vec<Expr>) -> Vec<Expr> {
    let mut bases: Vec<(Expr, Rational)> = Vec::new();
    for factor in factors {
        let (base, exp) = match factor {
            Expr::Pow(b, e) => match (b, *e) {
                (b, Expr::Constant(c)) => (*b, c),
                (b, e) => (Expr::Pow(b, e.boxed()), Rational::one()),
            },
            other => (other, Rational::one()),
        };
        match bases.iter_mut().find(|(b, _)| *b == base) {
            Some((_, total)) => *total += exp,
            None => bases.push((base, exp)),
        }
    }
    let mut out: Vec<Expr> = bases
        .into_iter()
        .filter_map(|(base, exp)| {
            if exp.is_zero() {
                None
            } else if exp.is_one() {
                Some(base)
            } else {
                Some(Expr::Pow(base.boxed(), Expr::Constant(exp).boxed()))
            }
        })
        .collect();
    out.sort();
    out
}

pub(super) fn mul_from_sorted_factors(factors: &[Expr]) -> Expr {
    if factors.is_empty() {
        return one();
    }
    let mut iter = factors.iter().cloned();
    let first = iter.next().unwrap();
    iter.fold(first, |acc, item| Expr::Mul(acc.boxed(), item.boxed()))
}

fn mul_norm(a: Expr, b: Expr) -> Expr {
    mk_mul_list(factors(&a).into_iter().chain(factors(&b)).collect())
}

pub(super) fn factors(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Mul(a, b) => {
            let mut out = factors(a);
            out.extend(factors(b));
            out
        }
        t if is_one(t) => vec![],
        t => vec![t.clone()],
    }
}

fn collect_sum<I>(terms: I) -> HashMap<TermKey, Rational>
where
    I: IntoIterator<Item = Expr>,
{
    let mut map = HashMap::new();
    for term in terms {
        let (c, b) = split_coeff(&term);
        if c.is_zero() {
            continue;
        }
        let factors = canonical_factors(&b);
        map.entry(TermKey(factors))
            .and_modify(|acc| *acc += &c)
            .or_insert(c);
    }
    map
}

fn flatten_mul(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Mul(a, b) => {
            let mut out = flatten_mul(a);
            out.extend(flatten_mul(b));
            out
        }
        t if is_one(t) => vec![],
        t => vec![t.clone()],
    }
}

fn rebuild_sum(map: HashMap<TermKey, Rational>) -> Expr {
    let mut map = map;
    let const_term = map
        .remove(&TermKey(Vec::new()))
        .unwrap_or_else(Rational::zero);
    let mut items: Vec<(TermKey, Rational)> = map.into_iter().collect();
    items.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut terms: Vec<Expr> = items
        .into_iter()
        .filter_map(|(TermKey(factors), coef)| {
            if coef.is_zero() {
                None
            } else {
                Some(term_from(&coef, mul_from_sorted_factors(&factors)))
            }
        })
        .collect();

    if !const_term.is_zero() {
        terms.push(Expr::Constant(const_term));
    }

    match terms.len() {
        0 => zero(),
        1 => terms.remove(0),
        _ => mk_add_list(terms),
    }
}

pub(super) fn term_from(coef: &Rational, base: Expr) -> Expr {
    if coef.is_zero() {
        return zero();
    }

    if is_one(&base) {
        return Expr::Constant(coef.clone());
    }

    if coef.is_one() {
        return base;
    }

    if coef == &-Rational::one() {
        return simplify_neg(base);
    }

    Expr::Mul(Expr::Constant(coef.clone()).boxed(), base.boxed())
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Add(a, b), t) => {
            let term_count = (count_sum_terms(&a) + count_sum_terms(&b)) * count_sum_terms(&t);
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_add(simplify_mul(*a, t.clone()), simplify_mul(*b, t))
            } else {
                Expr::Mul(Expr::Add(a, b).boxed(), t.boxed())
            }
        }
        (Expr::Sub(a, b), t) => {
            let term_count = (count_sum_terms(&a) + count_sum_terms(&b)) * count_sum_terms(&t);
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_sub(simplify_mul(*a, t.clone()), simplify_mul(*b, t))
            } else {
                Expr::Mul(Expr::Sub(a, b).boxed(), t.boxed())
            }
        }
        (t, Expr::Add(a, b)) => {
            let term_count = count_sum_terms(&t) * (count_sum_terms(&a) + count_sum_terms(&b));
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_add(simplify_mul(t.clone(), *a), simplify_mul(t, *b))
            } else {
                Expr::Mul(t.boxed(), Expr::Add(a, b).boxed())
            }
        }
        (t, Expr::Sub(a, b)) => {
            let term_count = count_sum_terms(&t) * (count_sum_terms(&a) + count_sum_terms(&b));
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_sub(simplify_mul(t.clone(), *a), simplify_mul(t, *b))
            } else {
                Expr::Mul(t.boxed(), Expr::Sub(a, b).boxed())
            }
        }
        (Expr::Constant(xc), Expr::Constant(yc)) => Expr::Constant(xc * yc),
        (x, y) if x.is_zero() || y.is_zero() => zero(),
        (x, y) if x.is_one() => y,
        (x, y) if y.is_one() => x,
        (x, y) => {
            let (c, b) = split_coeff(&Expr::Mul(x.boxed(), y.boxed()));
            if c.is_zero() {
                zero()
            } else {
                match b {
                    t if is_one(&t) => Expr::Constant(c),
                    _ if c.is_one() => b,
                    _ if c == -Rational::one() => simplify_neg(b),
                    _ => Expr::Mul(Expr::Constant(c).boxed(), b.boxed()),
                }
            }
        }
    }
}

pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(n), Expr::Constant(d)) => {
            if d.is_zero() {
                Expr::Div(Expr::Constant(n).boxed(), Expr::Constant(d).boxed())
            } else {
                Expr::Constant(n / d)
            }
        }
        (x, _) if x.is_zero() => zero(),
        (x, y) if y.is_one() => x,
        (x, y) => {
            let (cx, bx) = split_coeff(&x);
            let (cy, by) = split_coeff(&y);
            let c = cx / cy;
            if bx == by && !is_one(&bx) {
                if c.is_one() {
                    one()
                } else {
                    Expr::Constant(c)
                }
            } else {
                let core = if is_one(&by) {
                    bx
                } else {
                    Expr::Div(bx.boxed(), by.boxed())
                };
                match c.cmp(&Rational::one()) {
                    std::cmp::Ordering::Equal => core,
                    _ => simplify_mul(Expr::Constant(c), core),
                }
            }
        }
    }
}

pub fn simplify_pow(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (_, Expr::Constant(e)) if e.is_zero() => one(),
        (base, Expr::Constant(e)) if e.is_one() => base,
        (Expr::Constant(b), Expr::Constant(e)) => {
            if e.is_integer() {
                let k: BigInt = e.to_integer();
                if let Some(power) = k.abs().to_u32() {
                    if k >= BigInt::zero() {
                        let num = b.numer().pow(power);
                        let den = b.denom().pow(power);
                        return Expr::Constant(Rational::new(num, den));
                    } else if b.is_zero() {
                        return Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed());
                    } else {
                        let num = b.denom().pow(power);
                        let den = b.numer().pow(power);
                        return Expr::Constant(Rational::new(num, den));
                    }
                }
            }
            Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed())
        }
        (x, y) => Expr::Pow(x.boxed(), y.boxed()),
    }
}

pub fn simplify_neg(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(x) => Expr::Constant(-x),
        Expr::Neg(x) => *x,
        other => Expr::Neg(other.boxed()),
    }
}

pub(super) fn is_one(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_one())
}

pub(super) fn mk_add_list(items: Vec<Expr>) -> Expr {
    if items.is_empty() {
        return zero();
    }
    let mut iter = items.into_iter();
    let first = iter.next().unwrap();
    iter.fold(first, |acc, item| Expr::Add(acc.boxed(), item.boxed()))
}

fn mk_mul_list(mut items: Vec<Expr>) -> Expr {
    items.retain(|e| !is_one(e));
    let items = merge_powers(items);
    if items.is_empty() {
        return one();
    }
    let mut iter = items.into_iter();
    let first = iter.next().unwrap();
    iter.fold(first, |acc, item| Expr::Mul(acc.boxed(), item.boxed()))
}
