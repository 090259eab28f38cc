//! Trigonometric-identity pass: merges product pairs such as
//! `sin(u)sin(v) + cos(u)cos(v)` into a single angle-difference term.

use std::collections::HashMap;

use super::rules::{
    factors, flatten_sum, mk_add_list, mul_from_sorted_factors, simplify_in, split_coeff,
    term_from, TermKey,
};
use crate::expr::{Expr, Func, Rational};

#[derive(Clone)]
struct TermMeta {
    coeff: Rational,
    sines: Vec<Expr>,
    coses: Vec<Expr>,
    others: Vec<Expr>,
}

/// Run the pairing pass to a fixed point. The general simplifier is applied
/// after every successful merge.
pub fn simplify_trig(expr: Expr) -> Expr {
    let mut cache = HashMap::new();
    let mut current = simplify_in(expr, &mut cache);
    loop {
        let next = combine_once(&current, &mut cache);
        if next == current {
            return current;
        }
        current = next;
    }
}

pub(super) fn combine_once(expr: &Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    let terms = flatten_sum(expr);
    if let Some((new_term, (i, j))) = combine_trig_pair(&terms) {
        let rest: Vec<Expr> = terms
            .into_iter()
            .enumerate()
            .filter_map(|(idx, t)| if idx == i || idx == j { None } else { Some(t) })
            .collect();
        simplify_in(
            mk_add_list(std::iter::once(new_term).chain(rest).collect::<Vec<_>>()),
            cache,
        )
    } else {
        expr.clone()
    }
}

fn partition_trig(factors: &[Expr]) -> (Vec<Expr>, Vec<Expr>, Vec<Expr>) {
    let mut sines = Vec::new();
    let mut coses = Vec::new();
    let mut others = Vec::new();
    for f in factors {
        match f {
            Expr::Func(Func::Sin, arg) => sines.push(*arg.clone()),
            Expr::Func(Func::Cos, arg) => coses.push(*arg.clone()),
            _ => others.push(f.clone()),
        }
    }
    (sines, coses, others)
}

fn term_meta(expr: &Expr) -> TermMeta {
    let (coeff, core) = split_coeff(expr);
    let factors = factors(&core);
    let (mut sines, mut coses, mut others) = partition_trig(&factors);
    sines.sort();
    coses.sort();
    others.sort();

    TermMeta {
        coeff,
        sines,
        coses,
        others,
    }
}

fn combine_trig_pair(terms: &[Expr]) -> Option<(Expr, (usize, usize))> {
    let metas: Vec<TermMeta> = terms.iter().map(term_meta).collect();
    let mut buckets: HashMap<TermKey, Vec<(usize, TermMeta)>> = HashMap::new();

    for (idx, meta) in metas.into_iter().enumerate() {
        buckets
            .entry(TermKey(meta.others.clone()))
            .or_default()
            .push((idx, meta));
    }

    for entries in buckets.values() {
        for a in 0..entries.len() {
            for b in (a + 1)..entries.len() {
                let (idx_a, meta_a) = &entries[a];
                let (idx_b, meta_b) = &entries[b];
                if let Some(term) = try_trig_pair(meta_a, meta_b) {
                    return Some((term, (*idx_a, *idx_b)));
                }
                if let Some(term) = try_trig_pair(meta_b, meta_a) {
                    return Some((term, (*idx_a, *idx_b)));
                }
            }
        }
    }

    None
}

fn try_trig_pair(lhs: &TermMeta, rhs: &TermMeta) -> Option<Expr> {
    // sin(u)sin(v) + cos(u)cos(v) => cos(u - v)
    if lhs.sines.len() == 2
        && lhs.coses.is_empty()
        && rhs.sines.is_empty()
        && rhs.coses.len() == 2
        && lhs.coeff == rhs.coeff
        && lhs.sines == rhs.coses
    {
        let core = mul_from_sorted_factors(&lhs.others);
        let term = Expr::Func(
            Func::Cos,
            Expr::Sub(lhs.sines[0].clone().boxed(), lhs.sines[1].clone().boxed()).boxed(),
        );
        return Some(term_from(&lhs.coeff, attach_core(core, term)));
    }

    // sin(a)cos(b) + sin(b)cos(a) => sin(a + b)
    if lhs.sines.len() == 1
        && lhs.coses.len() == 1
        && rhs.sines.len() == 1
        && rhs.coses.len() == 1
        && lhs.coeff == rhs.coeff
        && lhs.sines[0] == rhs.coses[0]
        && lhs.coses[0] == rhs.sines[0]
        && lhs.sines[0] != lhs.coses[0]
    {
        let core = mul_from_sorted_factors(&lhs.others);
        let term = Expr::Func(
            Func::Sin,
            Expr::Add(lhs.sines[0].clone().boxed(), lhs.coses[0].clone().boxed()).boxed(),
        );
        return Some(term_from(&lhs.coeff, attach_core(core, term)));
    }

    // sin(a)cos(b) - sin(b)cos(a) => sin(a - b)
    if lhs.sines.len() == 1
        && lhs.coses.len() == 1
        && rhs.sines.len() == 1
        && rhs.coses.len() == 1
        && lhs.coeff == -rhs.coeff.clone()
        && lhs.sines[0] == rhs.coses[0]
        && lhs.coses[0] == rhs.sines[0]
        && lhs.sines[0] != lhs.coses[0]
    {
        let core = mul_from_sorted_factors(&lhs.others);
        let term = Expr::Func(
            Func::Sin,
            Expr::Sub(lhs.sines[0].clone().boxed(), lhs.coses[0].clone().boxed()).boxed(),
        );
        return Some(term_from(&lhs.coeff, attach_core(core, term)));
    }

    None
}

fn attach_core(core: Expr, trig_term: Expr) -> Expr {
    if core.is_one() {
        trig_term
    } else {
        Expr::Mul(core.boxed(), trig_term.boxed())
    }
}
