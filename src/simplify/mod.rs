//! Algebraic simplification: constant folding, term collection, and a
//! trigonometric-identity pass.

mod rules;
mod trig;

pub use rules::{
    simplify, simplify_add, simplify_div, simplify_fully, simplify_mul, simplify_neg, simplify_pow,
    simplify_sub, simplify_with_limit,
};
pub use trig::simplify_trig;
