//! Floating-point evaluation: a direct tree walker, a compiled stack tape for
//! repeated evaluation, and composite Simpson quadrature.

use num_traits::ToPrimitive;

use crate::error::{AnalysisError, Result};
use crate::expr::{Expr, Func};

/// Evaluate `expr` at `var = x`. Unbound variables produce `NaN`.
pub fn eval(expr: &Expr, var: &str, x: f64) -> f64 {
    match expr {
        Expr::Variable(v) => {
            if v == var {
                x
            } else {
                f64::NAN
            }
        }
        Expr::Constant(c) => rational_to_f64(c),
        Expr::Add(a, b) => eval(a, var, x) + eval(b, var, x),
        Expr::Sub(a, b) => eval(a, var, x) - eval(b, var, x),
        Expr::Mul(a, b) => eval(a, var, x) * eval(b, var, x),
        Expr::Div(a, b) => eval(a, var, x) / eval(b, var, x),
        Expr::Pow(a, b) => eval(a, var, x).powf(eval(b, var, x)),
        Expr::Neg(a) => -eval(a, var, x),
        Expr::Func(f, a) => apply(*f, eval(a, var, x)),
    }
}

/// Evaluate a closed expression to a finite float.
pub fn to_float(expr: &Expr) -> Result<f64> {
    if let Some(v) = expr.free_variables().into_iter().next() {
        return Err(AnalysisError::Evaluation(format!(
            "expression is not a constant: free variable {v}"
        )));
    }
    let value = eval(expr, "", 0.0);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::Domain(format!(
            "expression {expr} does not evaluate to a finite value"
        )))
    }
}

fn apply(f: Func, x: f64) -> f64 {
    match f {
        Func::Sin => x.sin(),
        Func::Cos => x.cos(),
        Func::Tan => x.tan(),
        Func::Asin => x.asin(),
        Func::Acos => x.acos(),
        Func::Atan => x.atan(),
        Func::Exp => x.exp(),
        Func::Log => x.ln(),
        Func::Abs => x.abs(),
    }
}

fn rational_to_f64(c: &crate::expr::Rational) -> f64 {
    c.to_f64().unwrap_or(f64::NAN)
}

#[derive(Debug, Clone)]
enum Op {
    Push(f64),
    Load,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Neg,
    Apply(Func),
}

/// An expression flattened to postfix form for fast repeated evaluation.
#[derive(Debug, Clone)]
pub struct Compiled {
    ops: Vec<Op>,
}

impl Compiled {
    pub fn call(&self, x: f64) -> f64 {
        let mut stack: Vec<f64> = Vec::with_capacity(8);
        for op in &self.ops {
            match op {
                Op::Push(c) => stack.push(*c),
                Op::Load => stack.push(x),
                Op::Neg => {
                    if let Some(top) = stack.last_mut() {
                        *top = -*top;
                    }
                }
                Op::Apply(f) => {
                    if let Some(top) = stack.last_mut() {
                        *top = apply(*f, *top);
                    }
                }
                binary => {
                    let b = stack.pop().unwrap_or(f64::NAN);
                    let a = stack.pop().unwrap_or(f64::NAN);
                    stack.push(match binary {
                        Op::Add => a + b,
                        Op::Sub => a - b,
                        Op::Mul => a * b,
                        Op::Div => a / b,
                        Op::Pow => a.powf(b),
                        _ => f64::NAN,
                    });
                }
            }
        }
        stack.pop().unwrap_or(f64::NAN)
    }
}

/// Compile `expr` into a tape over the single variable `var`.
pub fn compile(expr: &Expr, var: &str) -> Result<Compiled> {
    let mut ops = Vec::new();
    push_ops(expr, var, &mut ops)?;
    Ok(Compiled { ops })
}

fn push_ops(expr: &Expr, var: &str, ops: &mut Vec<Op>) -> Result<()> {
    match expr {
        Expr::Variable(v) if v == var => ops.push(Op::Load),
        Expr::Variable(v) => {
            return Err(AnalysisError::Evaluation(format!(
                "unbound variable {v} in numeric expression"
            )))
        }
        Expr::Constant(c) => ops.push(Op::Push(rational_to_f64(c))),
        Expr::Add(a, b) => {
            push_ops(a, var, ops)?;
            push_ops(b, var, ops)?;
            ops.push(Op::Add);
        }
        Expr::Sub(a, b) => {
            push_ops(a, var, ops)?;
            push_ops(b, var, ops)?;
            ops.push(Op::Sub);
        }
        Expr::Mul(a, b) => {
            push_ops(a, var, ops)?;
            push_ops(b, var, ops)?;
            ops.push(Op::Mul);
        }
        Expr::Div(a, b) => {
            push_ops(a, var, ops)?;
            push_ops(b, var, ops)?;
            ops.push(Op::Div);
        }
        Expr::Pow(a, b) => {
            push_ops(a, var, ops)?;
            push_ops(b, var, ops)?;
            ops.push(Op::Pow);
        }
        Expr::Neg(a) => {
            push_ops(a, var, ops)?;
            ops.push(Op::Neg);
        }
        Expr::Func(f, a) => {
            push_ops(a, var, ops)?;
            ops.push(Op::Apply(*f));
        }
    }
    Ok(())
}

/// Sample `f` at `n + 1` evenly spaced points across `[a, b]`.
pub fn sample(f: &Compiled, a: f64, b: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(1);
    let h = (b - a) / n as f64;
    (0..=n)
        .map(|i| {
            let x = a + h * i as f64;
            (x, f.call(x))
        })
        .collect()
}

/// Composite Simpson quadrature over `[a, b]` with `n` subintervals.
///
/// `n` is rounded up to the next even count.
pub fn simpson(f: &Compiled, a: f64, b: f64, n: usize) -> f64 {
    let n = {
        let n = n.max(2);
        if n % 2 == 0 {
            n
        } else {
            n + 1
        }
    };
    let h = (b - a) / n as f64;
    let mut acc = f.call(a) + f.call(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        acc += weight * f.call(a + h * i as f64);
    }
    acc * h / 3.0
}
