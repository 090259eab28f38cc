//! LaTeX rendering for expressions.

use crate::expr::{Expr, Func, Rational};
use num_traits::One;

/// Render an expression as LaTeX suitable for a math display block.
pub fn latex(expr: &Expr) -> String {
    render(expr, 0)
}

// Precedence contexts mirror the text printer: 1 additive, 2 multiplicative,
// 3 exponent, 4 atom.
fn render(expr: &Expr, ctx: u8) -> String {
    match expr {
        Expr::Variable(v) => v.clone(),
        Expr::Constant(r) => rational_latex(r),
        Expr::Add(a, b) => {
            let body = format!("{} + {}", render(a, 1), render(b, 2));
            group(ctx, 1, body)
        }
        Expr::Sub(a, b) => {
            let body = format!("{} - {}", render(a, 1), render(b, 2));
            group(ctx, 1, body)
        }
        Expr::Mul(a, b) => {
            let body = format!("{} \\cdot {}", render(a, 2), render(b, 2));
            group(ctx, 2, body)
        }
        Expr::Div(a, b) => format!("\\frac{{{}}}{{{}}}", render(a, 0), render(b, 0)),
        Expr::Pow(a, b) => match &**b {
            Expr::Constant(r) if *r == Rational::new(1.into(), 2.into()) => {
                format!("\\sqrt{{{}}}", render(a, 0))
            }
            _ => {
                let base = render(a, 4);
                group(ctx, 3, format!("{}^{{{}}}", base, render(b, 0)))
            }
        },
        Expr::Neg(a) => group(ctx, 1, format!("-{}", render(a, 2))),
        Expr::Func(Func::Exp, a) => group(ctx, 3, format!("e^{{{}}}", render(a, 0))),
        Expr::Func(Func::Abs, a) => format!("\\left|{}\\right|", render(a, 0)),
        Expr::Func(f, a) => format!("{}\\left({}\\right)", func_latex(*f), render(a, 0)),
    }
}

fn func_latex(f: Func) -> &'static str {
    match f {
        Func::Sin => "\\sin",
        Func::Cos => "\\cos",
        Func::Tan => "\\tan",
        Func::Asin => "\\arcsin",
        Func::Acos => "\\arccos",
        Func::Atan => "\\arctan",
        Func::Log => "\\ln",
        Func::Exp | Func::Abs => "",
    }
}

fn rational_latex(r: &Rational) -> String {
    if r.denom().is_one() {
        format!("{}", r.numer())
    } else if r.numer() < &0.into() {
        format!("-\\frac{{{}}}{{{}}}", -r.numer(), r.denom())
    } else {
        format!("\\frac{{{}}}{{{}}}", r.numer(), r.denom())
    }
}

fn group(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("\\left({body}\\right)")
    } else {
        body
    }
}
