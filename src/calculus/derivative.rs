use crate::expr::{div, func, mul, neg, one, pow, sub, Expr, Func, Rational};
use crate::simplify::{simplify, simplify_add, simplify_sub};
use num_traits::{One, Zero};

pub fn differentiate(var: &str, expr: &Expr) -> Expr {
    Differentiator { var }.derive(expr)
}

struct Differentiator<'a> {
    var: &'a str,
}

impl Differentiator<'_> {
    fn derive(&self, expr: &Expr) -> Expr {
        match expr {
            Expr::Variable(name) if name == self.var => Expr::Constant(Rational::one()),
            Expr::Variable(_) => Expr::Constant(Rational::zero()),
            Expr::Constant(_) => Expr::Constant(Rational::zero()),

            Expr::Add(a, b) => simplify_add(self.derive(a), self.derive(b)),
            Expr::Sub(a, b) => simplify_sub(self.derive(a), self.derive(b)),
            Expr::Mul(a, b) => self.product_rule(a, b),
            Expr::Div(a, b) => self.quotient_rule(a, b),
            Expr::Pow(a, b) => self.power_rule(a, b),
            Expr::Neg(a) => simplify(neg(self.derive(a))),

            Expr::Func(f, a) => self.chain_rule(*f, a),
        }
    }

    fn chain_rule(&self, f: Func, arg: &Expr) -> Expr {
        let da = self.derive(arg);
        let minus_half = Expr::Constant(Rational::new((-1).into(), 2.into()));
        let one_minus_sq = || sub(one(), pow(arg.clone(), Expr::integer(2)));
        let outer = match f {
            Func::Sin => func(Func::Cos, arg.clone()),
            Func::Cos => neg(func(Func::Sin, arg.clone())),
            Func::Tan => div(one(), pow(func(Func::Cos, arg.clone()), Expr::integer(2))),
            Func::Asin => pow(one_minus_sq(), minus_half),
            Func::Acos => neg(pow(one_minus_sq(), minus_half)),
            Func::Atan => div(one(), crate::expr::add(one(), pow(arg.clone(), Expr::integer(2)))),
            Func::Exp => func(Func::Exp, arg.clone()),
            Func::Log => div(one(), arg.clone()),
            Func::Abs => div(arg.clone(), func(Func::Abs, arg.clone())),
        };
        simplify(mul(da, outer))
    }

    fn product_rule(&self, a: &Expr, b: &Expr) -> Expr {
        let da = self.derive(a);
        let db = self.derive(b);
        simplify(crate::expr::add(mul(da, b.clone()), mul(a.clone(), db)))
    }

    fn quotient_rule(&self, a: &Expr, b: &Expr) -> Expr {
        simplify(div(
            sub(
                mul(self.derive(a), b.clone()),
                mul(a.clone(), self.derive(b)),
            ),
            pow(b.clone(), Expr::integer(2)),
        ))
    }

    fn power_rule(&self, base: &Expr, exp: &Expr) -> Expr {
        match exp {
            Expr::Constant(n) => {
                let db = self.derive(base);
                simplify(mul(
                    mul(
                        Expr::Constant(n.clone()),
                        pow(base.clone(), Expr::Constant(n - Rational::one())),
                    ),
                    db,
                ))
            }
            _ => {
                // d/dx f^g = f^g * (g' log f + g f' / f)
                let f = pow(base.clone(), exp.clone());
                let da = self.derive(base);
                let db = self.derive(exp);
                simplify(mul(
                    f,
                    crate::expr::add(
                        mul(db, func(Func::Log, base.clone())),
                        div(mul(exp.clone(), da), base.clone()),
                    ),
                ))
            }
        }
    }
}
