//! Recursive-descent expression parser.
//!
//! The grammar expects explicit operators everywhere; the lexical normalizer
//! in [`crate::input`] is responsible for rewriting casual juxtaposition
//! before text reaches this module. `^` is the power operator and decimal
//! literals are converted to exact rationals.

use crate::error::{AnalysisError, Result};
use crate::expr::{Expr, Func, Rational};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::error::VerboseError;
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;
use num_bigint::BigInt;
use num_traits::Num;

pub fn parse_expr(input: &str) -> Result<Expr> {
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(e) => Err(AnalysisError::Parse(format!("{e:?}"))),
    }
}

fn parse_add_sub(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            '-' => Expr::Sub(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    let (rest, init) = parse_pow(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), parse_pow),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            '/' => Expr::Div(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_pow(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    let (rest, base) = parse_unary(input)?;
    if let Ok((next, exp)) = preceded(ws(char('^')), parse_pow)(rest) {
        Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
    } else {
        Ok((rest, base))
    }
}

fn parse_unary(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_unary)(input) {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else {
        parse_primary(input)
    }
}

fn parse_primary(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    alt((
        parse_parens,
        parse_decimal,
        parse_function,
        parse_number,
        parse_identifier,
    ))(input)
}

fn parse_parens(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_number(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    map(parse_int, |n| Expr::Constant(Rational::from_integer(n)))(input)
}

/// Decimal literals become exact rationals: `0.25` is `1/4`, not a float.
fn parse_decimal(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    map_res(
        ws(recognize(tuple((digit1, char('.'), digit1)))),
        |s: &str| -> std::result::Result<Expr, num_bigint::ParseBigIntError> {
            let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
            let digits = format!("{int_part}{frac_part}");
            let numer = BigInt::from_str_radix(&digits, 10)?;
            let denom = BigInt::from(10u32).pow(frac_part.len() as u32);
            Ok(Expr::Constant(Rational::new(numer, denom)))
        },
    )(input)
}

fn parse_identifier(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    map(ws(nom::character::complete::alpha1), |s: &str| {
        Expr::Variable(s.to_string())
    })(input)
}

fn parse_function(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    let (rest, (name, arg)) = pair(
        alt((
            tag("arcsin"),
            tag("arccos"),
            tag("arctan"),
            tag("asin"),
            tag("acos"),
            tag("atan"),
            tag("sqrt"),
            tag("sin"),
            tag("cos"),
            tag("tan"),
            tag("exp"),
            tag("log"),
            tag("ln"),
            tag("abs"),
        )),
        alt((
            delimited(ws(char('(')), parse_add_sub, ws(char(')'))),
            parse_primary,
        )),
    )(input)?;

    let expr = match name {
        "sin" => Expr::Func(Func::Sin, arg.boxed()),
        "cos" => Expr::Func(Func::Cos, arg.boxed()),
        "tan" => Expr::Func(Func::Tan, arg.boxed()),
        "arcsin" | "asin" => Expr::Func(Func::Asin, arg.boxed()),
        "arccos" | "acos" => Expr::Func(Func::Acos, arg.boxed()),
        "arctan" | "atan" => Expr::Func(Func::Atan, arg.boxed()),
        "exp" => Expr::Func(Func::Exp, arg.boxed()),
        "log" | "ln" => Expr::Func(Func::Log, arg.boxed()),
        "abs" => Expr::Func(Func::Abs, arg.boxed()),
        "sqrt" => Expr::Pow(
            arg.boxed(),
            Expr::Constant(Rational::new(1.into(), 2.into())).boxed(),
        ),
        _ => unreachable!(),
    };

    Ok((rest, expr))
}

fn parse_int(input: &str) -> IResult<&str, BigInt, VerboseError<&str>> {
    map_res(ws(recognize(pair(opt(char('-')), digit1))), |s: &str| {
        BigInt::from_str_radix(s, 10)
    })(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, VerboseError<&'a str>>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, VerboseError<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}
