//! End-to-end analysis of one informal input string: normalization, parsing,
//! and the full battery of symbolic and numeric results.
//!
//! Parsing is the only fatal stage. Every later stage records its own
//! `Result` so one failure (say, a non-elementary antiderivative) does not
//! hide the results that did succeed.

use crate::calculus::steps::{format_steps, StepNode, DIRECT_FALLBACK};
use crate::calculus::{differentiate, integrate, partial_fractions};
use crate::error::{AnalysisError, Result};
use crate::expr::Expr;
use crate::format::{latex, pretty};
use crate::input::normalize;
use crate::numeric;
use crate::parser::parse_expr;
use crate::simplify::simplify_fully;

/// Number of Simpson subintervals used for the quadrature estimate.
const QUADRATURE_STEPS: usize = 1000;

/// Relative agreement required between the endpoint difference and the
/// quadrature estimate before the exact value is trusted.
const QUADRATURE_AGREEMENT: f64 = 1e-6;

/// Everything computed for one input expression over one interval.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub raw: String,
    pub normalized: String,
    pub expr: Expr,
    pub variable: String,
    pub derivative: Result<Expr>,
    pub antiderivative: Result<Expr>,
    pub definite: Result<f64>,
    pub partial_fractions: Option<Expr>,
    pub steps: Result<StepNode>,
}

/// Analyze `raw` over `[lower, upper]`.
///
/// Returns an error only when the input fails to parse; all downstream
/// failures are recorded per field.
pub fn analyze(raw: &str, lower: f64, upper: f64) -> Result<Analysis> {
    let normalized = normalize(raw);
    let expr = parse_expr(&normalized)?;
    let variable = infer_variable(&expr);

    let derivative = Ok(simplify_fully(differentiate(&variable, &expr)));

    let (antiderivative, steps) = match integrate(&variable, &expr) {
        Ok(integration) => (
            Ok(simplify_fully(integration.antiderivative)),
            Ok(integration.steps),
        ),
        Err(e) => (Err(e), Err(AnalysisError::UnsupportedSteps)),
    };

    let definite = definite_integral(&expr, antiderivative.as_ref().ok(), &variable, lower, upper);

    let partial = partial_fractions(&variable, &expr)
        .filter(|decomposed| *decomposed != simplify_fully(expr.clone()));

    Ok(Analysis {
        raw: raw.to_owned(),
        normalized,
        expr,
        variable,
        derivative,
        antiderivative,
        definite,
        partial_fractions: partial,
        steps,
    })
}

/// The integration variable: the unique free variable, defaulting to `x` for
/// constant inputs or inputs mixing several symbols.
fn infer_variable(expr: &Expr) -> String {
    let vars = expr.free_variables();
    if vars.len() == 1 {
        vars.into_iter().next().unwrap_or_else(|| "x".to_owned())
    } else {
        "x".to_owned()
    }
}

fn definite_integral(
    expr: &Expr,
    antiderivative: Option<&Expr>,
    var: &str,
    lower: f64,
    upper: f64,
) -> Result<f64> {
    if lower == upper {
        return Ok(0.0);
    }
    let compiled = numeric::compile(expr, var)?;
    let estimate = numeric::simpson(&compiled, lower, upper, QUADRATURE_STEPS);
    if let Some(anti) = antiderivative {
        let at_upper = numeric::eval(anti, var, upper);
        let at_lower = numeric::eval(anti, var, lower);
        let exact = at_upper - at_lower;
        if exact.is_finite() {
            // The endpoint difference misses poles between the bounds
            // (-1/x is finite at both ends of [-1, 1]), so it only stands
            // when quadrature lands on the same value.
            let scale = exact.abs().max(estimate.abs()).max(1.0);
            if (exact - estimate).abs() <= QUADRATURE_AGREEMENT * scale {
                return Ok(exact);
            }
            return Err(AnalysisError::Domain(format!(
                "integrand is not integrable over [{lower}, {upper}]"
            )));
        }
    }
    if estimate.is_finite() {
        Ok(estimate)
    } else {
        Err(AnalysisError::Domain(format!(
            "integrand is not finite over [{lower}, {upper}]"
        )))
    }
}

impl Analysis {
    /// Render the derivation as indented display lines. A derivation whose
    /// root carries no named strategy is headed by [`DIRECT_FALLBACK`].
    pub fn step_lines(&self) -> Result<Vec<String>> {
        let root = self.steps.as_ref().map_err(Clone::clone)?;
        let mut lines = Vec::new();
        match root {
            StepNode::Strategy { .. } => lines.extend(format_steps(root, 0)),
            other => {
                lines.push(format!("strategy: {DIRECT_FALLBACK}"));
                lines.extend(format_steps(other, 1));
            }
        }
        Ok(lines)
    }

    pub fn pretty(&self) -> String {
        pretty(&self.expr)
    }

    pub fn latex(&self) -> String {
        latex(&self.expr)
    }

    pub fn derivative_latex(&self) -> Result<String> {
        self.derivative
            .as_ref()
            .map(latex)
            .map_err(Clone::clone)
    }

    /// LaTeX antiderivative with the customary constant of integration.
    pub fn antiderivative_latex(&self) -> Result<String> {
        self.antiderivative
            .as_ref()
            .map(|anti| format!("{} + C", latex(anti)))
            .map_err(Clone::clone)
    }

    pub fn partial_fractions_latex(&self) -> Option<String> {
        self.partial_fractions.as_ref().map(latex)
    }
}
