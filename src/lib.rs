//! calclab: a small symbolic calculus laboratory.
//!
//! Takes informal input the way people actually type it (`2x`, `x**2`,
//! `(x+1)(x-2)`), normalizes and parses it into an exact rational expression
//! tree, then computes the derivative, an antiderivative with a step-by-step
//! derivation, a definite integral (exact when possible, Simpson quadrature
//! otherwise), and a partial-fraction decomposition when one applies.
//!
//! ```
//! use calclab::analyze;
//!
//! let analysis = analyze("2x + 3", 0.0, 1.0).unwrap();
//! assert_eq!(analysis.normalized, "2*x + 3");
//! assert!(analysis.derivative.is_ok());
//! ```

pub mod analyze;
pub mod bank;
pub mod calculus;
pub mod error;
pub mod expr;
pub mod format;
pub mod input;
pub mod numeric;
pub mod parser;
pub mod poly;
pub mod simplify;

pub use analyze::{analyze, Analysis};
pub use bank::ExampleBank;
pub use calculus::{differentiate, integrate, partial_fractions, Integration, Rule, StepNode};
pub use error::{AnalysisError, Result};
pub use expr::{Expr, Func, Rational};
pub use format::{latex, pretty};
pub use input::normalize;
pub use parser::parse_expr;
pub use simplify::{simplify, simplify_fully, simplify_with_limit};
