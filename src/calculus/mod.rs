//! Calculus routines: differentiation, integration with step recording, and
//! partial-fraction decomposition.

pub mod derivative;
pub mod integral;
pub mod partial_fractions;
pub mod steps;

pub use derivative::differentiate;
pub use integral::{integrate, Integration};
pub use partial_fractions::partial_fractions;
pub use steps::{format_steps, Rule, StepNode, DIRECT_FALLBACK};
