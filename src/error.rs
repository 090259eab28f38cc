use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failure taxonomy for one analysis request.
///
/// `Parse` aborts the whole request; everything else is captured per computed
/// field so that sibling fields stay usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("evaluation failed: {0}")]
    Evaluation(String),
    #[error("domain error: {0}")]
    Domain(String),
    #[error("no step derivation available for this integrand")]
    UnsupportedSteps,
}
