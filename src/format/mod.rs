//! Formatting helpers for rendering expressions as plain text and LaTeX.

pub mod latex;
pub mod text;

pub use latex::latex;
pub use text::pretty;
