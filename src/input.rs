//! Lexical normalization of informally written math input.
//!
//! Calculator-style input routinely omits the multiplication operator
//! (`2x`, `3(x+1)`, `(x)(x+1)`) and borrows the Python power operator
//! (`x**2`). These substitutions are purely lexical: nothing here parses or
//! validates math structure, so malformed input that survives normalization
//! is still rejected by the parser afterwards.
//!
//! Bare-letter juxtaposition such as `xcos(x)` is deliberately not handled;
//! without a symbol table it is ambiguous whether `xcos` is a product or a
//! function name.

use once_cell::sync::Lazy;
use regex::Regex;

static DIGIT_JUXTAPOSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d)([A-Za-z(])").expect("static pattern"));

static GROUP_JUXTAPOSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\)\(").expect("static pattern"));

/// Rewrite loosely written input into the expression grammar the parser
/// accepts. Total and idempotent; never fails.
///
/// Applied in order:
/// 1. a digit immediately followed by a letter or `(` gains an explicit `*`;
/// 2. `)(` becomes `)*(`;
/// 3. the Python-style power operator `**` is mapped to `^`.
pub fn normalize(raw: &str) -> String {
    let spread = DIGIT_JUXTAPOSITION.replace_all(raw, "$1*$2");
    let grouped = GROUP_JUXTAPOSITION.replace_all(&spread, ")*(");
    grouped.replace("**", "^")
}
