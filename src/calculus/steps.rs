//! Step trees describing how an antiderivative was derived, and their
//! line-by-line rendering.

/// Named rules and strategies appearing in a step tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Constant,
    Power,
    Reciprocal,
    Sine,
    Cosine,
    Tangent,
    Exponential,
    Logarithm,
    Arctangent,
    LinearSubstitution,
    USubstitution,
    ConstantMultiple,
    Sum,
    PartialFractions,
    Rewrite,
}

impl Rule {
    pub fn describe(self) -> &'static str {
        match self {
            Rule::Constant => "constant",
            Rule::Power => "power",
            Rule::Reciprocal => "reciprocal",
            Rule::Sine => "sine",
            Rule::Cosine => "cosine",
            Rule::Tangent => "tangent",
            Rule::Exponential => "exponential",
            Rule::Logarithm => "logarithm",
            Rule::Arctangent => "arctangent",
            Rule::LinearSubstitution => "linear substitution",
            Rule::USubstitution => "u-substitution",
            Rule::ConstantMultiple => "constant multiple",
            Rule::Sum => "term-by-term integration",
            Rule::PartialFractions => "partial fractions",
            Rule::Rewrite => "algebraic rewrite",
        }
    }
}

/// A node in the derivation tree. Strictly a tree; child order reflects the
/// order the sub-integrals are attacked and is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepNode {
    Leaf {
        rule: Rule,
    },
    Wrapped {
        rule: Rule,
        substep: Box<StepNode>,
    },
    Strategy {
        strategy: Rule,
        substeps: Vec<StepNode>,
    },
}

/// Strategy narration used when a derivation carries no named strategy.
pub const DIRECT_FALLBACK: &str = "direct integration by fundamental rules";

const INDENT: &str = "  ";

/// Depth-first rendering of a step tree as display lines. The iterator is
/// lazy and finite; indentation is cosmetic only.
pub fn format_steps(root: &StepNode, depth: usize) -> StepLines<'_> {
    StepLines {
        stack: vec![(root, depth)],
    }
}

pub struct StepLines<'a> {
    stack: Vec<(&'a StepNode, usize)>,
}

impl Iterator for StepLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (node, depth) = self.stack.pop()?;
        let indent = INDENT.repeat(depth);
        Some(match node {
            StepNode::Leaf { rule } => {
                format!("{indent}apply the {} rule", rule.describe())
            }
            StepNode::Wrapped { rule, substep } => {
                self.stack.push((substep, depth + 1));
                format!("{indent}rewrite via {}", rule.describe())
            }
            StepNode::Strategy { strategy, substeps } => {
                for substep in substeps.iter().rev() {
                    self.stack.push((substep, depth + 1));
                }
                format!("{indent}strategy: {}", strategy.describe())
            }
        })
    }
}
