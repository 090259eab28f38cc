use calclab::calculus::{format_steps, Rule, StepNode};
use calclab::{integrate, parse_expr};

fn steps_for(input: &str) -> StepNode {
    let expr = parse_expr(input).expect("parse");
    integrate("x", &expr).expect("integrate").steps
}

#[test]
fn direct_rules_are_single_leaves() {
    assert_eq!(steps_for("x^2"), StepNode::Leaf { rule: Rule::Power });
    assert_eq!(steps_for("5"), StepNode::Leaf { rule: Rule::Constant });
    assert_eq!(steps_for("sin(x)"), StepNode::Leaf { rule: Rule::Sine });
}

#[test]
fn linear_arguments_wrap_the_base_rule() {
    assert_eq!(
        steps_for("sin(2*x)"),
        StepNode::Wrapped {
            rule: Rule::LinearSubstitution,
            substep: Box::new(StepNode::Leaf { rule: Rule::Sine }),
        }
    );
}

#[test]
fn constant_multiples_wrap() {
    assert_eq!(
        steps_for("3*cos(x)"),
        StepNode::Wrapped {
            rule: Rule::ConstantMultiple,
            substep: Box::new(StepNode::Leaf { rule: Rule::Cosine }),
        }
    );
}

#[test]
fn sums_become_a_strategy_with_ordered_children() {
    let StepNode::Strategy { strategy, substeps } = steps_for("x + sin(x)") else {
        panic!("expected a strategy node");
    };
    assert_eq!(strategy, Rule::Sum);
    assert_eq!(
        substeps,
        vec![
            StepNode::Leaf { rule: Rule::Power },
            StepNode::Leaf { rule: Rule::Sine },
        ]
    );
}

#[test]
fn partial_fractions_record_one_step_per_term() {
    let StepNode::Strategy { strategy, substeps } = steps_for("1/(x^2-1)") else {
        panic!("expected a strategy node");
    };
    assert_eq!(strategy, Rule::PartialFractions);
    assert_eq!(
        substeps,
        vec![
            StepNode::Leaf {
                rule: Rule::Reciprocal
            },
            StepNode::Leaf {
                rule: Rule::Reciprocal
            },
        ]
    );
}

#[test]
fn u_substitution_quotients() {
    assert_eq!(
        steps_for("x/(x^2+4)"),
        StepNode::Wrapped {
            rule: Rule::USubstitution,
            substep: Box::new(StepNode::Leaf {
                rule: Rule::Reciprocal
            }),
        }
    );
}

#[test]
fn rendering_indents_by_depth() {
    let lines: Vec<String> = format_steps(&steps_for("x + sin(2*x)"), 0).collect();
    assert_eq!(
        lines,
        vec![
            "strategy: term-by-term integration",
            "  apply the power rule",
            "  rewrite via linear substitution",
            "    apply the sine rule",
        ]
    );
}
