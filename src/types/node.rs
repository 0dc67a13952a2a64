use std::fmt;
use std::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Comparison operators used by [`ConditionNode::Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Syntax tree for workflow conditions.
///
/// The parser only ever produces `Expression`, `And`, `Or` and `Not`.
/// Grouping parentheses are dropped during parsing since the renderer
/// parenthesizes every combinator anyway. The remaining variants are built
/// programmatically when assembling conditions for the generated workflow.
///
/// Each node owns its children; rendering is a pure function of the tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConditionNode {
    /// Opaque leaf holding the exact source text of an operand run.
    Expression(String),
    And(Box<ConditionNode>, Box<ConditionNode>),
    Or(Box<ConditionNode>, Box<ConditionNode>),
    Not(Box<ConditionNode>),
    Parentheses(Box<ConditionNode>),
    Comparison {
        left: Box<ConditionNode>,
        op: CompareOp,
        right: Box<ConditionNode>,
    },
    PropertyAccess(String),
    StringLiteral(String),
    NumberLiteral(f64),
    BooleanLiteral(bool),
    FunctionCall {
        name: String,
        args: Vec<ConditionNode>,
    },
    Contains {
        haystack: Box<ConditionNode>,
        needle: Box<ConditionNode>,
    },
    Ternary {
        condition: Box<ConditionNode>,
        if_true: Box<ConditionNode>,
        if_false: Box<ConditionNode>,
    },
    Disjunction(Vec<ConditionNode>),
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionNode::Expression(text) | ConditionNode::PropertyAccess(text) => {
                write!(f, "{text}")
            }
            ConditionNode::And(a, b) => write!(f, "({a}) && ({b})"),
            ConditionNode::Or(a, b) => write!(f, "({a}) || ({b})"),
            ConditionNode::Not(inner) => write!(f, "!({inner})"),
            ConditionNode::Parentheses(inner) => write!(f, "({inner})"),
            ConditionNode::Comparison { left, op, right } => {
                write_operand(f, left)?;
                write!(f, " {op} ")?;
                write_operand(f, right)
            }
            ConditionNode::StringLiteral(value) => write!(f, "'{}'", value.replace('\'', "''")),
            ConditionNode::NumberLiteral(value) => write!(f, "{value}"),
            ConditionNode::BooleanLiteral(value) => write!(f, "{value}"),
            ConditionNode::FunctionCall { name, args } => {
                write!(f, "{name}(")?;
                write_separated(f, args, ", ")?;
                write!(f, ")")
            }
            ConditionNode::Contains { haystack, needle } => {
                write!(f, "contains({haystack}, {needle})")
            }
            ConditionNode::Ternary {
                condition,
                if_true,
                if_false,
            } => write!(f, "{condition} ? {if_true} : {if_false}"),
            // An empty disjunction is the identity of `||`.
            ConditionNode::Disjunction(terms) if terms.is_empty() => write!(f, "false"),
            ConditionNode::Disjunction(terms) => write_separated(f, terms, " || "),
        }
    }
}

/// Comparison operands that are themselves combinators are grouped so the
/// comparison keeps binding tighter than `&&`, `||` and `!`.
fn write_operand(f: &mut fmt::Formatter<'_>, node: &ConditionNode) -> fmt::Result {
    match node {
        ConditionNode::And(..)
        | ConditionNode::Or(..)
        | ConditionNode::Not(_)
        | ConditionNode::Comparison { .. }
        | ConditionNode::Ternary { .. } => write!(f, "({node})"),
        ConditionNode::Disjunction(terms) if terms.len() == 1 => write_operand(f, &terms[0]),
        ConditionNode::Disjunction(terms) if terms.len() > 1 => write!(f, "({node})"),
        _ => write!(f, "{node}"),
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, nodes: &[ConditionNode], sep: &str) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{node}")?;
    }
    Ok(())
}

impl ConditionNode {
    /// Render the node to its canonical text form.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn and(self, other: ConditionNode) -> ConditionNode {
        ConditionNode::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: ConditionNode) -> ConditionNode {
        ConditionNode::Or(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn eq(self, other: ConditionNode) -> ConditionNode {
        self.compare(CompareOp::Eq, other)
    }

    #[must_use]
    pub fn neq(self, other: ConditionNode) -> ConditionNode {
        self.compare(CompareOp::Neq, other)
    }

    #[must_use]
    pub fn gt(self, other: ConditionNode) -> ConditionNode {
        self.compare(CompareOp::Gt, other)
    }

    #[must_use]
    pub fn gte(self, other: ConditionNode) -> ConditionNode {
        self.compare(CompareOp::Gte, other)
    }

    #[must_use]
    pub fn lt(self, other: ConditionNode) -> ConditionNode {
        self.compare(CompareOp::Lt, other)
    }

    #[must_use]
    pub fn lte(self, other: ConditionNode) -> ConditionNode {
        self.compare(CompareOp::Lte, other)
    }

    #[must_use]
    pub fn compare(self, op: CompareOp, other: ConditionNode) -> ConditionNode {
        ConditionNode::Comparison {
            left: Box::new(self),
            op,
            right: Box::new(other),
        }
    }

    /// Walk the tree depth-first and call `f` with the text of every
    /// [`ConditionNode::Expression`] leaf, stopping at the first error.
    ///
    /// Only the boolean combinators and disjunction terms are descended into.
    /// Comparisons, calls, ternaries and literals are opaque here and are
    /// never passed to `f`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn visit_expressions<E, F>(&self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
    {
        match self {
            ConditionNode::Expression(text) => f(text),
            ConditionNode::And(a, b) | ConditionNode::Or(a, b) => {
                a.visit_expressions(f)?;
                b.visit_expressions(f)
            }
            ConditionNode::Not(inner) | ConditionNode::Parentheses(inner) => {
                inner.visit_expressions(f)
            }
            ConditionNode::Disjunction(terms) => {
                for term in terms {
                    term.visit_expressions(f)?;
                }
                Ok(())
            }
            ConditionNode::Comparison { .. }
            | ConditionNode::PropertyAccess(_)
            | ConditionNode::StringLiteral(_)
            | ConditionNode::NumberLiteral(_)
            | ConditionNode::BooleanLiteral(_)
            | ConditionNode::FunctionCall { .. }
            | ConditionNode::Contains { .. }
            | ConditionNode::Ternary { .. } => Ok(()),
        }
    }
}

impl Not for ConditionNode {
    type Output = ConditionNode;

    fn not(self) -> ConditionNode {
        ConditionNode::Not(Box::new(self))
    }
}

/// Visit every expression leaf of an optional tree. `None` visits nothing.
///
/// # Errors
///
/// Returns the first error produced by `f`.
pub fn visit<E, F>(node: Option<&ConditionNode>, mut f: F) -> Result<(), E>
where
    F: FnMut(&str) -> Result<(), E>,
{
    match node {
        Some(node) => node.visit_expressions(&mut f),
        None => Ok(()),
    }
}

#[must_use]
pub fn expression(text: &str) -> ConditionNode {
    ConditionNode::Expression(text.to_owned())
}

#[must_use]
pub fn property(path: &str) -> ConditionNode {
    ConditionNode::PropertyAccess(path.to_owned())
}

#[must_use]
pub fn string_literal(value: &str) -> ConditionNode {
    ConditionNode::StringLiteral(value.to_owned())
}

#[must_use]
pub fn number_literal(value: f64) -> ConditionNode {
    ConditionNode::NumberLiteral(value)
}

#[must_use]
pub fn boolean_literal(value: bool) -> ConditionNode {
    ConditionNode::BooleanLiteral(value)
}

#[must_use]
pub fn paren(inner: ConditionNode) -> ConditionNode {
    ConditionNode::Parentheses(Box::new(inner))
}

#[must_use]
pub fn function_call(name: &str, args: Vec<ConditionNode>) -> ConditionNode {
    ConditionNode::FunctionCall {
        name: name.to_owned(),
        args,
    }
}

#[must_use]
pub fn contains(haystack: ConditionNode, needle: ConditionNode) -> ConditionNode {
    ConditionNode::Contains {
        haystack: Box::new(haystack),
        needle: Box::new(needle),
    }
}

#[must_use]
pub fn ternary(
    condition: ConditionNode,
    if_true: ConditionNode,
    if_false: ConditionNode,
) -> ConditionNode {
    ConditionNode::Ternary {
        condition: Box::new(condition),
        if_true: Box::new(if_true),
        if_false: Box::new(if_false),
    }
}

/// `a || b || ...` over `terms`. With no terms it renders as `false`.
#[must_use]
pub fn disjunction(terms: Vec<ConditionNode>) -> ConditionNode {
    ConditionNode::Disjunction(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_renders_fully_parenthesized() {
        let node = expression("a").and(expression("b"));
        assert_eq!(node.render(), "(a) && (b)");
    }

    #[test]
    fn nested_combinators_render() {
        let node = expression("a").or(expression("b").and(expression("c")));
        assert_eq!(node.render(), "(a) || ((b) && (c))");
        assert_eq!((!expression("a")).render(), "!(a)");
        assert_eq!(paren(expression("a")).render(), "(a)");
    }

    #[test]
    fn comparison_renders_natively() {
        let node = property("github.event_name").eq(string_literal("push"));
        assert_eq!(node.render(), "github.event_name == 'push'");
    }

    #[test]
    fn compound_comparison_operands_are_grouped() {
        let node = expression("a").or(expression("b")).eq(string_literal("x"));
        assert_eq!(node.render(), "((a) || (b)) == 'x'");

        let node = property("x").neq(!property("y"));
        assert_eq!(node.render(), "x != (!(y))");

        let node = property("a").eq(property("b")).eq(boolean_literal(true));
        assert_eq!(node.render(), "(a == b) == true");

        let node = disjunction(vec![property("a"), property("b")]).eq(string_literal("x"));
        assert_eq!(node.render(), "(a || b) == 'x'");

        let node = function_call("f", vec![property("a")]).eq(number_literal(1.0));
        assert_eq!(node.render(), "f(a) == 1");
    }

    #[test]
    fn all_compare_ops() {
        let ops = [
            (property("x").eq(number_literal(1.0)), "x == 1"),
            (property("x").neq(number_literal(1.0)), "x != 1"),
            (property("x").gt(number_literal(1.5)), "x > 1.5"),
            (property("x").gte(number_literal(1.0)), "x >= 1"),
            (property("x").lt(number_literal(-2.0)), "x < -2"),
            (property("x").lte(boolean_literal(true)), "x <= true"),
        ];
        for (node, expected) in ops {
            assert_eq!(node.render(), expected);
        }
    }

    #[test]
    fn string_literal_doubles_single_quotes() {
        assert_eq!(string_literal("it's").render(), "'it''s'");
    }

    #[test]
    fn call_contains_ternary_disjunction() {
        let call = function_call(
            "startsWith",
            vec![property("github.ref"), string_literal("refs/tags/")],
        );
        assert_eq!(call.render(), "startsWith(github.ref, 'refs/tags/')");

        let node = contains(property("github.event.issue.labels"), string_literal("bug"));
        assert_eq!(node.render(), "contains(github.event.issue.labels, 'bug')");

        let node = ternary(property("a"), string_literal("x"), string_literal("y"));
        assert_eq!(node.render(), "a ? 'x' : 'y'");

        let node = disjunction(vec![expression("a"), expression("b"), expression("c")]);
        assert_eq!(node.render(), "a || b || c");
        assert_eq!(disjunction(vec![]).render(), "false");
        assert_eq!(crate::parse(&disjunction(vec![]).render()), Ok(expression("false")));
        assert_eq!(function_call("always", vec![]).render(), "always()");
    }

    #[test]
    fn visit_collects_leaves_in_order() {
        let tree = expression("a").and(!expression("b")).or(paren(expression("c")));
        let mut seen = Vec::new();
        tree.visit_expressions(&mut |leaf: &str| {
            seen.push(leaf.to_owned());
            Ok::<(), ()>(())
        })
        .unwrap();
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn visit_descends_disjunction_but_not_builders() {
        let tree = disjunction(vec![
            expression("a"),
            property("b").eq(string_literal("x")),
            function_call("f", vec![expression("hidden")]),
            expression("d"),
        ]);
        let mut seen = Vec::new();
        visit(Some(&tree), |leaf: &str| {
            seen.push(leaf.to_owned());
            Ok::<(), ()>(())
        })
        .unwrap();
        assert_eq!(seen, vec!["a", "d"]);
    }

    #[test]
    fn visit_short_circuits_on_error() {
        let tree = expression("a").and(expression("stop")).and(expression("c"));
        let mut seen = Vec::new();
        let result = tree.visit_expressions(&mut |leaf: &str| {
            seen.push(leaf.to_owned());
            if leaf == "stop" {
                Err(leaf.to_owned())
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err("stop".to_owned()));
        assert_eq!(seen, vec!["a", "stop"]);
    }

    #[test]
    fn visit_none_is_noop() {
        let result = visit(None, |_: &str| Err::<(), _>("called"));
        assert_eq!(result, Ok(()));
    }
}
