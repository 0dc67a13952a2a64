#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::catalogue::{ALLOWED_EXPRESSIONS, DANGEROUS_PROPERTY_NAMES};

/// How a leaf containing a comparison is authorized when none of the path
/// rules match it as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ComparisonPolicy {
    /// Every property path directly left of a comparison operator must be
    /// authorized. Right-hand operands are not inspected.
    LeftOperand,
    /// Every operand of the comparison must be a literal or an authorized
    /// property path.
    #[default]
    AllOperands,
}

/// Settings for an [`ExpressionValidator`](super::ExpressionValidator).
///
/// The default is the built-in catalogue of sanctioned context accessors
/// and dangerous property names.
///
/// # Example
///
/// ```
/// use exprguard::{ComparisonPolicy, ValidatorConfig};
///
/// let config = ValidatorConfig::default()
///     .allow("github.event.issue.body")
///     .comparison_policy(ComparisonPolicy::LeftOperand)
///     .max_suggestions(5);
/// assert!(config.allowed_expressions.iter().any(|e| e == "github.event.issue.body"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidatorConfig {
    /// Exact sanctioned names, in the order they are reported.
    pub allowed_expressions: Vec<String>,
    pub dangerous_properties: Vec<String>,
    pub comparison_policy: ComparisonPolicy,
    pub max_suggestions: usize,
    /// Largest edit distance at which an allowlist entry is still suggested.
    pub max_suggestion_distance: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            allowed_expressions: ALLOWED_EXPRESSIONS.iter().map(|s| (*s).to_owned()).collect(),
            dangerous_properties: DANGEROUS_PROPERTY_NAMES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            comparison_policy: ComparisonPolicy::default(),
            max_suggestions: 3,
            max_suggestion_distance: 3,
        }
    }
}

impl ValidatorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact sanctioned name. Duplicates are ignored.
    #[must_use]
    pub fn allow(mut self, name: &str) -> Self {
        if !self.allowed_expressions.iter().any(|e| e == name) {
            self.allowed_expressions.push(name.to_owned());
        }
        self
    }

    /// Replace the exact sanctioned names.
    #[must_use]
    pub fn allowed_expressions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_expressions = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the dangerous property names.
    #[must_use]
    pub fn dangerous_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dangerous_properties = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn comparison_policy(mut self, policy: ComparisonPolicy) -> Self {
        self.comparison_policy = policy;
        self
    }

    #[must_use]
    pub fn max_suggestions(mut self, limit: usize) -> Self {
        self.max_suggestions = limit;
        self
    }

    #[must_use]
    pub fn max_suggestion_distance(mut self, distance: usize) -> Self {
        self.max_suggestion_distance = distance;
        self
    }
}
