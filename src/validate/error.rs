use std::fmt;

use thiserror::Error;

/// Policy errors produced when validating a document or condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Every unauthorized reference found in the input, reported at once.
    #[error(transparent)]
    Unauthorized(#[from] UnauthorizedReport),

    #[error("expression '{expression}' accesses dangerous property '{property}'")]
    DangerousProperty { expression: String, property: String },
}

impl ValidationError {
    /// The unauthorized expressions, empty for a dangerous-property error.
    #[must_use]
    pub fn expressions(&self) -> Vec<&str> {
        match self {
            ValidationError::Unauthorized(report) => report
                .expressions
                .iter()
                .map(|e| e.expression.as_str())
                .collect(),
            ValidationError::DangerousProperty { .. } => Vec::new(),
        }
    }
}

/// One unauthorized expression and the allowlist entries closest to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnauthorizedExpression {
    pub expression: String,
    pub suggestions: Vec<String>,
}

/// Aggregated report of unauthorized expressions, deduplicated in
/// first-seen order, plus everything that would have been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnauthorizedReport {
    pub expressions: Vec<UnauthorizedExpression>,
    /// Dynamic families followed by the exact sanctioned names.
    pub allowed: Vec<String>,
}

impl UnauthorizedReport {
    #[must_use]
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Whether `expression` is among the reported expressions.
    #[must_use]
    pub fn contains(&self, expression: &str) -> bool {
        self.expressions.iter().any(|e| e.expression == expression)
    }
}

impl fmt::Display for UnauthorizedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} unauthorized expression(s) found:",
            self.expressions.len()
        )?;
        for entry in &self.expressions {
            write!(f, "  - {}", entry.expression)?;
            if !entry.suggestions.is_empty() {
                write!(f, " (did you mean: {}?)", entry.suggestions.join(", "))?;
            }
            writeln!(f)?;
        }
        write!(f, "allowed expressions: {}", self.allowed.join(", "))
    }
}

impl std::error::Error for UnauthorizedReport {}
