mod catalogue;
mod config;
mod error;
mod extract;
mod rules;
mod suggest;

use std::collections::HashSet;
use std::sync::LazyLock;

use tracing::{debug, trace};

use crate::parse::{ParseError, parse};
use crate::{ConditionNode, ExprGuardError};

pub use catalogue::{ALLOWED_EXPRESSIONS, DANGEROUS_PROPERTY_NAMES, DYNAMIC_FAMILIES};
pub use config::{ComparisonPolicy, ValidatorConfig};
pub use error::{UnauthorizedExpression, UnauthorizedReport, ValidationError};
pub use extract::{Span, Spans, extract_spans};
pub use suggest::{levenshtein, suggest};

static DEFAULT_VALIDATOR: LazyLock<ExpressionValidator> =
    LazyLock::new(ExpressionValidator::default);

/// The shared validator built from the built-in catalogue.
#[must_use]
pub fn default_validator() -> &'static ExpressionValidator {
    &DEFAULT_VALIDATOR
}

/// Validate every `${{ ... }}` span of `text` against the built-in
/// allowlist.
///
/// # Errors
///
/// See [`ExpressionValidator::validate_document`].
pub fn validate_document(text: &str) -> Result<(), ValidationError> {
    DEFAULT_VALIDATOR.validate_document(text)
}

/// Unauthorized fragments found in a document, in the order they were
/// encountered. Not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Number of interpolation spans inspected.
    pub spans: usize,
    pub unauthorized: Vec<String>,
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.unauthorized.is_empty()
    }
}

/// Allowlist-based validator for expressions embedded in workflow text.
///
/// Built once from a [`ValidatorConfig`] and immutable afterwards, so a
/// single instance can be shared across threads.
///
/// # Example
///
/// ```
/// use exprguard::ExpressionValidator;
///
/// let validator = ExpressionValidator::default();
/// assert!(validator.validate_document("sha: ${{ needs.build.outputs.sha }}").is_ok());
///
/// let err = validator.validate_document("${{ secrets.TOKEN }}").unwrap_err();
/// assert_eq!(err.expressions(), vec!["secrets.TOKEN"]);
/// ```
#[derive(Debug, Clone)]
pub struct ExpressionValidator {
    allowed: Vec<String>,
    allowed_set: HashSet<String>,
    dangerous: HashSet<String>,
    comparison_policy: ComparisonPolicy,
    max_suggestions: usize,
    max_suggestion_distance: usize,
}

impl Default for ExpressionValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl ExpressionValidator {
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            allowed_set: config.allowed_expressions.iter().cloned().collect(),
            allowed: config.allowed_expressions,
            dangerous: config.dangerous_properties.into_iter().collect(),
            comparison_policy: config.comparison_policy,
            max_suggestions: config.max_suggestions,
            max_suggestion_distance: config.max_suggestion_distance,
        }
    }

    /// Exact sanctioned names, in configured order.
    #[must_use]
    pub fn allowed_expressions(&self) -> &[String] {
        &self.allowed
    }

    #[must_use]
    pub fn comparison_policy(&self) -> ComparisonPolicy {
        self.comparison_policy
    }

    /// Validate every `${{ ... }}` span of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Unauthorized`] listing every unauthorized
    /// expression in the document, or [`ValidationError::DangerousProperty`]
    /// as soon as a fragment touches a reserved property name.
    pub fn validate_document(&self, text: &str) -> Result<(), ValidationError> {
        let outcome = self.check_document(text)?;
        if outcome.is_authorized() {
            Ok(())
        } else {
            Err(self.report(&outcome.unauthorized).into())
        }
    }

    /// Collect every unauthorized fragment of `text` without building the
    /// aggregated error.
    ///
    /// Spans spanning several lines are rejected whole. Each remaining span
    /// is parsed and its leaves checked one by one; a span that does not
    /// parse is checked as a single fragment. A span that only fails on the
    /// nesting bound is split at its top-level `&&` and `||` instead, and
    /// each operand is parsed and checked on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DangerousProperty`] if a fragment touches a
    /// reserved property name.
    pub fn check_document(&self, text: &str) -> Result<ValidationOutcome, ValidationError> {
        let mut outcome = ValidationOutcome::default();
        for span in extract_spans(text) {
            outcome.spans += 1;
            let inner = span.inner.trim();
            if span.is_multiline() {
                debug!(position = span.position, "rejecting multi-line expression");
                outcome.unauthorized.push(inner.to_owned());
                continue;
            }
            match parse(inner) {
                Ok(tree) => tree.visit_expressions(&mut |leaf: &str| {
                    self.check_leaf(leaf, &mut outcome.unauthorized)
                })?,
                Err(ParseError::NestingTooDeep { .. }) => {
                    debug!(
                        position = span.position,
                        "expression nests too deeply; checking its top-level operands"
                    );
                    for operand in rules::split_connectives(inner) {
                        self.check_operand(operand.trim(), &mut outcome.unauthorized)?;
                    }
                }
                Err(err) => {
                    debug!(
                        position = span.position,
                        error = %err,
                        "expression does not parse; checking it as one fragment"
                    );
                    self.check_leaf(inner, &mut outcome.unauthorized)?;
                }
            }
        }
        debug!(
            spans = outcome.spans,
            unauthorized = outcome.unauthorized.len(),
            "checked document expressions"
        );
        Ok(outcome)
    }

    /// Parse a bare condition, such as an `if:` field, and validate each of
    /// its leaves. A single surrounding `${{ ... }}` is unwrapped first.
    ///
    /// # Errors
    ///
    /// Returns [`ExprGuardError::Parse`] if the condition is malformed and
    /// [`ExprGuardError::Validation`] if any leaf is not authorized.
    pub fn validate_condition(&self, condition: &str) -> Result<ConditionNode, ExprGuardError> {
        let trimmed = condition.trim();
        let body = trimmed
            .strip_prefix("${{")
            .and_then(|rest| rest.strip_suffix("}}"))
            .unwrap_or(trimmed);
        let tree = parse(body)?;
        let mut unauthorized = Vec::new();
        tree.visit_expressions(&mut |leaf: &str| self.check_leaf(leaf, &mut unauthorized))?;
        if unauthorized.is_empty() {
            Ok(tree)
        } else {
            Err(ValidationError::from(self.report(&unauthorized)).into())
        }
    }

    /// Decide a single fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DangerousProperty`] if the fragment touches
    /// a reserved property name.
    pub fn is_authorized(&self, fragment: &str) -> Result<bool, ValidationError> {
        let fragment = fragment.trim();
        if let Some(property) = self.dangerous_property(fragment) {
            return Err(ValidationError::DangerousProperty {
                expression: fragment.to_owned(),
                property: property.to_owned(),
            });
        }
        Ok(self.is_fragment_authorized(fragment))
    }

    /// Build the aggregated report for a list of unauthorized fragments,
    /// deduplicating them in first-seen order.
    #[must_use]
    pub fn report(&self, unauthorized: &[String]) -> UnauthorizedReport {
        let mut seen = HashSet::new();
        let expressions = unauthorized
            .iter()
            .filter(|e| seen.insert(e.as_str()))
            .map(|e| UnauthorizedExpression {
                expression: e.clone(),
                suggestions: suggest(
                    e,
                    self.allowed.iter().map(String::as_str),
                    self.max_suggestions,
                    self.max_suggestion_distance,
                ),
            })
            .collect();
        let allowed = DYNAMIC_FAMILIES
            .iter()
            .map(|f| (*f).to_owned())
            .chain(self.allowed.iter().cloned())
            .collect();
        UnauthorizedReport {
            expressions,
            allowed,
        }
    }

    /// Check one operand of an over-deep span: its leaves if it parses, or
    /// the operand as a whole.
    fn check_operand(
        &self,
        operand: &str,
        unauthorized: &mut Vec<String>,
    ) -> Result<(), ValidationError> {
        match parse(operand) {
            Ok(tree) => {
                tree.visit_expressions(&mut |leaf: &str| self.check_leaf(leaf, unauthorized))
            }
            Err(_) => self.check_leaf(operand, unauthorized),
        }
    }

    fn check_leaf(&self, leaf: &str, unauthorized: &mut Vec<String>) -> Result<(), ValidationError> {
        if self.is_authorized(leaf)? {
            trace!(expression = leaf, "authorized expression");
        } else {
            debug!(expression = leaf, "unauthorized expression");
            unauthorized.push(leaf.trim().to_owned());
        }
        Ok(())
    }

    fn dangerous_property<'t>(&self, fragment: &'t str) -> Option<&'t str> {
        rules::property_segments(fragment)
            .into_iter()
            .find(|seg| self.dangerous.contains(*seg))
    }

    fn is_fragment_authorized(&self, fragment: &str) -> bool {
        if rules::is_literal(fragment) || self.is_path_authorized(fragment) {
            return true;
        }
        let alternatives = rules::split_alternatives(fragment);
        if alternatives.len() > 1 {
            return alternatives.iter().all(|alt| {
                let alt = alt.trim();
                rules::is_literal(alt)
                    || self.is_path_authorized(alt)
                    || self.is_comparison_authorized(alt)
            });
        }
        self.is_comparison_authorized(fragment)
    }

    fn is_path_authorized(&self, path: &str) -> bool {
        rules::is_dynamic_path(path) || self.allowed_set.contains(path)
    }

    fn is_comparison_authorized(&self, fragment: &str) -> bool {
        let operands = rules::split_comparison(fragment);
        if operands.len() < 2 {
            return false;
        }
        match self.comparison_policy {
            ComparisonPolicy::AllOperands => operands.iter().all(|operand| {
                let operand = operand.trim();
                rules::is_literal(operand) || self.is_path_authorized(operand)
            }),
            ComparisonPolicy::LeftOperand => {
                let paths: Vec<&str> = operands[..operands.len() - 1]
                    .iter()
                    .filter_map(|operand| rules::trailing_path(operand))
                    .collect();
                !paths.is_empty() && paths.iter().all(|path| self.is_path_authorized(path))
            }
        }
    }
}
