use thiserror::Error;

use crate::parse::ParseError;
use crate::validate::ValidationError;

/// Unified error type covering parsing and validation.
///
/// Returned by convenience methods that do both, like
/// [`ExpressionValidator::validate_condition()`](crate::ExpressionValidator::validate_condition).
#[derive(Debug, Error)]
pub enum ExprGuardError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
