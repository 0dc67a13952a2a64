use thiserror::Error;

use crate::Token;

/// Structural errors produced when parsing an expression.
///
/// Positions are byte offsets into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("expected ')' at position {position}")]
    ExpectedCloseParen { position: usize },

    #[error("expression nesting exceeds {limit} levels at position {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

impl ParseError {
    pub(crate) fn unexpected(token: &Token<'_>) -> Self {
        ParseError::UnexpectedToken {
            token: token.to_string(),
            position: token.position,
        }
    }
}
