mod error;
mod lexer;
mod parser;

use std::str::FromStr;

pub use error::ParseError;
pub use lexer::tokenize;
pub(crate) use lexer::is_number;

use crate::ConditionNode;

/// Maximum combined depth of parentheses, negations and folded binary
/// operators in a single expression.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parse an expression into a [`ConditionNode`] tree.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is empty or not a well-formed
/// boolean expression.
pub fn parse(input: &str) -> Result<ConditionNode, ParseError> {
    parser::Parser::new(input, tokenize(input)).parse()
}

impl FromStr for ConditionNode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
