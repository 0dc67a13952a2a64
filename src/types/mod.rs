mod node;
mod token;

pub use node::{
    CompareOp, ConditionNode, boolean_literal, contains, disjunction, expression, function_call,
    number_literal, paren, property, string_literal, ternary, visit,
};
pub use token::{Token, TokenKind};
