pub mod conditions;
mod error;
mod parse;
mod types;
mod validate;

pub use error::ExprGuardError;
pub use parse::{MAX_NESTING_DEPTH, ParseError, parse, tokenize};
pub use types::{
    CompareOp, ConditionNode, Token, TokenKind, boolean_literal, contains, disjunction,
    expression, function_call, number_literal, paren, property, string_literal, ternary, visit,
};
pub use validate::{
    ALLOWED_EXPRESSIONS, ComparisonPolicy, DANGEROUS_PROPERTY_NAMES, DYNAMIC_FAMILIES,
    ExpressionValidator, Span, Spans, UnauthorizedExpression, UnauthorizedReport,
    ValidationError, ValidationOutcome, ValidatorConfig, default_validator, extract_spans,
    levenshtein, suggest, validate_document,
};
