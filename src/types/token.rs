use std::fmt;

/// Kinds of tokens produced by the expression lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Property path, comparison operator, function call or any other
    /// run of text that is not a literal or punctuation.
    Identifier,
    StringLiteral,
    NumberLiteral,
    BooleanLiteral,
    And,
    Or,
    Not,
    LParen,
    RParen,
    Comma,
    Eof,
}

impl TokenKind {
    /// Whether the token is part of an opaque operand run.
    #[must_use]
    pub fn is_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::StringLiteral
                | TokenKind::NumberLiteral
                | TokenKind::BooleanLiteral
        )
    }
}

/// A single lexed token. `text` borrows from the source and `position` is
/// the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

impl<'a> Token<'a> {
    pub(crate) fn new(kind: TokenKind, text: &'a str, position: usize) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }

    /// Byte offset one past the last byte of this token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "{}", self.text),
        }
    }
}
