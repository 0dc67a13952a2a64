use crate::{ConditionNode, Token, TokenKind};

use super::error::ParseError;
use super::MAX_NESTING_DEPTH;

/// Recursive-descent parser over a lexed token sequence.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// or      := and ("||" and)*
/// and     := unary ("&&" unary)*
/// unary   := "!" unary | primary
/// primary := "(" or ")" | operand+
/// ```
///
/// Operand runs are kept as opaque [`ConditionNode::Expression`] leaves
/// holding the exact source slice they cover.
pub(crate) struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, tokens: Vec<Token<'a>>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    pub(crate) fn parse(mut self) -> Result<ConditionNode, ParseError> {
        if self.peek().kind == TokenKind::Eof {
            return Err(ParseError::EmptyExpression);
        }
        let node = self.or_expr()?;
        let trailing = self.peek();
        if trailing.kind != TokenKind::Eof {
            return Err(ParseError::unexpected(&trailing));
        }
        Ok(node)
    }

    // -- Token cursor ---------------------------------------------------------

    fn peek(&self) -> Token<'a> {
        // The lexer always terminates the sequence with Eof.
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, "", self.source.len()))
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self, position: usize) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                position,
            });
        }
        Ok(())
    }

    // -- Expressions (precedence: OR < AND < NOT < primary) -------------------

    fn or_expr(&mut self) -> Result<ConditionNode, ParseError> {
        let mut node = self.and_expr()?;
        let mut folded = 0;
        while self.peek().kind == TokenKind::Or {
            let op = self.advance();
            // Each fold deepens the left spine of the tree.
            self.enter(op.position)?;
            folded += 1;
            let rhs = self.and_expr()?;
            node = ConditionNode::Or(Box::new(node), Box::new(rhs));
        }
        self.depth -= folded;
        Ok(node)
    }

    fn and_expr(&mut self) -> Result<ConditionNode, ParseError> {
        let mut node = self.unary()?;
        let mut folded = 0;
        while self.peek().kind == TokenKind::And {
            let op = self.advance();
            self.enter(op.position)?;
            folded += 1;
            let rhs = self.unary()?;
            node = ConditionNode::And(Box::new(node), Box::new(rhs));
        }
        self.depth -= folded;
        Ok(node)
    }

    fn unary(&mut self) -> Result<ConditionNode, ParseError> {
        if self.peek().kind == TokenKind::Not {
            let bang = self.advance();
            self.enter(bang.position)?;
            let inner = self.unary()?;
            self.depth -= 1;
            return Ok(!inner);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<ConditionNode, ParseError> {
        let token = self.peek();
        match token.kind {
            TokenKind::LParen => {
                self.advance();
                self.enter(token.position)?;
                let inner = self.or_expr()?;
                let close = self.peek();
                match close.kind {
                    TokenKind::RParen => {
                        self.advance();
                    }
                    TokenKind::Eof => {
                        return Err(ParseError::ExpectedCloseParen {
                            position: close.position,
                        });
                    }
                    _ => return Err(ParseError::unexpected(&close)),
                }
                self.depth -= 1;
                Ok(inner)
            }
            kind if kind.is_operand() => Ok(self.operand_run()),
            _ => Err(ParseError::unexpected(&token)),
        }
    }

    /// Consume consecutive operand tokens into one leaf.
    fn operand_run(&mut self) -> ConditionNode {
        let first = self.advance();
        let mut end = first.end();
        while self.peek().kind.is_operand() {
            end = self.advance().end();
        }
        let text = self.source.get(first.position..end).unwrap_or(first.text);
        ConditionNode::Expression(text.to_owned())
    }
}
