use crate::lexer::{Span, Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserErrorKind {
    #[error("Expected {expected} but got {}.", .actual.kind)]
    UnexpectedToken { actual: Token, expected: TokenKind },
    #[error("Expected an expression but got {}.", .0.kind)]
    NonExpression(Token),
    #[error("Integer literal {} does not fit in a 64-bit integer.", .0.text)]
    IntegerOverflow(Token),
    #[error("Expression nests too deeply at {}.", .0.kind)]
    NestingTooDeep(Token),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    pub span: Span,
}

impl ParserError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            ParserErrorKind::UnexpectedToken { .. } => "PE001",
            ParserErrorKind::NonExpression(_) => "PE002",
            ParserErrorKind::IntegerOverflow(_) => "PE003",
            ParserErrorKind::NestingTooDeep(_) => "PE004",
        }
    }
}

impl From<ParserErrorKind> for ParserError {
    fn from(kind: ParserErrorKind) -> Self {
        let span = match kind {
            ParserErrorKind::UnexpectedToken { ref actual, .. } => actual.span,
            ParserErrorKind::NonExpression(ref token) => token.span,
            ParserErrorKind::IntegerOverflow(ref token) => token.span,
            ParserErrorKind::NestingTooDeep(ref token) => token.span,
        };
        Self { kind, span }
    }
}
