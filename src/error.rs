use crate::lexer::{LexicalError, Span};
use crate::parser::ParserError;
use crate::value::error::RuntimeError;
use thiserror::Error;

/// Any failure that aborts a run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterpretError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl InterpretError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Lexical(error) => error.code(),
            Self::Parser(error) => error.code(),
            Self::Runtime(error) => error.code(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Lexical(error) => error.span,
            Self::Parser(error) => error.span,
            Self::Runtime(error) => error.span,
        }
    }

    /// Process exit status: 65 for malformed programs, 70 for failed runs.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Lexical(_) | Self::Parser(_) => 65,
            Self::Runtime(_) => 70,
        }
    }
}
