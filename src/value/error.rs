use super::Value;
use crate::builtin::Builtin;
use crate::lexer::Span;
use crate::parser::expression::InfixOperator;
use crate::string::IdentName;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(IdentName),
    #[error("Type error in binary operation {operator}: [{} , {}]", .lhs.type_name(), .rhs.type_name())]
    TypeError {
        operator: InfixOperator,
        lhs: Value,
        rhs: Value,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Unknown function: {0}")]
    UnknownFunction(IdentName),
    #[error("Invalid Argument Count: {builtin} expects {expected} but got {actual}")]
    InvalidArgumentCount {
        builtin: Builtin,
        actual: usize,
        expected: usize,
    },
    #[error("Invalid Argument: {builtin} expects {expected} as argument {position} but got {}", .actual.type_name())]
    InvalidArgument {
        builtin: Builtin,
        position: usize,
        expected: &'static str,
        actual: Value,
    },
    #[error("Out of range: {builtin} with start {start} and count {count} on text of length {length}")]
    OutOfRange {
        builtin: Builtin,
        start: i64,
        count: i64,
        length: usize,
    },
    #[error("End of input")]
    EndOfInput,
    #[error("Input line {0} does not fit in a 64-bit integer")]
    InvalidInteger(CompactString),
    #[error("Failed to read input: {0}")]
    InputFailure(CompactString),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

impl RuntimeError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::UndefinedVariable(_) => "RT001",
            RuntimeErrorKind::TypeError { .. } => "RT002",
            RuntimeErrorKind::DivisionByZero => "RT003",
            RuntimeErrorKind::UnknownFunction(_) => "RT004",
            RuntimeErrorKind::InvalidArgumentCount { .. } => "RT005",
            RuntimeErrorKind::InvalidArgument { .. } => "RT006",
            RuntimeErrorKind::OutOfRange { .. } => "RT007",
            RuntimeErrorKind::EndOfInput => "RT008",
            RuntimeErrorKind::InvalidInteger(_) => "RT009",
            RuntimeErrorKind::InputFailure(_) => "RT010",
        }
    }
}
