pub mod error;
pub mod formatter;

use crate::parser::expression::InfixOperator;
use compact_str::{format_compact, CompactString};
use error::RuntimeErrorKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(CompactString),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(v) => *v != 0,
            Self::Text(v) => !v.is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "Integer",
            Self::Text(_) => "Text",
        }
    }
}

impl Value {
    /// Applies a binary operator. Integers support every operator; any other pairing only
    /// supports `+`, which concatenates the rendered operands.
    pub fn apply(&self, operator: InfixOperator, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Self::Integer(lhs), Self::Integer(rhs)) => Self::apply_integer(operator, *lhs, *rhs),
            (lhs, rhs) if operator == InfixOperator::Add => {
                Ok(Self::Text(format_compact!("{lhs}{rhs}")))
            }
            (lhs, rhs) => Err(RuntimeErrorKind::TypeError {
                operator,
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            }),
        }
    }

    fn apply_integer(operator: InfixOperator, lhs: i64, rhs: i64) -> Result<Value, RuntimeErrorKind> {
        let value = match operator {
            InfixOperator::Add => lhs.wrapping_add(rhs).into(),
            InfixOperator::Subtract => lhs.wrapping_sub(rhs).into(),
            InfixOperator::Multiply => lhs.wrapping_mul(rhs).into(),
            InfixOperator::Divide => {
                if rhs == 0 {
                    return Err(RuntimeErrorKind::DivisionByZero);
                }
                lhs.wrapping_div(rhs).into()
            }
            InfixOperator::LessThan => (lhs < rhs).into(),
            InfixOperator::LessThanEqual => (lhs <= rhs).into(),
            InfixOperator::GreaterThan => (lhs > rhs).into(),
            InfixOperator::GreaterThanEqual => (lhs >= rhs).into(),
        };
        Ok(value)
    }
}
