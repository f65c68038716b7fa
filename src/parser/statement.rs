use super::expression::Expression;
use crate::{lexer::Span, string::Ident};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Print(PrintStatement),
    While(WhileStatement),
    Expression(ExpressionStatement),
}

impl Statement {
    pub fn get_span(&self) -> Span {
        match self {
            Statement::Let(stmt) => stmt.span,
            Statement::Print(stmt) => stmt.span,
            Statement::While(stmt) => stmt.span,
            Statement::Expression(stmt) => stmt.span,
        }
    }
}

/// Binds or rebinds `name`. Bare `name = value;` assignments parse to this as well.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub name: Ident,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub expr: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expr: Expression,
    pub span: Span,
}
