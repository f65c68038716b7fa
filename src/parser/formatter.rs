use super::{
    expression::{Expression, ExpressionAtom, ExpressionAtomKind, ExpressionNode, ExpressionNodeRef},
    statement::Statement,
    ParserError, ParserErrorKind, Program,
};
use crate::{
    lexer::LineBreaks,
    report::{self, Diagnostic},
};
use ariadne::{Color, Fmt};
use std::path::Path;

pub trait ParserFormatter {
    fn format_program(&self, program: &Program) -> String;
    fn format_expression(&self, tree: &Expression) -> String;
    fn format_error(&self, error: &ParserError) -> String;
}

pub struct DebugFormatter;

impl ParserFormatter for DebugFormatter {
    fn format_program(&self, program: &Program) -> String {
        format!("{program:#?}")
    }

    fn format_expression(&self, tree: &Expression) -> String {
        format!("{tree:?}")
    }

    fn format_error(&self, error: &ParserError) -> String {
        format!("{error:?}")
    }
}

/// Renders programs as s-expressions and errors as `[line N] Error: ...` lines.
pub struct BasicFormatter {
    line_breaks: LineBreaks,
}

impl BasicFormatter {
    pub fn new(text: &str) -> Self {
        Self {
            line_breaks: LineBreaks::new(text),
        }
    }
}

impl ParserFormatter for BasicFormatter {
    fn format_program(&self, program: &Program) -> String {
        SExpressionFormatter::format_statements(program)
    }

    fn format_expression(&self, tree: &Expression) -> String {
        SExpressionFormatter::format_node(tree, tree.get_root_ref())
    }

    fn format_error(&self, error: &ParserError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        format!("[line {line}] Error: {error}")
    }
}

pub struct SExpressionFormatter {
    basic: BasicFormatter,
}

impl SExpressionFormatter {
    pub fn new(text: &str) -> Self {
        Self {
            basic: BasicFormatter::new(text),
        }
    }
}

impl SExpressionFormatter {
    fn format_atom(atom: &ExpressionAtom) -> String {
        match atom.kind {
            ExpressionAtomKind::Number(v) => format!("{v}"),
            ExpressionAtomKind::StringLiteral(ref v) => format!("\"{v}\""),
            ExpressionAtomKind::Identifier(ref name) => format!("{name}"),
        }
    }

    fn format_node(tree: &Expression, node: ExpressionNodeRef) -> String {
        let current_node = tree
            .get_node(node)
            .expect("Caller should make sure the ref is valid.");

        match current_node {
            ExpressionNode::Atom(atom) => Self::format_atom(atom),
            ExpressionNode::Infix { operator, lhs, rhs } => {
                format!(
                    "({operator} {} {})",
                    Self::format_node(tree, *lhs),
                    Self::format_node(tree, *rhs),
                )
            }
            ExpressionNode::Call {
                callee, arguments, ..
            } => {
                let mut buffer = format!("(call {callee}");
                for argument in arguments.iter() {
                    buffer.push(' ');
                    buffer.push_str(&Self::format_node(tree, *argument));
                }
                buffer.push(')');
                buffer
            }
        }
    }

    fn format_statement(statement: &Statement) -> String {
        match statement {
            Statement::Let(stmt) => format!(
                "(let {} {})",
                stmt.name,
                Self::format_node(&stmt.value, stmt.value.get_root_ref())
            ),
            Statement::Print(stmt) => format!(
                "(print {})",
                Self::format_node(&stmt.expr, stmt.expr.get_root_ref())
            ),
            Statement::While(stmt) => {
                let mut buffer = format!(
                    "(while {}",
                    Self::format_node(&stmt.condition, stmt.condition.get_root_ref())
                );
                for inner in stmt.body.iter() {
                    buffer.push(' ');
                    buffer.push_str(&Self::format_statement(inner));
                }
                buffer.push(')');
                buffer
            }
            Statement::Expression(stmt) => Self::format_node(&stmt.expr, stmt.expr.get_root_ref()),
        }
    }

    fn format_statements(program: &Program) -> String {
        program
            .iter()
            .map(Self::format_statement)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ParserFormatter for SExpressionFormatter {
    fn format_program(&self, program: &Program) -> String {
        Self::format_statements(program)
    }

    fn format_expression(&self, tree: &Expression) -> String {
        Self::format_node(tree, tree.get_root_ref())
    }

    fn format_error(&self, error: &ParserError) -> String {
        self.basic.format_error(error)
    }
}

pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src Path,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self { text, path }
    }
}

impl<'src> ParserFormatter for PrettyFormatter<'src> {
    fn format_program(&self, program: &Program) -> String {
        SExpressionFormatter::format_statements(program)
    }

    fn format_expression(&self, tree: &Expression) -> String {
        SExpressionFormatter::format_node(tree, tree.get_root_ref())
    }

    fn format_error(&self, error: &ParserError) -> String {
        let diagnostic = match &error.kind {
            ParserErrorKind::UnexpectedToken { actual, expected } => Diagnostic {
                code: error.code(),
                message: format!("Expected {expected}"),
                label: format!(
                    "Found {} instead of {}",
                    actual.kind.fg(Color::BrightRed),
                    expected.fg(Color::BrightGreen)
                ),
                span: error.span,
                color: Color::BrightRed,
                note: None,
            },
            ParserErrorKind::NonExpression(token) => Diagnostic {
                code: error.code(),
                message: "Expected an expression".into(),
                label: format!("{} cannot start an expression", token.kind.fg(Color::BrightRed)),
                span: error.span,
                color: Color::BrightRed,
                note: Some("Expressions start with a number, a string, a name or `(`.".into()),
            },
            ParserErrorKind::IntegerOverflow(token) => Diagnostic {
                code: error.code(),
                message: "Integer literal is too large".into(),
                label: format!("{} does not fit in 64 bits", (&token.text).fg(Color::BrightRed)),
                span: error.span,
                color: Color::BrightRed,
                note: Some(format!("The largest integer literal is {}.", i64::MAX)),
            },
            ParserErrorKind::NestingTooDeep(token) => Diagnostic {
                code: error.code(),
                message: "Expression nests too deeply".into(),
                label: format!("{} goes past the nesting limit", token.kind.fg(Color::BrightRed)),
                span: error.span,
                color: Color::BrightRed,
                note: Some("Split the expression using intermediate variables.".into()),
            },
        };
        report::render(self.text, self.path, diagnostic)
    }
}
