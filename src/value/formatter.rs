use super::error::{RuntimeError, RuntimeErrorKind};
use super::Value;
use crate::lexer::LineBreaks;
use crate::report::{self, Diagnostic};
use ariadne::{Color, Fmt};
use std::path::Path;

pub trait ValueFormatter {
    fn format(&self, value: &Value) -> String;
    fn format_error(&self, error: &RuntimeError) -> String;
}

pub struct DebugFormatter;

impl ValueFormatter for DebugFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value:?}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("{error:?}")
    }
}

pub struct BasicFormatter {
    line_breaks: LineBreaks,
}

impl BasicFormatter {
    pub fn new(text: &str) -> Self {
        let line_breaks = LineBreaks::new(text);
        Self { line_breaks }
    }
}

impl ValueFormatter for BasicFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        format!("[line {line}] Error: {error}")
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

impl<'src> PrettyFormatter<'src> {
    fn format_verbose(value: &Value) -> String {
        match value {
            Value::Integer(v) => format!("Integer({v})"),
            Value::Text(v) => format!("Text(\"{v}\")"),
        }
    }
}

impl<'src> ValueFormatter for PrettyFormatter<'src> {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let code = error.code();
        let span = error.span;
        let color = Color::BrightRed;
        let diagnostic = match &error.kind {
            RuntimeErrorKind::UndefinedVariable(name) => Diagnostic {
                code,
                message: "Undefined variable".into(),
                label: format!("{} is never assigned before this point", name.fg(color)),
                span,
                color,
                note: Some("Bind it first with `let` or an assignment.".into()),
            },
            RuntimeErrorKind::TypeError { operator, lhs, rhs } => Diagnostic {
                code,
                message: format!("Type error in binary operation {operator}"),
                label: format!(
                    "Operands are {} and {}",
                    Self::format_verbose(lhs).fg(color),
                    Self::format_verbose(rhs).fg(color)
                ),
                span,
                color,
                note: Some("Only `+` accepts text operands.".into()),
            },
            RuntimeErrorKind::DivisionByZero => Diagnostic {
                code,
                message: "Division by zero".into(),
                label: "The divisor evaluates to 0".into(),
                span,
                color,
                note: None,
            },
            RuntimeErrorKind::UnknownFunction(name) => Diagnostic {
                code,
                message: "Unknown function".into(),
                label: format!("{} is not a builtin", name.fg(color)),
                span,
                color,
                note: Some("The builtins are `read`, `len` and `substring` (or `substr`).".into()),
            },
            RuntimeErrorKind::InvalidArgumentCount {
                builtin,
                actual,
                expected,
            } => Diagnostic {
                code,
                message: "Invalid argument count".into(),
                label: format!(
                    "{builtin} takes {} but was given {}",
                    expected.fg(Color::BrightGreen),
                    actual.fg(color)
                ),
                span,
                color,
                note: None,
            },
            RuntimeErrorKind::InvalidArgument {
                builtin,
                position,
                expected,
                actual,
            } => Diagnostic {
                code,
                message: format!("Invalid argument to {builtin}"),
                label: format!(
                    "Argument {position} should be {} but is {}",
                    expected.fg(Color::BrightGreen),
                    Self::format_verbose(actual).fg(color)
                ),
                span,
                color,
                note: None,
            },
            RuntimeErrorKind::OutOfRange {
                builtin,
                start,
                count,
                length,
            } => Diagnostic {
                code,
                message: format!("Out of range {builtin}"),
                label: format!(
                    "Start {} and count {} on text of length {length}",
                    start.fg(color),
                    count.fg(color)
                ),
                span,
                color,
                note: Some("The start must lie within the text and the count must not be negative.".into()),
            },
            kind @ (RuntimeErrorKind::EndOfInput
            | RuntimeErrorKind::InvalidInteger(_)
            | RuntimeErrorKind::InputFailure(_)) => Diagnostic {
                code,
                message: format!("{kind}"),
                label: "While evaluating this call".into(),
                span,
                color,
                note: None,
            },
        };
        report::render(self.text, self.path, diagnostic)
    }
}
