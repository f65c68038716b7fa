use super::{
    token::{Token, TokenKind},
    LineBreaks,
};
use crate::{
    lexer::{Lexer, LexicalError, LexicalErrorKind},
    report::{self, Diagnostic},
};
use ariadne::{Color, Fmt};
use std::path::Path;

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_lexical_error(&self, error: &LexicalError) -> String;
}

pub trait ToFormatter<F>
where
    F: TokenFormatter,
{
    fn create_formatter(&self) -> F;
}

pub struct BasicFormatter<'src> {
    text: &'src str,
    line_breaks: LineBreaks,
}

impl<'src> BasicFormatter<'src> {
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            line_breaks: LineBreaks::new(text),
        }
    }
}

impl<'src> ToFormatter<BasicFormatter<'src>> for Lexer<'src> {
    fn create_formatter(&self) -> BasicFormatter<'src> {
        BasicFormatter {
            text: self.get_source(),
            line_breaks: self.get_line_breaks(),
        }
    }
}

impl<'src> TokenFormatter for BasicFormatter<'src> {
    fn format(&self, token: &Token) -> String {
        let kind = token.kind;
        match kind {
            TokenKind::IntegerLiteral => {
                let lexeme = &self.text[token.span.range()];
                format!("{kind} {lexeme} {}", token.text)
            }
            TokenKind::StringLiteral => {
                let lexeme = &self.text[token.span.range()];
                format!("{kind} {lexeme} {}", token.text)
            }
            TokenKind::Ident => format!("{kind} {} null", token.text),
            _ => format!("{kind} {} null", kind.canonical().unwrap_or_default()),
        }
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => {
                format!("[line {line}] Error: Unexpected character: {c}")
            }
        }
    }
}

pub struct DebugFormatter;

impl<'src> ToFormatter<DebugFormatter> for Lexer<'src> {
    fn create_formatter(&self) -> DebugFormatter {
        DebugFormatter {}
    }
}

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}

/// Formats tokens like [`BasicFormatter`] but renders errors as annotated source reports.
pub struct PrettyFormatter<'src> {
    basic: BasicFormatter<'src>,
    path: &'src Path,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self {
            basic: BasicFormatter::new(text),
            path,
        }
    }
}

impl<'src> TokenFormatter for PrettyFormatter<'src> {
    fn format(&self, token: &Token) -> String {
        self.basic.format(token)
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let diagnostic = match error.kind {
            LexicalErrorKind::Unrecognized(c) => Diagnostic {
                code: error.code(),
                message: "Unexpected character".into(),
                label: format!("{} is not part of the language", c.fg(Color::BrightRed)),
                span: error.span,
                color: Color::BrightRed,
                note: None,
            },
        };
        report::render(self.basic.text, self.path, diagnostic)
    }
}
