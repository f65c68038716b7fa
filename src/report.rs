use crate::lexer::Span;
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use std::path::Path;

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

/// A single-label error report over a span of the source text.
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    pub label: String,
    pub span: Span,
    pub color: Color,
    pub note: Option<String>,
}

/// Renders `diagnostic` against `text` as an ariadne report.
pub fn render(text: &str, path: &Path, diagnostic: Diagnostic) -> String {
    let path = path.to_string_lossy();
    let path: &str = &path;
    let range = clamp_range(text, diagnostic.span);
    let mut output = std::io::Cursor::new(Vec::new());
    let mut report = Report::build(ReportKind::Error, (path, range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_code(diagnostic.code)
        .with_message(diagnostic.message)
        .with_label(
            Label::new((path, range))
                .with_message(diagnostic.label)
                .with_color(diagnostic.color),
        );
    if let Some(note) = diagnostic.note {
        report = report.with_note(note);
    }
    report
        .finish()
        .write((path, Source::from(text)), &mut output)
        .expect(ARIADNE_WRITE_MSG);
    String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
}

/// Clamps `span` into the bounds of `text`.
fn clamp_range(text: &str, span: Span) -> std::ops::Range<usize> {
    let range = span.range();
    let start = range.start.min(text.len());
    let end = range.end.min(text.len()).max(start);
    start..end
}
