mod cursor;
mod error;
pub mod formatter;
mod state;
mod token;

use cursor::SourceChar;
pub use error::{LexicalError, LexicalErrorKind};
use state::{LexerState, LexerStateTransition};
use std::{ops::Range, rc::Rc, str::Chars};
pub use token::{Span, SpanIndex, SpanLength, Token, TokenKind, KEYWORD_HASHMAP};

#[derive(Debug, Clone)]
pub struct LineBreaks {
    line_breaks: Rc<[Range<SpanIndex>]>,
}

impl LineBreaks {
    pub fn new(text: &str) -> Self {
        let line_breaks = if !text.is_empty() {
            let mut line_breaks = Vec::new();
            let mut cursor: SpanIndex = 0.into();
            for (offset, byte) in text.bytes().enumerate() {
                let offset = (offset + 1).into();
                if byte == b'\n' {
                    line_breaks.push(cursor..offset);
                    cursor = offset;
                }
            }
            if !text.ends_with('\n') {
                line_breaks.push(cursor..(text.len() + 1).into());
            }
            line_breaks
        } else {
            vec![0.into()..1.into()]
        };
        Self {
            line_breaks: line_breaks.into(),
        }
    }

    pub fn get_max_line(&self) -> u32 {
        (self.line_breaks.len() + 1) as u32
    }

    /// 1-based line containing the byte `offset`.
    pub fn get_line(&self, offset: SpanIndex) -> u32 {
        self.line_breaks
            .binary_search_by(|r| {
                if offset < r.start {
                    std::cmp::Ordering::Greater
                } else if offset >= r.end {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .map(|v| (v + 1) as u32)
            .unwrap_or(self.get_max_line())
    }

    pub fn get_line_from_span(&self, span: Span) -> u32 {
        self.get_line(span.start)
    }
}

#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    chars: Chars<'src>,
    state: LexerState,
    offset: SpanIndex,
    lookahead: Option<SourceChar>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.chars(),
            state: LexerState::default(),
            offset: 0.into(),
            lookahead: None,
            finished: false,
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_line_breaks(&self) -> LineBreaks {
        LineBreaks::new(self.source)
    }

    /// Lexes the whole source. The returned tokens always end with exactly one `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tracing::debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }
}

impl<'src> Lexer<'src> {
    fn next_char(&mut self) -> Option<SourceChar> {
        if let Some(lookahead) = self.lookahead.take() {
            return Some(lookahead);
        }
        let c = self.chars.next()?;
        let offset = self.offset;
        self.offset = self.offset + c.len_utf8();
        Some(SourceChar { value: c, offset })
    }

    fn put_back_char(&mut self, c: SourceChar) {
        self.lookahead = Some(c);
    }

    /// Produces the next token. Once the source is exhausted every call yields `Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        loop {
            let next_char = self.next_char();
            let transition = self.state.execute(self.source, next_char);

            match transition {
                LexerStateTransition::Stay => {}
                LexerStateTransition::ChangeState(new_state) => {
                    self.state = new_state;
                }
                LexerStateTransition::ChangeStateAndEmit {
                    new_state,
                    token_or_error,
                } => {
                    self.state = new_state;
                    if let Ok(Token {
                        kind: TokenKind::Eof,
                        ..
                    }) = token_or_error
                    {
                        self.finished = true;
                    }
                    return token_or_error;
                }
                LexerStateTransition::ChangeStateAndEmitAndPutBack {
                    new_state,
                    token_or_error,
                    put_back,
                } => {
                    self.state = new_state;
                    self.put_back_char(put_back);
                    return token_or_error;
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token, LexicalError>;

    /// Yields tokens up to and including the first `Eof`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            None
        } else {
            Some(self.next_token())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .expect("Source is valid.")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn two_character_comparisons_take_priority() {
        assert_eq!(
            kinds("a<=b>=c<d>e"),
            vec![
                TokenKind::Ident,
                TokenKind::LessThanEqual,
                TokenKind::Ident,
                TokenKind::GreaterThanEqual,
                TokenKind::Ident,
                TokenKind::LessThan,
                TokenKind::Ident,
                TokenKind::GreaterThan,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comparison_at_end_of_source() {
        assert_eq!(kinds("<"), vec![TokenKind::LessThan, TokenKind::Eof]);
        assert_eq!(kinds(">="), vec![TokenKind::GreaterThanEqual, TokenKind::Eof]);
    }

    #[test]
    fn identifiers_are_letters_only() {
        let tokens = Lexer::new("abc12").tokenize().expect("Source is valid.");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text, "abc");
        assert_eq!(tokens[1].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[1].text, "12");
    }

    #[test]
    fn keywords_are_exact_matches() {
        assert_eq!(
            kinds("let print while lets Print"),
            vec![
                TokenKind::KeywordLet,
                TokenKind::KeywordPrint,
                TokenKind::KeywordWhile,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_contents_are_verbatim() {
        let tokens = Lexer::new(r#""a\nb" x"#).tokenize().expect("Source is valid.");
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, r"a\nb");
        assert_eq!(tokens[0].span.range(), 0..6);
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn unterminated_string_stops_at_end_of_source() {
        let tokens = Lexer::new("\"abc").tokenize().expect("Source is valid.");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, "abc");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn unrecognized_character_reports_position() {
        let error = Lexer::new("let x = 1 % 2;")
            .tokenize()
            .expect_err("`%` is not part of the language.");
        assert_eq!(error.kind, LexicalErrorKind::Unrecognized('%'));
        assert_eq!(error.span.range(), 10..11);
    }

    #[test]
    fn iterator_stops_after_eof() {
        let tokens: Vec<_> = Lexer::new("x").collect();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn line_numbers_from_offsets() {
        let line_breaks = LineBreaks::new("a\nbb\nccc");
        assert_eq!(line_breaks.get_line(0.into()), 1);
        assert_eq!(line_breaks.get_line(2.into()), 2);
        assert_eq!(line_breaks.get_line(5.into()), 3);
    }
}
