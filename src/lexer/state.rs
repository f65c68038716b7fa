use super::cursor::SourceChar;
use super::token::{Span, SpanIndex, Token, TokenKind, KEYWORD_HASHMAP};
use super::{LexicalError, LexicalErrorKind};

pub enum LexerStateTransition {
    Stay,
    ChangeState(LexerState),
    ChangeStateAndEmit {
        new_state: LexerState,
        token_or_error: Result<Token, LexicalError>,
    },
    ChangeStateAndEmitAndPutBack {
        new_state: LexerState,
        token_or_error: Result<Token, LexicalError>,
        put_back: SourceChar,
    },
}

impl LexerStateTransition {
    fn emit(token: Token) -> Self {
        Self::ChangeStateAndEmit {
            new_state: LexerState::Normal,
            token_or_error: Ok(token),
        }
    }

    /// Emits `token` and returns `next_char` (if any) to the lexer for the normal state.
    fn emit_and_put_back(token: Token, next_char: Option<SourceChar>) -> Self {
        match next_char {
            Some(put_back) => Self::ChangeStateAndEmitAndPutBack {
                new_state: LexerState::Normal,
                token_or_error: Ok(token),
                put_back,
            },
            None => Self::emit(token),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub enum LexerState {
    #[default]
    Normal,
    Ident {
        start: SpanIndex,
    },
    Integer {
        start: SpanIndex,
    },
    String {
        start: SpanIndex,
    },
    LessThan {
        start: SpanIndex,
    },
    GreaterThan {
        start: SpanIndex,
    },
}

impl LexerState {
    pub fn execute(&self, source: &str, next_char: Option<SourceChar>) -> LexerStateTransition {
        let end_of_source: SpanIndex = source.len().into();
        match *self {
            LexerState::Normal => Self::execute_normal(end_of_source, next_char),
            LexerState::Ident { start } => match next_char {
                Some(c) if c.value.is_alphabetic() => LexerStateTransition::Stay,
                _ => {
                    let end = next_char.map_or(end_of_source, |c| c.offset);
                    let span = Span::new(start, end);
                    let lexeme = &source[span.range()];
                    let kind = KEYWORD_HASHMAP
                        .get(lexeme)
                        .copied()
                        .unwrap_or(TokenKind::Ident);
                    let token = Token {
                        kind,
                        span,
                        text: lexeme.into(),
                    };
                    LexerStateTransition::emit_and_put_back(token, next_char)
                }
            },
            LexerState::Integer { start } => match next_char {
                Some(c) if c.value.is_ascii_digit() => LexerStateTransition::Stay,
                _ => {
                    let end = next_char.map_or(end_of_source, |c| c.offset);
                    let span = Span::new(start, end);
                    let token = Token {
                        kind: TokenKind::IntegerLiteral,
                        span,
                        text: source[span.range()].into(),
                    };
                    LexerStateTransition::emit_and_put_back(token, next_char)
                }
            },
            LexerState::String { start } => match next_char {
                Some(c) if c.value != '"' => LexerStateTransition::Stay,
                // An unterminated literal runs to the end of the source.
                _ => {
                    let (contents_end, end) = match next_char {
                        Some(c) => (c.offset, c.next_offset()),
                        None => (end_of_source, end_of_source),
                    };
                    let contents = Span::new(start + 1, contents_end);
                    let token = Token {
                        kind: TokenKind::StringLiteral,
                        span: Span::new(start, end),
                        text: source[contents.range()].into(),
                    };
                    LexerStateTransition::emit(token)
                }
            },
            LexerState::LessThan { start } => Self::execute_comparison(
                start,
                next_char,
                TokenKind::LessThan,
                TokenKind::LessThanEqual,
            ),
            LexerState::GreaterThan { start } => Self::execute_comparison(
                start,
                next_char,
                TokenKind::GreaterThan,
                TokenKind::GreaterThanEqual,
            ),
        }
    }

    fn execute_normal(
        end_of_source: SpanIndex,
        next_char: Option<SourceChar>,
    ) -> LexerStateTransition {
        let Some(c) = next_char else {
            return LexerStateTransition::emit(Token::fixed(
                TokenKind::Eof,
                Span::new(end_of_source, end_of_source),
            ));
        };

        let start = c.offset;
        let just = |kind: TokenKind| {
            LexerStateTransition::emit(Token::fixed(kind, Span::new(start, c.next_offset())))
        };

        match c.value {
            // Single character tokens
            '(' => just(TokenKind::LeftParenthesis),
            ')' => just(TokenKind::RightParenthesis),
            '{' => just(TokenKind::LeftBrace),
            '}' => just(TokenKind::RightBrace),
            ';' => just(TokenKind::Semicolon),
            ',' => just(TokenKind::Comma),
            '+' => just(TokenKind::Plus),
            '-' => just(TokenKind::Minus),
            '*' => just(TokenKind::Star),
            '/' => just(TokenKind::Slash),
            '=' => just(TokenKind::Equal),
            // Possible two character tokens
            '<' => LexerStateTransition::ChangeState(LexerState::LessThan { start }),
            '>' => LexerStateTransition::ChangeState(LexerState::GreaterThan { start }),
            // String literal
            '"' => LexerStateTransition::ChangeState(LexerState::String { start }),
            c if c.is_whitespace() => LexerStateTransition::Stay,
            c if c.is_alphabetic() => {
                LexerStateTransition::ChangeState(LexerState::Ident { start })
            }
            c if c.is_ascii_digit() => {
                LexerStateTransition::ChangeState(LexerState::Integer { start })
            }
            c => LexerStateTransition::ChangeStateAndEmit {
                new_state: LexerState::Normal,
                token_or_error: Err(LexicalError {
                    kind: LexicalErrorKind::Unrecognized(c),
                    span: Span::new(start, start + c.len_utf8()),
                }),
            },
        }
    }

    fn execute_comparison(
        start: SpanIndex,
        next_char: Option<SourceChar>,
        single: TokenKind,
        with_equal: TokenKind,
    ) -> LexerStateTransition {
        match next_char {
            Some(c) if c.value == '=' => LexerStateTransition::emit(Token::fixed(
                with_equal,
                Span::new(start, c.next_offset()),
            )),
            _ => LexerStateTransition::emit_and_put_back(
                Token::fixed(single, Span::new(start, start + 1)),
                next_char,
            ),
        }
    }
}
