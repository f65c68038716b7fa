mod span;

use compact_str::CompactString;
pub use span::{Span, SpanIndex, SpanLength};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

/// The hashmap for keywords
pub static KEYWORD_HASHMAP: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("let", TokenKind::KeywordLet);
    map.insert("print", TokenKind::KeywordPrint);
    map.insert("while", TokenKind::KeywordWhile);
    map
});

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Parentheses
    LeftParenthesis,
    RightParenthesis,
    // Braces
    LeftBrace,
    RightBrace,
    // Miscellaneous
    Comma,
    Semicolon,
    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,

    // Literals
    IntegerLiteral,
    StringLiteral,
    Ident,

    // Keywords
    KeywordLet,
    KeywordPrint,
    KeywordWhile,

    // End of file.
    Eof,
}

impl TokenKind {
    /// The fixed spelling of keyword and punctuation tokens.
    pub fn canonical(&self) -> Option<&'static str> {
        match self {
            TokenKind::LeftParenthesis => Some("("),
            TokenKind::RightParenthesis => Some(")"),
            TokenKind::LeftBrace => Some("{"),
            TokenKind::RightBrace => Some("}"),
            TokenKind::Comma => Some(","),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Star => Some("*"),
            TokenKind::Slash => Some("/"),
            TokenKind::Equal => Some("="),
            TokenKind::LessThan => Some("<"),
            TokenKind::LessThanEqual => Some("<="),
            TokenKind::GreaterThan => Some(">"),
            TokenKind::GreaterThanEqual => Some(">="),
            TokenKind::KeywordLet => Some("let"),
            TokenKind::KeywordPrint => Some("print"),
            TokenKind::KeywordWhile => Some("while"),
            TokenKind::Eof => Some(""),
            TokenKind::IntegerLiteral | TokenKind::StringLiteral | TokenKind::Ident => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::LeftParenthesis => write!(f, "LEFT_PAREN"),
            TokenKind::RightParenthesis => write!(f, "RIGHT_PAREN"),
            TokenKind::LeftBrace => write!(f, "LEFT_BRACE"),
            TokenKind::RightBrace => write!(f, "RIGHT_BRACE"),
            TokenKind::Comma => write!(f, "COMMA"),
            TokenKind::Semicolon => write!(f, "SEMICOLON"),
            TokenKind::Plus => write!(f, "PLUS"),
            TokenKind::Minus => write!(f, "MINUS"),
            TokenKind::Star => write!(f, "STAR"),
            TokenKind::Slash => write!(f, "SLASH"),
            TokenKind::Equal => write!(f, "EQUAL"),
            TokenKind::LessThan => write!(f, "LESS"),
            TokenKind::LessThanEqual => write!(f, "LESS_EQUAL"),
            TokenKind::GreaterThan => write!(f, "GREATER"),
            TokenKind::GreaterThanEqual => write!(f, "GREATER_EQUAL"),
            TokenKind::IntegerLiteral => write!(f, "NUMBER"),
            TokenKind::StringLiteral => write!(f, "STRING"),
            TokenKind::Ident => write!(f, "IDENTIFIER"),
            TokenKind::KeywordLet => write!(f, "LET"),
            TokenKind::KeywordPrint => write!(f, "PRINT"),
            TokenKind::KeywordWhile => write!(f, "WHILE"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Identifier name, digit run or string contents. Keywords and punctuation keep their
    /// canonical spelling.
    pub text: CompactString,
}

impl Token {
    /// Builds a keyword or punctuation token whose text is its canonical spelling.
    pub fn fixed(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            text: kind.canonical().unwrap_or_default().into(),
        }
    }
}
