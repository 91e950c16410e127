//! Logos-based lexer for the Java dependency subset
//!
//! Fast tokenization using the logos crate. Only the tokens the
//! dependency grammar consumes are classified; everything else lexes
//! as `Unknown` and is rejected by the parser's normal error path.

use super::engine::{Token, Value};
use super::token_kind::TokenKind;
use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedToken<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexedToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Unknown,
        };

        Some(LexedToken { kind, text, offset })
    }
}

/// Adapt lexer output to the engine's token stream.
///
/// Filters trivia and attaches the semantic payload the actions need:
/// identifier text travels on the value stack, every other terminal
/// carries an empty value.
pub fn token_stream(input: &str) -> impl Iterator<Item = Token> + '_ {
    Lexer::new(input).filter(|t| !t.kind.is_trivia()).map(|t| {
        let value = match t.kind {
            TokenKind::Ident => Value::Text(t.text.to_string()),
            _ => Value::Empty,
        };
        Token {
            kind: t.kind,
            value,
            range: TextRange::at(t.offset, TextSize::of(t.text)),
        }
    })
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\u{000c}]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*+/")]
    BlockComment,

    // =========================================================================
    // KEYWORDS (before Ident; logos prefers the longer fixed match)
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("class")]
    ClassKw,
    #[token("public")]
    PublicKw,
    #[token("protected")]
    ProtectedKw,
    #[token("private")]
    PrivateKw,
    #[token("static")]
    StaticKw,
    #[token("final")]
    FinalKw,
    #[token("abstract")]
    AbstractKw,

    // =========================================================================
    // NAMES
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => TokenKind::Whitespace,
            LineComment => TokenKind::LineComment,
            BlockComment => TokenKind::BlockComment,

            PackageKw => TokenKind::PackageKw,
            ImportKw => TokenKind::ImportKw,
            ClassKw => TokenKind::ClassKw,
            PublicKw => TokenKind::PublicKw,
            ProtectedKw => TokenKind::ProtectedKw,
            PrivateKw => TokenKind::PrivateKw,
            StaticKw => TokenKind::StaticKw,
            FinalKw => TokenKind::FinalKw,
            AbstractKw => TokenKind::AbstractKw,

            Ident => TokenKind::Ident,

            Dot => TokenKind::Dot,
            Star => TokenKind::Star,
            Semicolon => TokenKind::Semicolon,
            Comma => TokenKind::Comma,
            LBrace => TokenKind::LBrace,
            RBrace => TokenKind::RBrace,
        }
    }
}
