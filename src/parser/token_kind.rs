//! Terminal vocabulary of the dependency grammar.
//!
//! The first block of variants, up to and including `Unknown`, are the
//! grammar terminals; their discriminants index the columns of the
//! action table. Trivia kinds follow and never reach the engine.

/// Token kinds produced by the lexer.
///
/// `Error` is the distinguished error terminal shifted only during
/// recovery; `Eof` is synthesized by the engine when the token stream
/// runs out; `Unknown` covers input the lexer cannot classify, which
/// the grammar rejects through the ordinary syntax-error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum TokenKind {
    // =========================================================================
    // TERMINALS (discriminant == action-table column)
    // =========================================================================
    PackageKw = 0,
    ImportKw,
    ClassKw,
    PublicKw,
    ProtectedKw,
    PrivateKw,
    StaticKw,
    FinalKw,
    AbstractKw,
    Ident,
    Dot,
    Star,
    Semicolon,
    Comma,
    LBrace,
    RBrace,
    Error,
    Eof,
    Unknown,

    // =========================================================================
    // TRIVIA (filtered before parsing)
    // =========================================================================
    Whitespace,
    LineComment,
    BlockComment,
}

/// Number of grammar terminals (action-table columns).
pub const TERMINAL_COUNT: usize = TokenKind::Unknown as usize + 1;

/// All grammar terminals, in column order.
pub const TERMINALS: [TokenKind; TERMINAL_COUNT] = [
    TokenKind::PackageKw,
    TokenKind::ImportKw,
    TokenKind::ClassKw,
    TokenKind::PublicKw,
    TokenKind::ProtectedKw,
    TokenKind::PrivateKw,
    TokenKind::StaticKw,
    TokenKind::FinalKw,
    TokenKind::AbstractKw,
    TokenKind::Ident,
    TokenKind::Dot,
    TokenKind::Star,
    TokenKind::Semicolon,
    TokenKind::Comma,
    TokenKind::LBrace,
    TokenKind::RBrace,
    TokenKind::Error,
    TokenKind::Eof,
    TokenKind::Unknown,
];

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Column index into the action table.
    ///
    /// Valid only for non-trivia kinds; trivia never reaches the
    /// engine, so the caller checks `is_trivia` first.
    pub fn terminal_index(self) -> usize {
        self as usize
    }

    /// User-facing description for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::PackageKw => "'package'",
            TokenKind::ImportKw => "'import'",
            TokenKind::ClassKw => "'class'",
            TokenKind::PublicKw => "'public'",
            TokenKind::ProtectedKw => "'protected'",
            TokenKind::PrivateKw => "'private'",
            TokenKind::StaticKw => "'static'",
            TokenKind::FinalKw => "'final'",
            TokenKind::AbstractKw => "'abstract'",
            TokenKind::Ident => "identifier",
            TokenKind::Dot => "'.'",
            TokenKind::Star => "'*'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Error => "error",
            TokenKind::Eof => "end of input",
            TokenKind::Unknown => "unrecognized input",
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineComment => "comment",
            TokenKind::BlockComment => "comment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_indices_are_dense() {
        assert_eq!(TokenKind::PackageKw.terminal_index(), 0);
        assert_eq!(TokenKind::Unknown.terminal_index(), TERMINAL_COUNT - 1);
        assert!(TokenKind::Eof.terminal_index() < TERMINAL_COUNT);
    }

    #[test]
    fn test_terminals_array_matches_indices() {
        for (i, kind) in TERMINALS.iter().enumerate() {
            assert_eq!(kind.terminal_index(), i);
        }
    }

    #[test]
    fn test_trivia_sits_past_the_terminals() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Whitespace as usize >= TERMINAL_COUNT);
        assert!(!TokenKind::Semicolon.is_trivia());
    }
}
