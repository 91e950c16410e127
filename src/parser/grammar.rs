//! The dependency-scanning grammar, expressed as production data.
//!
//! This is the subset of Java the scanner cares about: the package
//! declaration, imports (plain and wildcard), class declarations with
//! arbitrary nesting, and typed member declarations whose type names
//! are dependency edges. The bare `error` productions at the
//! declaration and member levels are the resynchronization points for
//! recovery: after shifting the error terminal the parser reduces as
//! soon as something that can start the next declaration arrives.
//!
//! ```text
//! CompilationUnit → Decls
//! Decls           → ε | Decls Decl
//! Decl            → PackageDecl | ImportDecl | ClassDecl | ';' | error
//! PackageDecl     → 'package' Name ';'
//! ImportDecl      → 'import' Name ';' | 'import' Name '.' '*' ';'
//! ClassDecl       → ClassHeader ClassBody
//! ClassHeader     → Mods 'class' Ident
//! Mods            → ε | Mods Modifier
//! ClassBody       → '{' Members '}'
//! Members         → ε | Members Member
//! Member          → ClassDecl | Field | ';' | error
//! Field           → Mods Name Ident ';'
//! Name            → Ident | Name '.' Ident
//! ```

use super::actions::RuleAction;
use super::token_kind::TokenKind;

/// Nonterminal symbols. `Start` is the augmented start symbol of
/// production 0 and never appears on a right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum NonTerminal {
    Start = 0,
    CompilationUnit,
    Decls,
    Decl,
    PackageDecl,
    ImportDecl,
    ClassDecl,
    ClassHeader,
    Mods,
    Modifier,
    ClassBody,
    Members,
    Member,
    Field,
    Name,
}

/// Number of nonterminals (goto-table columns).
pub const NONTERMINAL_COUNT: usize = NonTerminal::Name as usize + 1;

impl NonTerminal {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A grammar symbol: terminal or nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sym {
    T(TokenKind),
    N(NonTerminal),
}

/// One production: left-hand side, right-hand side, and the semantic
/// action fired when it is reduced.
#[derive(Debug, Clone)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: Vec<Sym>,
    pub action: RuleAction,
}

/// A complete grammar: productions indexed by rule id, rule 0 being
/// the augmented `Start → <start symbol>`.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub productions: Vec<Production>,
}

impl Grammar {
    pub fn production(&self, rule: usize) -> &Production {
        &self.productions[rule]
    }

    /// Rule ids produced by the given nonterminal.
    pub fn rules_for(&self, nt: NonTerminal) -> impl Iterator<Item = usize> + '_ {
        self.productions
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.lhs == nt)
            .map(|(i, _)| i)
    }
}

/// The Java dependency grammar.
pub fn java_grammar() -> Grammar {
    use NonTerminal::*;
    use RuleAction::*;
    use Sym::{N, T};
    use TokenKind as K;

    let rule = |lhs, rhs: Vec<Sym>, action| Production { lhs, rhs, action };

    let productions = vec![
        // 0
        rule(Start, vec![N(CompilationUnit)], Empty),
        // 1
        rule(CompilationUnit, vec![N(Decls)], Empty),
        // 2-3
        rule(Decls, vec![], Empty),
        rule(Decls, vec![N(Decls), N(Decl)], Empty),
        // 4-8
        rule(Decl, vec![N(PackageDecl)], Empty),
        rule(Decl, vec![N(ImportDecl)], Empty),
        rule(Decl, vec![N(ClassDecl)], Empty),
        rule(Decl, vec![T(K::Semicolon)], Empty),
        rule(Decl, vec![T(K::Error)], Empty),
        // 9
        rule(
            PackageDecl,
            vec![T(K::PackageKw), N(Name), T(K::Semicolon)],
            SetPackage(1),
        ),
        // 10-11
        rule(
            ImportDecl,
            vec![T(K::ImportKw), N(Name), T(K::Semicolon)],
            AddImport(1),
        ),
        rule(
            ImportDecl,
            vec![
                T(K::ImportKw),
                N(Name),
                T(K::Dot),
                T(K::Star),
                T(K::Semicolon),
            ],
            AddWildcardImport(1),
        ),
        // 12
        rule(ClassDecl, vec![N(ClassHeader), N(ClassBody)], Empty),
        // 13: firing on the header keeps enter/exit properly nested
        rule(
            ClassHeader,
            vec![N(Mods), T(K::ClassKw), T(K::Ident)],
            DeclareClass(2),
        ),
        // 14-15
        rule(Mods, vec![], Empty),
        rule(Mods, vec![N(Mods), N(Modifier)], Empty),
        // 16-21
        rule(Modifier, vec![T(K::PublicKw)], Empty),
        rule(Modifier, vec![T(K::ProtectedKw)], Empty),
        rule(Modifier, vec![T(K::PrivateKw)], Empty),
        rule(Modifier, vec![T(K::StaticKw)], Empty),
        rule(Modifier, vec![T(K::FinalKw)], Empty),
        rule(Modifier, vec![T(K::AbstractKw)], Empty),
        // 22
        rule(
            ClassBody,
            vec![T(K::LBrace), N(Members), T(K::RBrace)],
            CloseClass,
        ),
        // 23-24
        rule(Members, vec![], Empty),
        rule(Members, vec![N(Members), N(Member)], Empty),
        // 25-28
        rule(Member, vec![N(ClassDecl)], Empty),
        rule(Member, vec![N(Field)], Empty),
        rule(Member, vec![T(K::Semicolon)], Empty),
        rule(Member, vec![T(K::Error)], Empty),
        // 29
        rule(
            Field,
            vec![N(Mods), N(Name), T(K::Ident), T(K::Semicolon)],
            RecordTypeName(1),
        ),
        // 30-31
        rule(Name, vec![T(K::Ident)], Forward(0)),
        rule(
            Name,
            vec![N(Name), T(K::Dot), T(K::Ident)],
            JoinName { left: 0, right: 2 },
        ),
    ];

    Grammar { productions }
}
