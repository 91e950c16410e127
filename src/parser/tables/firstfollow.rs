//! Nullable, FIRST, and FOLLOW sets for table synthesis.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::parser::grammar::{Grammar, NonTerminal, Sym};
use crate::parser::token_kind::TokenKind;

/// The computed sets, fixed-pointed over the grammar.
pub(crate) struct FirstFollow {
    nullable: FxHashSet<NonTerminal>,
    first: FxHashMap<NonTerminal, FxHashSet<TokenKind>>,
    follow: FxHashMap<NonTerminal, FxHashSet<TokenKind>>,
}

impl FirstFollow {
    pub(crate) fn compute(grammar: &Grammar) -> Self {
        let nullable = compute_nullable(grammar);
        let first = compute_first(grammar, &nullable);
        let follow = compute_follow(grammar, &nullable, &first);
        Self {
            nullable,
            first,
            follow,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_nullable(&self, nt: NonTerminal) -> bool {
        self.nullable.contains(&nt)
    }

    pub(crate) fn follow(&self, nt: NonTerminal) -> impl Iterator<Item = TokenKind> + '_ {
        self.follow.get(&nt).into_iter().flatten().copied()
    }

    #[cfg(test)]
    pub(crate) fn first(&self, nt: NonTerminal) -> FxHashSet<TokenKind> {
        self.first.get(&nt).cloned().unwrap_or_default()
    }

    /// FIRST of a symbol sequence, plus whether the whole sequence can
    /// derive ε.
    fn first_of_seq(&self, syms: &[Sym]) -> (FxHashSet<TokenKind>, bool) {
        let mut out = FxHashSet::default();
        for sym in syms {
            match sym {
                Sym::T(t) => {
                    out.insert(*t);
                    return (out, false);
                }
                Sym::N(nt) => {
                    if let Some(set) = self.first.get(nt) {
                        out.extend(set.iter().copied());
                    }
                    if !self.nullable.contains(nt) {
                        return (out, false);
                    }
                }
            }
        }
        (out, true)
    }
}

fn compute_nullable(grammar: &Grammar) -> FxHashSet<NonTerminal> {
    let mut nullable = FxHashSet::default();
    loop {
        let before = nullable.len();
        for p in &grammar.productions {
            let all = p.rhs.iter().all(|s| match s {
                Sym::T(_) => false,
                Sym::N(nt) => nullable.contains(nt),
            });
            if all {
                nullable.insert(p.lhs);
            }
        }
        if nullable.len() == before {
            break;
        }
    }
    nullable
}

fn compute_first(
    grammar: &Grammar,
    nullable: &FxHashSet<NonTerminal>,
) -> FxHashMap<NonTerminal, FxHashSet<TokenKind>> {
    let mut first: FxHashMap<NonTerminal, FxHashSet<TokenKind>> = FxHashMap::default();
    loop {
        let mut changed = false;
        for p in &grammar.productions {
            let mut additions: Vec<TokenKind> = Vec::new();
            for sym in &p.rhs {
                match sym {
                    Sym::T(t) => {
                        additions.push(*t);
                        break;
                    }
                    Sym::N(nt) => {
                        if let Some(set) = first.get(nt) {
                            additions.extend(set.iter().copied());
                        }
                        if !nullable.contains(nt) {
                            break;
                        }
                    }
                }
            }
            let set = first.entry(p.lhs).or_default();
            for t in additions {
                changed |= set.insert(t);
            }
        }
        if !changed {
            break;
        }
    }
    first
}

fn compute_follow(
    grammar: &Grammar,
    nullable: &FxHashSet<NonTerminal>,
    first: &FxHashMap<NonTerminal, FxHashSet<TokenKind>>,
) -> FxHashMap<NonTerminal, FxHashSet<TokenKind>> {
    let ff = FirstFollow {
        nullable: nullable.clone(),
        first: first.clone(),
        follow: FxHashMap::default(),
    };

    let mut follow: FxHashMap<NonTerminal, FxHashSet<TokenKind>> = FxHashMap::default();
    // End-of-input follows the augmented start symbol.
    follow
        .entry(grammar.production(0).lhs)
        .or_default()
        .insert(TokenKind::Eof);

    loop {
        let mut changed = false;
        for p in &grammar.productions {
            for (i, sym) in p.rhs.iter().enumerate() {
                let Sym::N(nt) = sym else { continue };
                let (rest_first, rest_nullable) = ff.first_of_seq(&p.rhs[i + 1..]);
                let mut additions: Vec<TokenKind> = rest_first.into_iter().collect();
                if rest_nullable {
                    if let Some(lhs_follow) = follow.get(&p.lhs) {
                        additions.extend(lhs_follow.iter().copied());
                    }
                }
                let set = follow.entry(*nt).or_default();
                for t in additions {
                    changed |= set.insert(t);
                }
            }
        }
        if !changed {
            break;
        }
    }
    follow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::grammar::java_grammar;
    use NonTerminal::*;

    fn sets() -> FirstFollow {
        FirstFollow::compute(&java_grammar())
    }

    #[test]
    fn test_nullable() {
        let ff = sets();
        for nt in [Decls, Mods, Members] {
            assert!(ff.is_nullable(nt), "{nt:?} should be nullable");
        }
        for nt in [Decl, Name, ClassBody] {
            assert!(!ff.is_nullable(nt), "{nt:?} should not be nullable");
        }
    }

    #[test]
    fn test_first_of_name_is_ident() {
        let ff = sets();
        let first = ff.first(Name);
        assert_eq!(first.len(), 1);
        assert!(first.contains(&TokenKind::Ident));
    }

    #[test]
    fn test_follow_of_name() {
        let ff = sets();
        let follow: FxHashSet<_> = ff.follow(Name).collect();
        // package/import terminator, dotted continuation, field name
        assert!(follow.contains(&TokenKind::Semicolon));
        assert!(follow.contains(&TokenKind::Dot));
        assert!(follow.contains(&TokenKind::Ident));
        assert!(!follow.contains(&TokenKind::Eof));
    }

    #[test]
    fn test_follow_of_mods_excludes_statement_boundaries() {
        let ff = sets();
        let follow: FxHashSet<_> = ff.follow(Mods).collect();
        assert!(follow.contains(&TokenKind::ClassKw));
        assert!(follow.contains(&TokenKind::Ident));
        assert!(follow.contains(&TokenKind::PublicKw));
        // keeps ε-reduction of Mods out of the shift set for ';' / error
        assert!(!follow.contains(&TokenKind::Semicolon));
        assert!(!follow.contains(&TokenKind::Error));
    }

    #[test]
    fn test_follow_of_start_is_eof() {
        let ff = sets();
        let follow: FxHashSet<_> = ff.follow(Start).collect();
        assert_eq!(follow.len(), 1);
        assert!(follow.contains(&TokenKind::Eof));
    }
}
