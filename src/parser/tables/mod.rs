//! SLR(1) parse-table construction.
//!
//! The tables are synthesized once from the grammar at first use and
//! shared behind a `Lazy` static. Construction reports conflicts as
//! errors rather than resolving them silently, so a grammar change that
//! breaks determinism fails loudly.

mod firstfollow;
mod items;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::parser::actions::RuleAction;
use crate::parser::grammar::{Grammar, NONTERMINAL_COUNT, NonTerminal, Sym, java_grammar};
use crate::parser::token_kind::{TERMINAL_COUNT, TERMINALS, TokenKind};
use firstfollow::FirstFollow;
use items::{Collection, canonical_collection};

/// One cell of the action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(u32),
    Reduce(u32),
    Accept,
    Error,
}

/// Construction failure: the grammar is not SLR(1)-deterministic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("shift/reduce conflict in state {state} on {terminal:?} (rule {rule})")]
    ShiftReduce {
        state: usize,
        terminal: TokenKind,
        rule: usize,
    },
    #[error("reduce/reduce conflict in state {state} on {terminal:?} (rules {first} and {second})")]
    ReduceReduce {
        state: usize,
        terminal: TokenKind,
        first: usize,
        second: usize,
    },
}

/// Dense action and goto tables plus per-rule metadata for reduction.
pub struct ParseTables {
    n_states: usize,
    /// `n_states * TERMINAL_COUNT`, row-major by state.
    actions: Vec<Action>,
    /// `n_states * NONTERMINAL_COUNT`, `u32::MAX` where undefined.
    gotos: Vec<u32>,
    rule_len: Vec<usize>,
    rule_lhs: Vec<NonTerminal>,
    rule_action: Vec<RuleAction>,
    /// Per-state default reduction: the rule to reduce by when the
    /// action row has no entry for the lookahead. Present exactly for
    /// states whose sole completed item is a non-start production, so
    /// reductions that are already inevitable fire before the
    /// lookahead is judged.
    defaults: Vec<Option<u32>>,
}

const NO_GOTO: u32 = u32::MAX;

impl ParseTables {
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn n_rules(&self) -> usize {
        self.rule_len.len()
    }

    /// The action for `state` on lookahead `terminal`, or `None` if
    /// `state` is out of bounds.
    pub fn action(&self, state: u32, terminal: TokenKind) -> Option<Action> {
        self.actions
            .get(state as usize * TERMINAL_COUNT + terminal.terminal_index())
            .copied()
    }

    /// The successor state after reducing to `lhs` with `state` on top.
    pub fn goto(&self, state: u32, lhs: NonTerminal) -> Option<u32> {
        let cell = *self
            .gotos
            .get(state as usize * NONTERMINAL_COUNT + lhs.index())?;
        (cell != NO_GOTO).then_some(cell)
    }

    pub fn rule_len(&self, rule: u32) -> Option<usize> {
        self.rule_len.get(rule as usize).copied()
    }

    pub fn rule_lhs(&self, rule: u32) -> Option<NonTerminal> {
        self.rule_lhs.get(rule as usize).copied()
    }

    pub fn rule_action(&self, rule: u32) -> Option<RuleAction> {
        self.rule_action.get(rule as usize).copied()
    }

    /// The state's default reduction, if it has one. Consulted when
    /// the action row says `Error`, before recovery is entered.
    pub fn default_reduce(&self, state: u32) -> Option<u32> {
        self.defaults.get(state as usize).copied().flatten()
    }

    /// Terminals with a non-`Error` entry in `state`'s row, in column
    /// order. Drives the expected-token list in diagnostics.
    pub fn expected_in(&self, state: u32) -> impl Iterator<Item = TokenKind> + '_ {
        let base = state as usize * TERMINAL_COUNT;
        TERMINALS.iter().copied().filter(move |t| {
            matches!(
                self.actions.get(base + t.terminal_index()),
                Some(Action::Shift(_) | Action::Reduce(_) | Action::Accept)
            )
        })
    }
}

/// Build SLR(1) tables for `grammar`, rejecting any conflict.
pub fn build_tables(grammar: &Grammar) -> Result<ParseTables, TableError> {
    let Collection {
        states,
        transitions,
    } = canonical_collection(grammar);
    let ff = FirstFollow::compute(grammar);

    let n_states = states.len();
    let mut actions = vec![Action::Error; n_states * TERMINAL_COUNT];
    let mut gotos = vec![NO_GOTO; n_states * NONTERMINAL_COUNT];

    for ((state, sym), target) in &transitions {
        match sym {
            Sym::T(t) => {
                let cell = &mut actions[state * TERMINAL_COUNT + t.terminal_index()];
                // A shift never collides with another shift here: the
                // transition map has one target per (state, symbol).
                if let Action::Reduce(rule) = *cell {
                    return Err(TableError::ShiftReduce {
                        state: *state,
                        terminal: *t,
                        rule: rule as usize,
                    });
                }
                *cell = Action::Shift(*target as u32);
            }
            Sym::N(nt) => {
                gotos[state * NONTERMINAL_COUNT + nt.index()] = *target as u32;
            }
        }
    }

    for (state, set) in states.iter().enumerate() {
        for item in set {
            if item.next_sym(grammar).is_some() {
                continue;
            }
            if item.rule == 0 {
                actions[state * TERMINAL_COUNT + TokenKind::Eof.terminal_index()] =
                    Action::Accept;
                continue;
            }
            let lhs = grammar.production(item.rule).lhs;
            for t in ff.follow(lhs) {
                let cell = &mut actions[state * TERMINAL_COUNT + t.terminal_index()];
                match *cell {
                    Action::Error => *cell = Action::Reduce(item.rule as u32),
                    Action::Reduce(other) if other as usize == item.rule => {}
                    Action::Reduce(other) => {
                        return Err(TableError::ReduceReduce {
                            state,
                            terminal: t,
                            first: other as usize,
                            second: item.rule,
                        });
                    }
                    Action::Shift(_) => {
                        return Err(TableError::ShiftReduce {
                            state,
                            terminal: t,
                            rule: item.rule,
                        });
                    }
                    Action::Accept => {
                        return Err(TableError::ReduceReduce {
                            state,
                            terminal: t,
                            first: 0,
                            second: item.rule,
                        });
                    }
                }
            }
        }
    }

    let defaults = states
        .iter()
        .map(|set| {
            let mut completed = set
                .iter()
                .filter(|i| i.rule != 0 && i.next_sym(grammar).is_none());
            match (completed.next(), completed.next()) {
                (Some(item), None) => Some(item.rule as u32),
                _ => None,
            }
        })
        .collect();

    let rule_len = grammar
        .productions
        .iter()
        .map(|p| p.rhs.len())
        .collect();
    let rule_lhs = grammar.productions.iter().map(|p| p.lhs).collect();
    let rule_action = grammar.productions.iter().map(|p| p.action).collect();

    Ok(ParseTables {
        n_states,
        actions,
        gotos,
        rule_len,
        rule_lhs,
        rule_action,
        defaults,
    })
}

static JAVA_TABLES: Lazy<ParseTables> = Lazy::new(|| {
    build_tables(&java_grammar()).expect("java dependency grammar is SLR-deterministic")
});

/// Shared tables for the Java dependency grammar.
pub fn java_tables() -> &'static ParseTables {
    &JAVA_TABLES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_grammar_has_no_conflicts() {
        let tables = build_tables(&java_grammar());
        assert!(tables.is_ok());
    }

    #[test]
    fn test_start_state_reduces_empty_decls() {
        let t = java_tables();
        // State 0 sees 'package' through FIRST(Decls Decl), which first
        // requires the empty Decls reduction.
        assert!(matches!(
            t.action(0, TokenKind::PackageKw),
            Some(Action::Reduce(2))
        ));
        assert!(matches!(
            t.action(0, TokenKind::Eof),
            Some(Action::Reduce(2))
        ));
    }

    #[test]
    fn test_out_of_bounds_state_yields_none() {
        let t = java_tables();
        assert_eq!(t.action(u32::MAX, TokenKind::Eof), None);
        assert_eq!(t.goto(u32::MAX, NonTerminal::Decls), None);
        assert_eq!(t.rule_len(u32::MAX), None);
        assert_eq!(t.default_reduce(u32::MAX), None);
    }

    #[test]
    fn test_default_reductions_mark_single_completion_states() {
        let g = java_grammar();
        let c = items::canonical_collection(&g);
        let t = java_tables();
        // State 0's only completed item is the empty declaration list.
        assert_eq!(t.default_reduce(0), Some(2));
        // The top-level state completes both the compilation unit and
        // an empty modifier list, so it cannot commit to either.
        let decls_state = c.transitions[&(0, Sym::N(NonTerminal::Decls))] as u32;
        assert_eq!(t.default_reduce(decls_state), None);
        // A closing brace completes exactly the class body.
        for (state, set) in c.states.iter().enumerate() {
            let body_done = set
                .iter()
                .any(|i| i.rule == 22 && g.production(22).rhs.len() == i.dot);
            if body_done {
                assert_eq!(t.default_reduce(state as u32), Some(22));
            }
        }
    }

    #[test]
    fn test_rule_metadata_matches_grammar() {
        let g = java_grammar();
        let t = java_tables();
        assert_eq!(t.n_rules(), g.productions.len());
        for (i, p) in g.productions.iter().enumerate() {
            assert_eq!(t.rule_len(i as u32), Some(p.rhs.len()));
            assert_eq!(t.rule_lhs(i as u32), Some(p.lhs));
        }
    }

    #[test]
    fn test_expected_list_in_decls_state_is_bounded() {
        let g = java_grammar();
        let c = items::canonical_collection(&g);
        let decls_state = c.transitions[&(0, Sym::N(NonTerminal::Decls))] as u32;
        let expected: Vec<_> = java_tables().expected_in(decls_state).collect();
        assert!(expected.contains(&TokenKind::ClassKw));
        assert!(expected.contains(&TokenKind::Eof));
        assert!(!expected.is_empty());
    }
}
