//! LR(0) items and the canonical collection of item sets.
//!
//! Each item set becomes one automaton state; the transitions computed
//! alongside the collection become the shift and goto entries.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::parser::grammar::{Grammar, Sym};

/// An LR(0) item: a production with a dot position in its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Item {
    pub rule: usize,
    pub dot: usize,
}

impl Item {
    pub(crate) fn start(rule: usize) -> Self {
        Self { rule, dot: 0 }
    }

    pub(crate) fn advance(self) -> Self {
        Self {
            rule: self.rule,
            dot: self.dot + 1,
        }
    }

    /// The symbol after the dot, or `None` for a completed item.
    pub(crate) fn next_sym(self, grammar: &Grammar) -> Option<Sym> {
        grammar.production(self.rule).rhs.get(self.dot).copied()
    }
}

/// An item set; the ordered representation doubles as the state's
/// identity when deduplicating the collection.
pub(crate) type ItemSet = BTreeSet<Item>;

/// The canonical collection plus the transition function over it.
pub(crate) struct Collection {
    pub states: Vec<ItemSet>,
    pub transitions: FxHashMap<(usize, Sym), usize>,
}

/// CLOSURE(items): saturate with the start items of every nonterminal
/// that appears immediately after a dot.
pub(crate) fn closure(grammar: &Grammar, items: &ItemSet) -> ItemSet {
    let mut closure = items.clone();
    let mut work: Vec<Item> = closure.iter().copied().collect();

    while let Some(item) = work.pop() {
        let Some(Sym::N(nt)) = item.next_sym(grammar) else {
            continue;
        };
        for rule in grammar.rules_for(nt) {
            let new = Item::start(rule);
            if closure.insert(new) {
                work.push(new);
            }
        }
    }
    closure
}

/// GOTO(items, sym): advance every item whose dot precedes `sym`,
/// then close.
pub(crate) fn goto_set(grammar: &Grammar, items: &ItemSet, sym: Sym) -> ItemSet {
    let kernel: ItemSet = items
        .iter()
        .filter(|i| i.next_sym(grammar) == Some(sym))
        .map(|i| i.advance())
        .collect();
    if kernel.is_empty() {
        kernel
    } else {
        closure(grammar, &kernel)
    }
}

/// Build the canonical collection from CLOSURE({Start → ·S}).
pub(crate) fn canonical_collection(grammar: &Grammar) -> Collection {
    let start = closure(grammar, &ItemSet::from([Item::start(0)]));

    let mut states: Vec<ItemSet> = vec![start.clone()];
    let mut seen: FxHashMap<ItemSet, usize> = FxHashMap::default();
    seen.insert(start, 0);

    let mut transitions: FxHashMap<(usize, Sym), usize> = FxHashMap::default();
    let mut next = 0;

    while next < states.len() {
        let state = states[next].clone();
        let mut outgoing: BTreeSet<Sym> = BTreeSet::new();
        for item in &state {
            if let Some(sym) = item.next_sym(grammar) {
                outgoing.insert(sym);
            }
        }
        for sym in outgoing {
            let target = goto_set(grammar, &state, sym);
            let index = match seen.get(&target) {
                Some(i) => *i,
                None => {
                    states.push(target.clone());
                    seen.insert(target, states.len() - 1);
                    states.len() - 1
                }
            };
            transitions.insert((next, sym), index);
        }
        next += 1;
    }

    Collection {
        states,
        transitions,
    }
}
