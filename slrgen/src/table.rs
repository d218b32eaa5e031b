//! SLR(1) ACTION/GOTO table construction.
//!
//! The table combines the LR(0) automaton with FOLLOW sets. Every candidate
//! action is collected first; only when all states and items have been
//! visited is the table checked for conflicts and returned, so a partially
//! filled table is never observable.

use crate::error::GrammarError;
use crate::grammar::{Grammar, Symbol};
use crate::lr0::Automaton;
use crate::sets::{FirstSets, FollowSets};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A parser action for a `(state, lookahead)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    /// Push the given state.
    Shift(usize),
    /// Reduce by the production with the given index.
    Reduce(usize),
    /// Input accepted.
    Accept,
}

/// Renders as a table cell: `s<state>`, `r<production>` or `acc`.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Reduce(prod) => write!(f, "r{}", prod),
            Action::Accept => f.write_str("acc"),
        }
    }
}

/// An SLR(1) parse table.
///
/// ACTION maps `(state, terminal or EndMarker)` to exactly one [`Action`];
/// GOTO maps `(state, nonterminal)` to a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    n_states: usize,
    action: BTreeMap<(usize, Symbol), Action>,
    goto: BTreeMap<(usize, String), usize>,
}

impl ParseTable {
    /// Runs the whole pipeline: automaton, FIRST, FOLLOW and table.
    pub fn from_grammar(grammar: &Grammar) -> Result<Self, GrammarError> {
        let automaton = Automaton::build(grammar);
        let first = FirstSets::compute(grammar);
        let follow = FollowSets::compute(grammar, &first);
        Self::build(grammar, &automaton, &follow)
    }

    /// Constructs the table from a finished automaton and FOLLOW sets.
    ///
    /// For each item of each state:
    /// - `A → α • a β` with terminal `a` gives `Shift(δ(state, a))` on `a`;
    /// - the complete augmented item gives `Accept` on `$`;
    /// - any other complete `A → β •` gives `Reduce` on each symbol of
    ///   FOLLOW(A).
    ///
    /// GOTO holds every nonterminal transition. If a key receives two
    /// different actions the grammar is not SLR(1); the first such key in
    /// `(state, symbol)` order is reported with all of its actions.
    pub fn build(
        grammar: &Grammar,
        automaton: &Automaton,
        follow: &FollowSets,
    ) -> Result<Self, GrammarError> {
        let mut candidates: BTreeMap<(usize, Symbol), BTreeSet<Action>> = BTreeMap::new();
        let mut goto = BTreeMap::new();

        for (state, items) in automaton.states().iter().enumerate() {
            for item in items {
                match item.next_symbol(grammar) {
                    Some(sym) if sym.is_terminal() => {
                        if let Some(to) = automaton.goto(state, sym) {
                            candidates
                                .entry((state, sym.clone()))
                                .or_default()
                                .insert(Action::Shift(to));
                        }
                    }
                    Some(_) => {}
                    None if item.prod == 0 => {
                        candidates
                            .entry((state, Symbol::EndMarker))
                            .or_default()
                            .insert(Action::Accept);
                    }
                    None => {
                        let Some(prod) = grammar.production(item.prod) else {
                            continue;
                        };
                        for la in follow.get(&prod.lhs).into_iter().flatten() {
                            candidates
                                .entry((state, la.clone()))
                                .or_default()
                                .insert(Action::Reduce(item.prod));
                        }
                    }
                }
            }

            for nt in grammar.nonterminals() {
                if let Some(to) = automaton.goto(state, &Symbol::Nonterminal(nt.clone())) {
                    goto.insert((state, nt.clone()), to);
                }
            }
        }

        let mut action = BTreeMap::new();
        let mut conflict = None;
        for ((state, symbol), actions) in candidates {
            if actions.len() > 1 {
                log::debug!(
                    "conflict in state {} on {}: {:?}",
                    state,
                    symbol,
                    actions
                );
                if conflict.is_none() {
                    conflict = Some(GrammarError::NotSLR1 {
                        state,
                        symbol,
                        actions: actions.into_iter().collect(),
                    });
                }
                continue;
            }
            if let Some(act) = actions.into_iter().next() {
                action.insert((state, symbol), act);
            }
        }
        if let Some(err) = conflict {
            return Err(err);
        }

        log::debug!(
            "SLR(1) table: {} states, {} actions, {} gotos",
            automaton.len(),
            action.len(),
            goto.len()
        );

        Ok(ParseTable {
            n_states: automaton.len(),
            action,
            goto,
        })
    }

    pub(crate) fn from_parts(
        n_states: usize,
        action: BTreeMap<(usize, Symbol), Action>,
        goto: BTreeMap<(usize, String), usize>,
    ) -> Self {
        ParseTable {
            n_states,
            action,
            goto,
        }
    }

    /// Number of states (rows).
    pub fn len(&self) -> usize {
        self.n_states
    }

    pub fn is_empty(&self) -> bool {
        self.n_states == 0
    }

    /// ACTION[state, lookahead], where `lookahead` is a terminal or
    /// `EndMarker`.
    pub fn action(&self, state: usize, lookahead: &Symbol) -> Option<Action> {
        self.action.get(&(state, lookahead.clone())).copied()
    }

    /// GOTO[state, nonterminal].
    pub fn goto(&self, state: usize, nonterminal: &str) -> Option<usize> {
        self.goto.get(&(state, nonterminal.to_owned())).copied()
    }

    pub fn actions(&self) -> impl Iterator<Item = (usize, &Symbol, Action)> {
        self.action.iter().map(|((s, sym), a)| (*s, sym, *a))
    }

    pub fn gotos(&self) -> impl Iterator<Item = (usize, &str, usize)> {
        self.goto.iter().map(|((s, nt), to)| (*s, nt.as_str(), *to))
    }
}
