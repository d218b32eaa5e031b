//! FIRST and FOLLOW sets.
//!
//! Both are computed to a fixed point over the augmented grammar and are
//! immutable afterwards. Sets only grow while they are being computed.

use crate::grammar::{Grammar, Symbol};
use std::collections::{BTreeMap, BTreeSet};

/// A set of terminals, possibly with `Epsilon` or `EndMarker`.
pub type SymbolSet = BTreeSet<Symbol>;

/// FIRST set of every nonterminal: the terminals (and possibly `Epsilon`)
/// that can begin a string derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FirstSets {
    sets: BTreeMap<String, SymbolSet>,
}

impl FirstSets {
    /// Computes FIRST for every nonterminal of `grammar`.
    ///
    /// # Parameters
    /// - `grammar`: The augmented grammar, possibly left-recursive.
    ///
    /// # Returns
    /// FIRST sets for the augmented start and every declared nonterminal,
    /// at their fixed point: one more [`FirstSets::step`] changes nothing.
    pub fn compute(grammar: &Grammar) -> Self {
        let mut first = FirstSets {
            sets: grammar
                .all_nonterminals()
                .map(|nt| (nt.to_owned(), SymbolSet::new()))
                .collect(),
        };
        let mut passes = 1;
        while first.step(grammar) {
            passes += 1;
        }
        log::debug!("FIRST sets converged after {} passes", passes);
        first
    }

    /// Runs one derivation pass and merges its results. Returns whether
    /// any set grew.
    ///
    /// A pass derives FIRST of each nonterminal recursively, scanning each
    /// right-hand side past all of its nullable leading symbols. A
    /// nonterminal that is re-entered while still in progress (left
    /// recursion, direct or indirect) contributes what the previous pass
    /// knew about it instead of recursing again. Repeating passes until
    /// nothing grows makes the result exact.
    ///
    /// # Parameters
    /// - `grammar`: The grammar these sets were computed for.
    ///
    /// # Returns
    /// `true` if any set gained a symbol, `false` at the fixed point.
    pub fn step(&mut self, grammar: &Grammar) -> bool {
        let mut pass = FirstPass {
            grammar,
            known: &self.sets,
            done: BTreeMap::new(),
            active: BTreeSet::new(),
        };
        for nt in grammar.all_nonterminals() {
            pass.nonterminal(nt);
        }
        let derived = pass.done;

        let mut changed = false;
        for (nt, set) in derived {
            let entry = self.sets.entry(nt).or_default();
            for sym in set {
                changed |= entry.insert(sym);
            }
        }
        changed
    }

    /// FIRST of a single symbol. Terminals, `Epsilon` and `EndMarker` are
    /// their own FIRST set.
    pub fn of_symbol(&self, sym: &Symbol) -> SymbolSet {
        match sym {
            Symbol::Nonterminal(nt) => self.sets.get(nt).cloned().unwrap_or_default(),
            other => SymbolSet::from([other.clone()]),
        }
    }

    /// FIRST of a symbol string. Contains `Epsilon` iff every symbol is
    /// nullable, including when `symbols` is empty.
    pub fn of_sequence(&self, symbols: &[Symbol]) -> SymbolSet {
        let mut out = SymbolSet::new();
        for sym in symbols {
            let first = self.of_symbol(sym);
            let nullable = first.contains(&Symbol::Epsilon);
            out.extend(first.into_iter().filter(|s| *s != Symbol::Epsilon));
            if !nullable {
                return out;
            }
        }
        out.insert(Symbol::Epsilon);
        out
    }

    pub fn get(&self, nt: &str) -> Option<&SymbolSet> {
        self.sets.get(nt)
    }

    pub fn is_nullable(&self, nt: &str) -> bool {
        self.sets
            .get(nt)
            .is_some_and(|s| s.contains(&Symbol::Epsilon))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolSet)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }
}

struct FirstPass<'g> {
    grammar: &'g Grammar,
    known: &'g BTreeMap<String, SymbolSet>,
    done: BTreeMap<String, SymbolSet>,
    active: BTreeSet<String>,
}

impl<'g> FirstPass<'g> {
    fn nonterminal(&mut self, nt: &str) -> SymbolSet {
        if let Some(set) = self.done.get(nt) {
            return set.clone();
        }
        if self.active.contains(nt) {
            return self.known.get(nt).cloned().unwrap_or_default();
        }

        self.active.insert(nt.to_owned());
        let grammar = self.grammar;
        let mut set = SymbolSet::new();
        for (_, prod) in grammar.productions_of(nt) {
            set.extend(self.sequence(&prod.rhs));
        }
        self.active.remove(nt);

        self.done.insert(nt.to_owned(), set.clone());
        set
    }

    fn sequence(&mut self, symbols: &[Symbol]) -> SymbolSet {
        let mut out = SymbolSet::new();
        for sym in symbols {
            let first = match sym {
                Symbol::Nonterminal(nt) => self.nonterminal(nt),
                other => SymbolSet::from([other.clone()]),
            };
            let nullable = first.contains(&Symbol::Epsilon);
            out.extend(first.into_iter().filter(|s| *s != Symbol::Epsilon));
            if !nullable {
                return out;
            }
        }
        out.insert(Symbol::Epsilon);
        out
    }
}

/// FOLLOW set of every nonterminal: the terminals (and possibly
/// `EndMarker`) that can immediately follow it in a sentential form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FollowSets {
    sets: BTreeMap<String, SymbolSet>,
}

impl FollowSets {
    /// Computes FOLLOW for every nonterminal of `grammar`.
    ///
    /// The start symbol (and the augmented start) begin with `{$}`; full
    /// passes over all productions then run until none changes a set.
    ///
    /// # Parameters
    /// - `grammar`: The augmented grammar.
    /// - `first`: FIRST sets of the same grammar, already at their fixed
    ///   point.
    ///
    /// # Returns
    /// FOLLOW sets for every nonterminal. None contains `ε`.
    pub fn compute(grammar: &Grammar, first: &FirstSets) -> Self {
        let mut follow = FollowSets {
            sets: grammar
                .all_nonterminals()
                .map(|nt| (nt.to_owned(), SymbolSet::new()))
                .collect(),
        };
        for nt in [grammar.augmented_start(), grammar.start()] {
            follow
                .sets
                .entry(nt.to_owned())
                .or_default()
                .insert(Symbol::EndMarker);
        }
        let mut passes = 1;
        while follow.step(grammar, first) {
            passes += 1;
        }
        log::debug!("FOLLOW sets converged after {} passes", passes);
        follow
    }

    /// Runs one pass over every production `A → X1 … Xk`. Returns whether
    /// any set grew.
    ///
    /// For each nonterminal `Xi`, adds FIRST(Xi+1 … Xk) minus `ε` to
    /// FOLLOW(Xi), and adds FOLLOW(A) when that suffix is nullable or empty.
    ///
    /// # Returns
    /// `true` if any set gained a symbol, `false` at the fixed point.
    pub fn step(&mut self, grammar: &Grammar, first: &FirstSets) -> bool {
        let mut changed = false;
        for prod in grammar.productions() {
            for (i, sym) in prod.rhs.iter().enumerate() {
                let Symbol::Nonterminal(b) = sym else {
                    continue;
                };
                let rest = first.of_sequence(&prod.rhs[i + 1..]);
                let mut add: SymbolSet = rest
                    .iter()
                    .filter(|s| **s != Symbol::Epsilon)
                    .cloned()
                    .collect();
                if rest.contains(&Symbol::Epsilon) {
                    if let Some(lhs) = self.sets.get(&prod.lhs) {
                        add.extend(lhs.iter().cloned());
                    }
                }
                let entry = self.sets.entry(b.clone()).or_default();
                for s in add {
                    changed |= entry.insert(s);
                }
            }
        }
        changed
    }

    pub fn get(&self, nt: &str) -> Option<&SymbolSet> {
        self.sets.get(nt)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolSet)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }
}
