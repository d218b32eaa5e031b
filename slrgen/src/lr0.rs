// LR(0) item machinery: closure, goto and the canonical collection.

use crate::grammar::{Grammar, Symbol};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// An LR(0) item: a production index and a dot position.
///
/// For `E → E + T` with the dot after the first symbol (`E → E • + T`),
/// `prod` is the index of `E → E + T` and `dot` is 1. The item is complete
/// when `dot` equals the length of the right-hand side.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Item {
    /// The index of the production in the grammar.
    pub prod: usize,

    /// The number of right-hand-side symbols before the dot.
    pub dot: usize,
}

impl Item {
    pub fn new(prod: usize, dot: usize) -> Self {
        Item { prod, dot }
    }

    /// The symbol immediately after the dot, if any.
    pub fn next_symbol<'g>(&self, grammar: &'g Grammar) -> Option<&'g Symbol> {
        grammar
            .production(self.prod)
            .and_then(|p| p.rhs.get(self.dot))
    }

    pub fn is_complete(&self, grammar: &Grammar) -> bool {
        grammar
            .production(self.prod)
            .is_some_and(|p| self.dot == p.len())
    }

    fn advance(&self) -> Item {
        Item {
            prod: self.prod,
            dot: self.dot + 1,
        }
    }
}

/// A set of LR(0) items. Equality is set equality.
pub type ItemSet = BTreeSet<Item>;

/// Computes the LR(0) closure of `items`.
///
/// For every item whose dot precedes a nonterminal `N`, adds `N → • β` for
/// each production of `N`, repeating passes until one adds nothing. The
/// item space is finite, so this terminates.
///
/// # Parameters
/// - `items`: The kernel items to close over.
/// - `grammar`: The augmented grammar the item indices refer to.
///
/// # Returns
/// The smallest item set containing `items` that is closed under
/// nonterminal expansion. Closing an already closed set returns it
/// unchanged.
///
/// # Example
/// ```text
/// closure({ S' → • S }) with S → a gives { S' → • S, S → • a }
/// ```
pub fn closure(items: &ItemSet, grammar: &Grammar) -> ItemSet {
    let mut c = items.clone();
    let mut inserted = true;
    while inserted {
        inserted = false;
        // Iterate over a snapshot to avoid borrowing issues
        for item in c.clone() {
            if let Some(Symbol::Nonterminal(nt)) = item.next_symbol(grammar) {
                for (prod, _) in grammar.productions_of(nt) {
                    if c.insert(Item::new(prod, 0)) {
                        inserted = true;
                    }
                }
            }
        }
    }
    c
}

/// Computes the LR(0) goto of `items` on `sym`.
///
/// Advances the dot over `sym` in every item that has `sym` after its dot
/// and returns the closure of the result.
///
/// # Parameters
/// - `items`: The source item set, normally an automaton state.
/// - `sym`: The terminal or nonterminal to move over.
/// - `grammar`: The augmented grammar the item indices refer to.
///
/// # Returns
/// The closed successor item set, or an empty set when no item of `items`
/// has `sym` after its dot (no transition).
pub fn goto(items: &ItemSet, sym: &Symbol, grammar: &Grammar) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| item.next_symbol(grammar) == Some(sym))
        .map(Item::advance)
        .collect();
    if moved.is_empty() {
        return moved;
    }
    closure(&moved, grammar)
}

/// The canonical collection of LR(0) item sets and its transition function.
///
/// States are numbered in discovery order and never change once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<ItemSet>,
    transitions: BTreeMap<(usize, Symbol), usize>,
}

impl Automaton {
    /// Builds the canonical collection for `grammar`.
    ///
    /// State 0 is `closure({Start' → • Start})`. Every state is expanded on
    /// every grammar symbol, terminals first and then nonterminals, each in
    /// declaration order; each non-empty goto set that is not already a
    /// state is appended. States are expanded in index order, so a state
    /// appended during a pass is expanded later in the same pass, and the
    /// loop ends after a full pass that appends nothing.
    ///
    /// # Parameters
    /// - `grammar`: The augmented grammar; production 0 must be
    ///   `Start' → Start`, which [`Grammar::load`] guarantees.
    ///
    /// # Returns
    /// The automaton with every reachable state and every transition,
    /// identical on every run for the same grammar.
    ///
    /// # Example
    /// For `S → a` the states are `{S' → • S, S → • a}`, `{S → a •}` and
    /// `{S' → S •}`, reached from state 0 on `a` and `S` respectively.
    pub fn build(grammar: &Grammar) -> Self {
        let symbols = grammar.symbols();
        let start = closure(&ItemSet::from([Item::new(0, 0)]), grammar);

        let mut index: HashMap<ItemSet, usize> = HashMap::new();
        index.insert(start.clone(), 0);
        let mut states = vec![start];
        let mut transitions = BTreeMap::new();

        let mut from = 0;
        while from < states.len() {
            for sym in &symbols {
                let nxt = goto(&states[from], sym, grammar);
                if nxt.is_empty() {
                    continue;
                }
                let to = match index.get(&nxt) {
                    Some(&to) => to,
                    None => {
                        let to = states.len();
                        log::trace!("state {} = goto({}, {})", to, from, sym);
                        index.insert(nxt.clone(), to);
                        states.push(nxt);
                        to
                    }
                };
                transitions.insert((from, sym.clone()), to);
            }
            from += 1;
        }

        log::debug!(
            "LR(0) automaton: {} states, {} transitions",
            states.len(),
            transitions.len()
        );

        Automaton {
            states,
            transitions,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    pub fn state(&self, idx: usize) -> Option<&ItemSet> {
        self.states.get(idx)
    }

    /// Index of the state holding exactly `items`.
    pub fn find_state(&self, items: &ItemSet) -> Option<usize> {
        self.states.iter().position(|st| st == items)
    }

    /// The transition δ(state, sym), if defined.
    pub fn goto(&self, state: usize, sym: &Symbol) -> Option<usize> {
        // BTreeMap lookups need an owned key
        self.transitions.get(&(state, sym.clone())).copied()
    }

    /// All transitions, ordered by source state and symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, &Symbol, usize)> {
        self.transitions
            .iter()
            .map(|((from, sym), to)| (*from, sym, *to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Grammar {
        Grammar::load(&["S -> a"], &["a"], &["S"], "S").unwrap()
    }

    fn expr() -> Grammar {
        Grammar::load(
            &[
                "E -> E + T",
                "E -> T",
                "T -> T * F",
                "T -> F",
                "F -> ( E )",
                "F -> id",
            ],
            &["+", "*", "(", ")", "id"],
            &["E", "T", "F"],
            "E",
        )
        .unwrap()
    }

    #[test]
    fn closure_expands_leading_nonterminals() {
        let g = tiny();
        let c = closure(&ItemSet::from([Item::new(0, 0)]), &g);
        assert_eq!(c, ItemSet::from([Item::new(0, 0), Item::new(1, 0)]));
    }

    #[test]
    fn closure_is_idempotent() {
        let g = expr();
        for p in 0..g.productions().len() {
            let once = closure(&ItemSet::from([Item::new(p, 0)]), &g);
            assert_eq!(closure(&once, &g), once);
        }
        let a = Automaton::build(&g);
        for st in a.states() {
            assert_eq!(&closure(st, &g), st);
        }
    }

    #[test]
    fn goto_without_transition_is_empty() {
        let g = tiny();
        let s0 = closure(&ItemSet::from([Item::new(0, 0)]), &g);
        assert!(goto(&s0, &Symbol::EndMarker, &g).is_empty());
        let s1 = goto(&s0, &Symbol::Terminal("a".into()), &g);
        assert_eq!(s1, ItemSet::from([Item::new(1, 1)]));
        assert!(goto(&s1, &Symbol::Terminal("a".into()), &g).is_empty());
    }

    #[test]
    fn tiny_automaton_has_three_states() {
        let g = tiny();
        let a = Automaton::build(&g);
        assert_eq!(a.len(), 3);
        assert_eq!(
            a.state(0),
            Some(&ItemSet::from([Item::new(0, 0), Item::new(1, 0)]))
        );
        assert_eq!(a.state(1), Some(&ItemSet::from([Item::new(1, 1)])));
        assert_eq!(a.state(2), Some(&ItemSet::from([Item::new(0, 1)])));
        assert_eq!(a.goto(0, &Symbol::Terminal("a".into())), Some(1));
        assert_eq!(a.goto(0, &Symbol::Nonterminal("S".into())), Some(2));
        assert_eq!(a.transitions().count(), 2);
    }

    #[test]
    fn expression_automaton_matches_textbook() {
        // the classic expression grammar has 12 LR(0) states
        let a = Automaton::build(&expr());
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn no_duplicate_states() {
        let a = Automaton::build(&expr());
        let unique: BTreeSet<&ItemSet> = a.states().iter().collect();
        assert_eq!(unique.len(), a.len());
        for (i, st) in a.states().iter().enumerate() {
            assert_eq!(a.find_state(st), Some(i));
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let g = expr();
        assert_eq!(Automaton::build(&g), Automaton::build(&g));
    }

    #[test]
    fn item_completeness() {
        let g = Grammar::load(&["S -> ε"], &["a"], &["S"], "S").unwrap();
        assert!(Item::new(1, 0).is_complete(&g));
        assert!(!Item::new(0, 0).is_complete(&g));
        assert_eq!(
            Item::new(0, 0).next_symbol(&g),
            Some(&Symbol::Nonterminal("S".into()))
        );
    }
}
