//! Grammar model.
//!
//! A [`Grammar`] is loaded from rule strings of the form `"LHS -> s1 ... sn"`
//! together with the declared terminals, nonterminals and start symbol.
//! Loading validates every rule and prepends the augmented production
//! `Start' -> Start` at index 0. The result is immutable.

use crate::error::GrammarError;
use crate::symtab::Symtab;
use std::fmt;

/// The epsilon marker accepted on the right-hand side of a rule.
pub const EPSILON: &str = "ε";

/// The end-of-input marker used in FOLLOW sets and table columns.
pub const END_MARKER: &str = "$";

/// Separator between the left and right sides of a rule string.
pub const ARROW: &str = "->";

/// A grammar symbol. Identity is by kind and name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
    Epsilon,
    EndMarker,
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    /// Name as written in rules and table headers.
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => name,
            Symbol::Epsilon => EPSILON,
            Symbol::EndMarker => END_MARKER,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rewrite rule `lhs -> rhs`.
///
/// Epsilon productions are stored with an empty right-hand side, so their
/// only item is already complete.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: String,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lhs, ARROW)?;
        if self.rhs.is_empty() {
            return write!(f, " {}", EPSILON);
        }
        for sym in &self.rhs {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}

/// An augmented context-free grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    productions: Vec<Production>,
    terminals: Symtab,
    nonterminals: Symtab,
    start: String,
    augmented_start: String,
}

impl Grammar {
    /// Loads and validates a grammar, prepending `Start' -> Start`.
    ///
    /// Declared symbol order is preserved: it determines the symbol
    /// enumeration order of automaton construction and the column order of
    /// rendered tables.
    pub fn load<R, T, N>(
        rules: &[R],
        terminals: &[T],
        nonterminals: &[N],
        start: &str,
    ) -> Result<Self, GrammarError>
    where
        R: AsRef<str>,
        T: AsRef<str>,
        N: AsRef<str>,
    {
        let terminals = declare(terminals.iter().map(AsRef::as_ref), &Symtab::new())?;
        let nonterminals = declare(nonterminals.iter().map(AsRef::as_ref), &terminals)?;

        if !nonterminals.contains(start) {
            return Err(GrammarError::UnknownStart(start.to_owned()));
        }

        let mut augmented_start = format!("{}'", start);
        while terminals.contains(&augmented_start) || nonterminals.contains(&augmented_start) {
            augmented_start.push('\'');
        }

        let mut productions = Vec::with_capacity(rules.len() + 1);
        productions.push(Production {
            lhs: augmented_start.clone(),
            rhs: vec![Symbol::Nonterminal(start.to_owned())],
        });
        for rule in rules {
            productions.push(parse_rule(rule.as_ref(), &terminals, &nonterminals)?);
        }

        log::debug!(
            "loaded grammar: {} productions, {} terminals, {} nonterminals, start {}",
            productions.len(),
            terminals.len(),
            nonterminals.len(),
            start
        );

        Ok(Self {
            productions,
            terminals,
            nonterminals,
            start: start.to_owned(),
            augmented_start,
        })
    }

    /// All productions; index 0 is the augmented production.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, idx: usize) -> Option<&Production> {
        self.productions.get(idx)
    }

    /// Productions with `nt` on the left, with their indices.
    pub fn productions_of<'g>(
        &'g self,
        nt: &'g str,
    ) -> impl Iterator<Item = (usize, &'g Production)> + 'g {
        self.productions
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.lhs == nt)
    }

    /// Declared terminals, in declaration order.
    pub fn terminals(&self) -> &[String] {
        self.terminals.names()
    }

    /// Declared nonterminals, in declaration order. The augmented start
    /// symbol is not included.
    pub fn nonterminals(&self) -> &[String] {
        self.nonterminals.names()
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn augmented_start(&self) -> &str {
        &self.augmented_start
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    /// True for declared nonterminals and the augmented start symbol.
    pub fn is_nonterminal(&self, name: &str) -> bool {
        name == self.augmented_start || self.nonterminals.contains(name)
    }

    /// Every nonterminal that heads a production: the augmented start
    /// first, then the declared ones.
    pub fn all_nonterminals(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.augmented_start.as_str())
            .chain(self.nonterminals.iter().map(|s| s.as_str()))
    }

    /// Terminals then nonterminals, each in declaration order.
    ///
    /// This is the transition enumeration order of automaton construction.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.terminals
            .iter()
            .map(|t| Symbol::Terminal(t.clone()))
            .chain(self.nonterminals.iter().map(|n| Symbol::Nonterminal(n.clone())))
            .collect()
    }
}

fn declare<'a>(
    names: impl Iterator<Item = &'a str>,
    taken: &Symtab,
) -> Result<Symtab, GrammarError> {
    let mut tab = Symtab::new();
    for name in names {
        if name == EPSILON || name == END_MARKER || name == ARROW {
            return Err(GrammarError::ReservedSymbol(name.to_owned()));
        }
        if tab.contains(name) || taken.contains(name) {
            return Err(GrammarError::DuplicateSymbol(name.to_owned()));
        }
        tab.add(name);
    }
    Ok(tab)
}

fn parse_rule(
    rule: &str,
    terminals: &Symtab,
    nonterminals: &Symtab,
) -> Result<Production, GrammarError> {
    let malformed = |reason| GrammarError::MalformedRule {
        rule: rule.to_owned(),
        reason,
    };

    let words: Vec<&str> = rule.split_whitespace().collect();
    let mut arrows = words
        .iter()
        .enumerate()
        .filter(|&(_, w)| *w == ARROW)
        .map(|(i, _)| i);
    let arrow = match (arrows.next(), arrows.next()) {
        (Some(i), None) => i,
        _ => return Err(malformed("expected exactly one `->`")),
    };
    let (lhs, rhs) = (&words[..arrow], &words[arrow + 1..]);

    let lhs = match lhs {
        [lhs] => *lhs,
        [] => return Err(malformed("missing left-hand side")),
        _ => return Err(malformed("left-hand side must be a single symbol")),
    };
    if !nonterminals.contains(lhs) {
        return Err(malformed("left-hand side is not a declared nonterminal"));
    }

    if rhs.is_empty() {
        return Err(malformed("empty right-hand side"));
    }
    if rhs == [EPSILON] {
        return Ok(Production {
            lhs: lhs.to_owned(),
            rhs: Vec::new(),
        });
    }

    let mut symbols = Vec::with_capacity(rhs.len());
    for &word in rhs {
        let sym = if word == EPSILON {
            return Err(malformed("`ε` must be the whole right-hand side"));
        } else if terminals.contains(word) {
            Symbol::Terminal(word.to_owned())
        } else if nonterminals.contains(word) {
            Symbol::Nonterminal(word.to_owned())
        } else {
            return Err(GrammarError::UndefinedSymbol {
                rule: rule.to_owned(),
                symbol: word.to_owned(),
            });
        };
        symbols.push(sym);
    }

    Ok(Production {
        lhs: lhs.to_owned(),
        rhs: symbols,
    })
}
