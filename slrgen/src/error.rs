//! Error type shared by grammar loading and table construction.
//!
//! Every failure is detected by the component that first observes it and is
//! returned as a [`GrammarError`]. Loading errors (`MalformedRule`,
//! `UndefinedSymbol`, `UnknownStart`, ...) abort before any automaton work;
//! `NotSLR1` aborts table construction. Nothing is retried or defaulted.

use crate::grammar::Symbol;
use crate::table::Action;
use thiserror::Error;

/// Errors produced while loading a grammar or building its SLR(1) table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A rule string cannot be split into a left nonterminal and a non-empty
    /// right-hand side.
    #[error("malformed rule {rule:?}: {reason}")]
    MalformedRule {
        /// The offending rule, as given.
        rule: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A right-hand-side token is neither a declared terminal, a declared
    /// nonterminal, nor `ε`.
    #[error("undefined symbol {symbol:?} in rule {rule:?}")]
    UndefinedSymbol {
        /// The rule containing the token.
        rule: String,
        /// The undeclared token.
        symbol: String,
    },

    /// The start symbol is not among the declared nonterminals.
    #[error("start symbol {0:?} is not a declared nonterminal")]
    UnknownStart(String),

    /// A name is declared twice, or as both terminal and nonterminal.
    #[error("symbol {0:?} is declared more than once")]
    DuplicateSymbol(String),

    /// A declared name collides with `ε` or the end marker `$`.
    #[error("symbol {0:?} is reserved")]
    ReservedSymbol(String),

    /// Two different actions were derived for the same `(state, lookahead)`.
    #[error(
        "grammar is not SLR(1): conflict in state {state} on {symbol}: {}",
        join_actions(.actions)
    )]
    NotSLR1 {
        /// State in which the conflict occurs.
        state: usize,
        /// Lookahead terminal (or `$`).
        symbol: Symbol,
        /// Every distinct action derived for the key, in sorted order.
        actions: Vec<Action>,
    },

    /// A grammar definition file could not be parsed.
    #[error("syntax error on line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// Human-readable message.
        message: String,
    },

    /// A rendered table could not be read back.
    #[error("malformed table: {0}")]
    Table(String),
}

fn join_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" / ")
}
