//! Grammar definition files.
//!
//! A definition file lists rules one per line, optionally preceded by
//! directives declaring the symbols:
//!
//! ```text
//! -- comments run to the end of the line
//! %terminals a c b
//! %nonterminals S T R
//! %start S
//! S -> T
//! T -> R
//! T -> a T c
//! R -> ε
//! R -> b R
//! ```
//!
//! Without `%nonterminals`, the nonterminals are the rule left-hand sides in
//! order of first appearance. Without `%terminals`, every other
//! right-hand-side word except `ε` is a terminal, again in order of first
//! appearance. Without `%start`, the first nonterminal is the start symbol.

mod lexer;
mod parser;

use crate::error::GrammarError;
use crate::grammar::{ARROW, EPSILON, Grammar};
use crate::symtab::Symtab;
use chumsky::Parser;
use lexer::{LexContext, Lexer, Token};
use parser::Line;

/// A rule as written in a definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub lhs: String,
    pub rhs: Vec<String>,
    /// 1-based line number.
    pub line: usize,
}

impl RuleDef {
    /// The rule in `"LHS -> s1 ... sn"` form.
    pub fn to_rule_string(&self) -> String {
        let mut s = format!("{} {}", self.lhs, ARROW);
        for w in &self.rhs {
            s.push(' ');
            s.push_str(w);
        }
        s
    }
}

/// The contents of a grammar definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarDef {
    pub terminals: Option<Vec<String>>,
    pub nonterminals: Option<Vec<String>>,
    pub start: Option<String>,
    pub rules: Vec<RuleDef>,
}

impl GrammarDef {
    /// Parses a definition file.
    pub fn parse(source: &str) -> Result<Self, GrammarError> {
        let mut ctx = LexContext::default();
        let toks = Lexer::tokenize_all(source, &mut ctx).map_err(|(line, text)| {
            GrammarError::Syntax {
                line,
                message: format!("unrecognized input {:?}", text),
            }
        })?;

        let word = |idx: usize| ctx.words.sym(idx).unwrap_or_default().to_owned();
        let words = |idxs: Vec<usize>| idxs.into_iter().map(word).collect::<Vec<_>>();
        let twice = |line: usize, directive: &str| GrammarError::Syntax {
            line,
            message: format!("duplicate {} directive", directive),
        };

        let mut def = GrammarDef::default();
        for (i, toks) in toks.split(|t| *t == Token::LineFeed).enumerate() {
            let line = i + 1;
            if toks.is_empty() {
                continue;
            }
            let parsed = parser::line()
                .parse(toks)
                .into_result()
                .map_err(|_| GrammarError::Syntax {
                    line,
                    message: "expected a directive or `LHS -> symbols`".into(),
                })?;
            match parsed {
                Line::Terminals(ws) => {
                    if def.terminals.is_some() {
                        return Err(twice(line, "%terminals"));
                    }
                    def.terminals = Some(words(ws));
                }
                Line::Nonterminals(ws) => {
                    if def.nonterminals.is_some() {
                        return Err(twice(line, "%nonterminals"));
                    }
                    def.nonterminals = Some(words(ws));
                }
                Line::Start(w) => {
                    if def.start.is_some() {
                        return Err(twice(line, "%start"));
                    }
                    def.start = Some(word(w));
                }
                Line::Rule(lhs, rhs) => def.rules.push(RuleDef {
                    lhs: word(lhs),
                    rhs: words(rhs),
                    line,
                }),
            }
        }

        log::debug!("parsed grammar definition: {} rules", def.rules.len());
        Ok(def)
    }

    /// Nonterminals, declared or inferred.
    pub fn resolved_nonterminals(&self) -> Vec<String> {
        if let Some(nts) = &self.nonterminals {
            return nts.clone();
        }
        let mut tab = Symtab::new();
        for rule in &self.rules {
            tab.add(&rule.lhs);
        }
        tab.names().to_vec()
    }

    /// Terminals, declared or inferred.
    pub fn resolved_terminals(&self) -> Vec<String> {
        if let Some(ts) = &self.terminals {
            return ts.clone();
        }
        let nonterminals = self.resolved_nonterminals();
        let mut tab = Symtab::new();
        for w in self.rules.iter().flat_map(|r| &r.rhs) {
            if w != EPSILON && !nonterminals.contains(w) {
                tab.add(w);
            }
        }
        tab.names().to_vec()
    }

    /// Loads the described grammar.
    pub fn into_grammar(self) -> Result<Grammar, GrammarError> {
        let nonterminals = self.resolved_nonterminals();
        let terminals = self.resolved_terminals();
        let start = match &self.start {
            Some(start) => start.clone(),
            None => nonterminals
                .first()
                .cloned()
                .ok_or_else(|| GrammarError::Syntax {
                    line: 1,
                    message: "grammar has no nonterminals".into(),
                })?,
        };
        let rules: Vec<String> = self.rules.iter().map(RuleDef::to_rule_string).collect();
        Grammar::load(&rules, &terminals, &nonterminals, &start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Symbol;

    const SRT: &str = "\
-- nested a/c pairs around a run of b
%terminals a c b
%nonterminals S T R
%start S

S -> T
T -> R
T -> a T c
R -> ε
R -> b R
";

    #[test]
    fn parses_directives_and_rules() {
        let def = GrammarDef::parse(SRT).unwrap();
        assert_eq!(
            def.terminals,
            Some(vec!["a".to_string(), "c".into(), "b".into()])
        );
        assert_eq!(def.start.as_deref(), Some("S"));
        assert_eq!(def.rules.len(), 5);
        assert_eq!(def.rules[2].to_rule_string(), "T -> a T c");
        assert_eq!(def.rules[2].line, 8);
    }

    #[test]
    fn loads_grammar() {
        let g = GrammarDef::parse(SRT).unwrap().into_grammar().unwrap();
        assert_eq!(g.terminals(), &["a", "c", "b"]);
        assert_eq!(g.nonterminals(), &["S", "T", "R"]);
        assert_eq!(g.productions().len(), 6);
        assert!(g.productions()[4].is_empty());
    }

    #[test]
    fn infers_symbols_when_undeclared() {
        let def = GrammarDef::parse("E -> E + T\nE -> T\nT -> id\nT -> ( E )\n").unwrap();
        assert_eq!(def.resolved_nonterminals(), vec!["E", "T"]);
        assert_eq!(def.resolved_terminals(), vec!["+", "id", "(", ")"]);
        let g = def.into_grammar().unwrap();
        assert_eq!(g.start(), "E");
        assert_eq!(
            g.productions()[1].rhs,
            vec![
                Symbol::Nonterminal("E".into()),
                Symbol::Terminal("+".into()),
                Symbol::Nonterminal("T".into()),
            ]
        );
    }

    #[test]
    fn word_containing_arrow_is_a_terminal() {
        let def = GrammarDef::parse("S -> x->y\n").unwrap();
        assert_eq!(def.resolved_terminals(), vec!["x->y"]);
        let g = def.into_grammar().unwrap();
        assert_eq!(g.terminals(), &["x->y"]);
        assert_eq!(g.productions()[1].rhs, vec![Symbol::Terminal("x->y".into())]);
    }

    #[test]
    fn reports_line_of_syntax_error() {
        let err = GrammarDef::parse("S -> a\n\nS a b\n").unwrap_err();
        assert!(matches!(err, GrammarError::Syntax { line: 3, .. }));
    }

    #[test]
    fn duplicate_directive() {
        let err = GrammarDef::parse("%start S\n%start T\n").unwrap_err();
        assert!(matches!(err, GrammarError::Syntax { line: 2, .. }));
    }

    #[test]
    fn empty_rhs_is_malformed_when_loaded() {
        let def = GrammarDef::parse("S -> a\nS ->\n").unwrap();
        let err = def.into_grammar().unwrap_err();
        assert!(matches!(err, GrammarError::MalformedRule { .. }));
    }

    #[test]
    fn undeclared_symbol_when_declared_lists_are_given() {
        let def = GrammarDef::parse("%terminals a\nS -> a b\n").unwrap();
        let err = def.into_grammar().unwrap_err();
        assert!(matches!(err, GrammarError::UndefinedSymbol { ref symbol, .. } if symbol == "b"));
    }

    #[test]
    fn empty_file_has_no_grammar() {
        let err = GrammarDef::parse("-- nothing\n").unwrap().into_grammar().unwrap_err();
        assert!(matches!(err, GrammarError::Syntax { .. }));
    }
}
