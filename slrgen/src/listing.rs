// Human-readable dumps of the intermediate results, written next to the
// table when debugging is enabled.

use crate::grammar::{ARROW, Grammar};
use crate::lr0::{Automaton, Item};
use crate::sets::{FirstSets, FollowSets, SymbolSet};
use std::io::{self, Write};

/// Writes the grammar productions.
///
/// # Output Format
/// ```text
/// PS,<number of productions>
///
/// P,<index>,<LHS> -> <RHS symbols>
/// ```
pub fn write_prods<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    writeln!(out, "PS,{}\n", grammar.productions().len())?;
    for (i, prod) in grammar.productions().iter().enumerate() {
        writeln!(out, "P,{},{}", i, prod)?;
    }
    Ok(())
}

/// Writes an item as `LHS -> α . β`.
pub fn write_item<W: Write>(out: &mut W, item: &Item, grammar: &Grammar) -> io::Result<()> {
    let Some(prod) = grammar.production(item.prod) else {
        return write!(out, "<bad item {:?}>", item);
    };
    write!(out, "{} {} ", prod.lhs, ARROW)?;
    for (j, sym) in prod.rhs.iter().enumerate() {
        if j == item.dot {
            write!(out, ". ")?;
        }
        write!(out, "{} ", sym)?;
    }
    if prod.rhs.len() == item.dot {
        write!(out, ".")?;
    }
    Ok(())
}

/// Writes every state of the automaton with its items, then the
/// transitions.
///
/// # Output Format
/// ```text
/// CS,<number of states>
///
/// C,<state>,<item>
///
/// T,<from>,<symbol>,<to>
/// ```
pub fn write_states<W: Write>(
    out: &mut W,
    automaton: &Automaton,
    grammar: &Grammar,
) -> io::Result<()> {
    writeln!(out, "CS,{}\n", automaton.len())?;
    for (i, state) in automaton.states().iter().enumerate() {
        for item in state {
            write!(out, "C,{},", i)?;
            write_item(out, item, grammar)?;
            writeln!(out)?;
        }
        writeln!(out)?;
    }
    for (from, sym, to) in automaton.transitions() {
        writeln!(out, "T,{},{},{}", from, sym, to)?;
    }
    Ok(())
}

fn write_set<W: Write>(out: &mut W, label: &str, nt: &str, set: &SymbolSet) -> io::Result<()> {
    write!(out, "{},{},{{", label, nt)?;
    for sym in set {
        write!(out, "{}, ", sym)?;
    }
    writeln!(out, "}}")
}

/// Writes FIRST and FOLLOW sets, one line per nonterminal.
pub fn write_sets<W: Write>(
    out: &mut W,
    first: &FirstSets,
    follow: &FollowSets,
) -> io::Result<()> {
    for (nt, set) in first.iter() {
        write_set(out, "FIRST", nt, set)?;
    }
    writeln!(out)?;
    for (nt, set) in follow.iter() {
        write_set(out, "FOLLOW", nt, set)?;
    }
    Ok(())
}

/// Writes productions, states and sets in one listing.
pub fn write_listing<W: Write>(
    out: &mut W,
    grammar: &Grammar,
    automaton: &Automaton,
    first: &FirstSets,
    follow: &FollowSets,
) -> io::Result<()> {
    write_prods(out, grammar)?;
    writeln!(out)?;
    write_states(out, automaton, grammar)?;
    writeln!(out)?;
    write_sets(out, first, follow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(grammar: &Grammar) -> String {
        let automaton = Automaton::build(grammar);
        let first = FirstSets::compute(grammar);
        let follow = FollowSets::compute(grammar, &first);
        let mut buf = Vec::new();
        write_listing(&mut buf, grammar, &automaton, &first, &follow).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn lists_everything() {
        let g = Grammar::load(&["S -> a"], &["a"], &["S"], "S").unwrap();
        let text = listing(&g);
        assert!(text.starts_with("PS,2\n\nP,0,S' -> S\nP,1,S -> a\n"));
        assert!(text.contains("CS,3\n"));
        assert!(text.contains("C,0,S' -> . S \n"));
        assert!(text.contains("C,1,S -> a .\n"));
        assert!(text.contains("T,0,a,1\n"));
        assert!(text.contains("T,0,S,2\n"));
        assert!(text.contains("FIRST,S,{a, }\n"));
        assert!(text.contains("FOLLOW,S,{$, }\n"));
    }

    #[test]
    fn epsilon_item_has_only_a_dot() {
        let g = Grammar::load(&["S -> ε"], &["a"], &["S"], "S").unwrap();
        let mut buf = Vec::new();
        write_item(&mut buf, &Item::new(1, 0), &g).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "S -> .");
    }
}
