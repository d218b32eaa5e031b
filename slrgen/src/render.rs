//! Text rendering of a [`ParseTable`].
//!
//! The table is written as a Markdown table:
//!
//! ```text
//! | State | a | $ | S |
//! |---|---|---|---|
//! | 0 | s1 |  | 2 |
//! | 1 |  | r1 |  |
//! | 2 |  | acc |  |
//! ```
//!
//! Columns are the declared terminals, `$`, then the declared nonterminals.
//! Action cells hold `s<state>`, `r<production>` or `acc`; GOTO cells hold
//! the target state; undefined entries are empty. A `|` or `\` inside a
//! symbol name is escaped with `\`, as in Markdown. [`read_table`] parses
//! this format back given the same grammar.

use crate::error::GrammarError;
use crate::grammar::{Grammar, Symbol};
use crate::table::{Action, ParseTable};
use std::collections::BTreeMap;
use std::io::{self, Write};

const STATE_HEADER: &str = "State";

/// Table columns after the state column.
pub fn columns(grammar: &Grammar) -> Vec<Symbol> {
    grammar
        .terminals()
        .iter()
        .map(|t| Symbol::Terminal(t.clone()))
        .chain(std::iter::once(Symbol::EndMarker))
        .chain(
            grammar
                .nonterminals()
                .iter()
                .map(|n| Symbol::Nonterminal(n.clone())),
        )
        .collect()
}

/// Escapes `\` and `|` so that a cell never contains a bare separator.
fn escape(cell: &str) -> String {
    cell.replace('\\', "\\\\").replace('|', "\\|")
}

fn write_row<W: Write, S: AsRef<str>>(out: &mut W, cells: &[S]) -> io::Result<()> {
    write!(out, "|")?;
    for cell in cells {
        write!(out, " {} |", escape(cell.as_ref()))?;
    }
    writeln!(out)
}

/// Writes `table` to `out`.
pub fn write_table<W: Write>(out: &mut W, table: &ParseTable, grammar: &Grammar) -> io::Result<()> {
    let cols = columns(grammar);

    let header: Vec<&str> = std::iter::once(STATE_HEADER)
        .chain(cols.iter().map(|c| c.name()))
        .collect();
    write_row(out, &header)?;
    writeln!(out, "|{}", "---|".repeat(header.len()))?;

    for state in 0..table.len() {
        let mut row = Vec::with_capacity(header.len());
        row.push(state.to_string());
        for col in &cols {
            let cell = match col {
                Symbol::Nonterminal(nt) => table.goto(state, nt).map(|to| to.to_string()),
                lookahead => table.action(state, lookahead).map(|a| a.to_string()),
            };
            row.push(cell.unwrap_or_default());
        }
        write_row(out, &row)?;
    }
    Ok(())
}

/// Renders `table` into a string.
pub fn to_string(table: &ParseTable, grammar: &Grammar) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_table(&mut buf, table, grammar);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Splits a row on unescaped `|` and unescapes the cells. The row must
/// start and end with a separator.
fn split_row(line: &str) -> Option<Vec<String>> {
    let mut chars = line.trim().strip_prefix('|')?.chars();
    let mut cells = Vec::new();
    let mut cell = String::new();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => cell.push(chars.next()?),
            '|' => {
                cells.push(cell.trim().to_owned());
                cell.clear();
            }
            _ => cell.push(ch),
        }
    }
    if !cell.trim().is_empty() {
        return None;
    }
    Some(cells)
}

fn parse_action(cell: &str) -> Option<Action> {
    if cell == "acc" {
        return Some(Action::Accept);
    }
    if let Some(n) = cell.strip_prefix('s') {
        return n.parse().ok().map(Action::Shift);
    }
    if let Some(n) = cell.strip_prefix('r') {
        return n.parse().ok().map(Action::Reduce);
    }
    None
}

/// Reads a table written by [`write_table`] back, checking that its header
/// matches `grammar`'s symbol order.
pub fn read_table(text: &str, grammar: &Grammar) -> Result<ParseTable, GrammarError> {
    let bad = |msg: String| GrammarError::Table(msg);
    let cols = columns(grammar);

    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .and_then(split_row)
        .ok_or_else(|| bad("missing header row".into()))?;
    let expected: Vec<&str> = std::iter::once(STATE_HEADER)
        .chain(cols.iter().map(|c| c.name()))
        .collect();
    if header != expected {
        return Err(bad(format!(
            "header {:?} does not match grammar columns {:?}",
            header, expected
        )));
    }

    let separator = lines
        .next()
        .and_then(split_row)
        .ok_or_else(|| bad("missing separator row".into()))?;
    if separator.len() != expected.len()
        || !separator.iter().all(|c| !c.is_empty() && c.chars().all(|ch| ch == '-'))
    {
        return Err(bad("malformed separator row".into()));
    }

    let mut action = BTreeMap::new();
    let mut goto = BTreeMap::new();
    let mut n_states = 0;
    for line in lines {
        let cells = split_row(line).ok_or_else(|| bad(format!("malformed row {:?}", line)))?;
        if cells.len() != expected.len() {
            return Err(bad(format!(
                "row {:?} has {} cells, expected {}",
                line,
                cells.len(),
                expected.len()
            )));
        }
        let state: usize = cells[0]
            .parse()
            .map_err(|_| bad(format!("bad state index {:?}", cells[0])))?;
        if state != n_states {
            return Err(bad(format!("expected state {}, found {}", n_states, state)));
        }

        for (col, cell) in cols.iter().zip(&cells[1..]) {
            if cell.is_empty() {
                continue;
            }
            match col {
                Symbol::Nonterminal(nt) => {
                    let to: usize = cell
                        .parse()
                        .map_err(|_| bad(format!("bad goto cell {:?} in state {}", cell, state)))?;
                    goto.insert((state, nt.clone()), to);
                }
                lookahead => {
                    let act = parse_action(cell).ok_or_else(|| {
                        bad(format!("bad action cell {:?} in state {}", cell, state))
                    })?;
                    action.insert((state, lookahead.clone()), act);
                }
            }
        }
        n_states += 1;
    }

    Ok(ParseTable::from_parts(n_states, action, goto))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> (Grammar, ParseTable) {
        let g = Grammar::load(&["S -> a"], &["a"], &["S"], "S").unwrap();
        let tab = ParseTable::from_grammar(&g).unwrap();
        (g, tab)
    }

    #[test]
    fn renders_markdown_table() {
        let (g, tab) = tiny();
        let text = to_string(&tab, &g);
        let expected = "\
| State | a | $ | S |
|---|---|---|---|
| 0 | s1 |  | 2 |
| 1 |  | r1 |  |
| 2 |  | acc |  |
";
        assert_eq!(text, expected);
    }

    #[test]
    fn reads_back_what_it_writes() {
        let (g, tab) = tiny();
        let text = to_string(&tab, &g);
        assert_eq!(read_table(&text, &g).unwrap(), tab);
    }

    #[test]
    fn pipe_terminal_is_escaped() {
        let g = Grammar::load(&["E -> E | T", "E -> T", "T -> id"], &["|", "id"], &["E", "T"], "E")
            .unwrap();
        let tab = ParseTable::from_grammar(&g).unwrap();
        let text = to_string(&tab, &g);
        assert!(text.starts_with("| State | \\| | id | $ | E | T |\n"));
        assert_eq!(read_table(&text, &g).unwrap(), tab);
    }

    #[test]
    fn rejects_header_of_another_grammar() {
        let (_, tab) = tiny();
        let g = Grammar::load(&["S -> a"], &["a"], &["S"], "S").unwrap();
        let other = Grammar::load(&["S -> b"], &["b"], &["S"], "S").unwrap();
        let text = to_string(&tab, &g);
        assert!(matches!(read_table(&text, &other), Err(GrammarError::Table(_))));
    }

    #[test]
    fn rejects_bad_cells() {
        let (g, _) = tiny();
        let text = "| State | a | $ | S |\n|---|---|---|---|\n| 0 | x1 |  | 2 |\n";
        assert!(matches!(read_table(text, &g), Err(GrammarError::Table(_))));
        let text = "| State | a | $ | S |\n|---|---|---|---|\n| 1 | s1 |  | 2 |\n";
        assert!(matches!(read_table(text, &g), Err(GrammarError::Table(_))));
        let text = "| State | a | $ | S |\n| 0 | s1 |  | 2 |\n";
        assert!(matches!(read_table(text, &g), Err(GrammarError::Table(_))));
    }

    #[test]
    fn parses_cells() {
        assert_eq!(parse_action("s12"), Some(Action::Shift(12)));
        assert_eq!(parse_action("r0"), Some(Action::Reduce(0)));
        assert_eq!(parse_action("acc"), Some(Action::Accept));
        assert_eq!(parse_action("s"), None);
        assert_eq!(split_row("| 0 |  | r1 |").unwrap(), vec!["0", "", "r1"]);
        assert_eq!(split_row("| \\| | a\\\\ |").unwrap(), vec!["|", "a\\"]);
        assert_eq!(split_row("| 0 | s1"), None);
        assert_eq!(split_row("| 0 \\"), None);
    }
}
