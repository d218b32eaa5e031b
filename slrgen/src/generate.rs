use crate::def::GrammarDef;
use crate::lr0::Automaton;
use crate::sets::{FirstSets, FollowSets};
use crate::table::ParseTable;
use crate::{listing, render};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path of the debug listing written next to `out_path`.
pub fn listing_path(out_path: &Path) -> PathBuf {
    let mut name = OsString::from(out_path.as_os_str());
    name.push(".lst");
    PathBuf::from(name)
}

/// Generates the SLR(1) table for a grammar definition file.
///
/// Reads `grammar_path`, builds the table and writes it to `out_path`.
/// With `debug`, productions, LR(0) states and FIRST/FOLLOW sets are first
/// written to [`listing_path`]`(out_path)`, so the listing is available
/// even when the grammar turns out not to be SLR(1).
pub fn generate<P: AsRef<Path>>(grammar_path: P, out_path: P, debug: bool) -> Result<()> {
    let grammar_path = grammar_path.as_ref();
    let out_path = out_path.as_ref();

    let source = std::fs::read_to_string(grammar_path)
        .with_context(|| format!("can't read grammar {}", grammar_path.display()))?;
    let grammar = GrammarDef::parse(&source)
        .and_then(GrammarDef::into_grammar)
        .with_context(|| format!("invalid grammar {}", grammar_path.display()))?;

    let automaton = Automaton::build(&grammar);
    let first = FirstSets::compute(&grammar);
    let follow = FollowSets::compute(&grammar, &first);

    if debug {
        let path = listing_path(out_path);
        let mut out = BufWriter::new(
            File::create(&path).with_context(|| format!("can't create {}", path.display()))?,
        );
        listing::write_listing(&mut out, &grammar, &automaton, &first, &follow)?;
        out.flush()?;
        log::info!("wrote listing to {}", path.display());
    }

    let table = ParseTable::build(&grammar, &automaton, &follow)
        .with_context(|| format!("can't build table for {}", grammar_path.display()))?;

    let mut out = BufWriter::new(
        File::create(out_path).with_context(|| format!("can't create {}", out_path.display()))?,
    );
    render::write_table(&mut out, &table, &grammar)?;
    out.flush()?;

    log::info!(
        "wrote {} states, {} productions to {}",
        table.len(),
        grammar.productions().len(),
        out_path.display()
    );
    Ok(())
}
