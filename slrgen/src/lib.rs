//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! SLR(1) parse table generator.
//!
//! `slrgen` takes a context-free grammar and produces its SLR(1)
//! ACTION/GOTO table:
//!
//!  * [`grammar`]: symbols, productions and the augmented grammar
//!  * [`lr0`]: LR(0) items, closure, goto and the canonical collection
//!  * [`sets`]: FIRST and FOLLOW sets
//!  * [`table`]: ACTION/GOTO construction with conflict detection
//!  * [`render`]: the plain-text table format, written and read back
//!  * [`def`]: grammar definition files
//!  * [`generate()`]: file-to-file driver used by the `slrgen` binary
//!
//! # Example
//!
//! ```rust
//! use slrgen::{Action, Grammar, ParseTable, Symbol};
//!
//! let grammar = Grammar::load(&["S -> a"], &["a"], &["S"], "S").unwrap();
//! let table = ParseTable::from_grammar(&grammar).unwrap();
//! assert_eq!(table.action(0, &Symbol::Terminal("a".into())), Some(Action::Shift(1)));
//! assert_eq!(table.action(2, &Symbol::EndMarker), Some(Action::Accept));
//! assert_eq!(table.goto(0, "S"), Some(2));
//! ```

pub mod def;
pub mod error;
pub mod grammar;
pub mod listing;
pub mod lr0;
pub mod render;
pub mod sets;
pub mod symtab;
pub mod table;

mod generate;

pub use error::GrammarError;
pub use generate::{generate, listing_path};
pub use grammar::{Grammar, Production, Symbol};
pub use lr0::{Automaton, Item, ItemSet};
pub use sets::{FirstSets, FollowSets};
pub use table::{Action, ParseTable};
