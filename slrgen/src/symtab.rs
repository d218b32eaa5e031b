use std::collections::HashMap;
use std::slice::Iter;

/// Ordered name table.
///
/// Names keep the index of their first insertion, so iteration follows
/// declaration order. That order fixes state numbering and table columns.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Symtab {
    map: HashMap<String, usize>,
    vec: Vec<String>,
}

impl Symtab {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            vec: Vec::new(),
        }
    }

    /// Interns `sym`, returning its index. Existing names keep their index.
    pub fn add(&mut self, sym: &str) -> usize {
        if let Some(&idx) = self.map.get(sym) {
            return idx;
        }
        let idx = self.vec.len();
        let owned = sym.to_owned();
        self.vec.push(owned.clone());
        self.map.insert(owned, idx);
        idx
    }

    pub fn iter(&self) -> Iter<'_, String> {
        self.vec.iter()
    }

    pub fn names(&self) -> &[String] {
        &self.vec
    }

    pub fn idx(&self, sym: &str) -> Option<usize> {
        self.map.get(sym).copied()
    }

    pub fn contains(&self, sym: &str) -> bool {
        self.map.contains_key(sym)
    }

    pub fn sym(&self, idx: usize) -> Option<&str> {
        self.vec.get(idx).map(|x| x.as_str())
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
}
