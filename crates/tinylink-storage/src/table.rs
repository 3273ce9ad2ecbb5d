use std::collections::HashMap;
use tinylink_core::{Entry, ShortCode};

/// In-memory associations from short code to original URL.
///
/// Entries are kept in the order their code was first inserted, so that
/// writing the table out always yields the same file for the same history.
/// Overwriting a code keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    index: HashMap<ShortCode, usize>,
    entries: Vec<Entry>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `original_url` under `code`, overwriting any previous value.
    ///
    /// Returns the URL that was replaced, if any.
    pub fn insert(
        &mut self,
        code: impl Into<ShortCode>,
        original_url: impl Into<String>,
    ) -> Option<String> {
        let code = code.into();
        let original_url = original_url.into();

        match self.index.get(&code) {
            Some(&slot) => Some(std::mem::replace(
                &mut self.entries[slot].original_url,
                original_url,
            )),
            None => {
                self.index.insert(code.clone(), self.entries.len());
                self.entries.push(Entry { code, original_url });
                None
            }
        }
    }

    /// Returns the URL stored under `code`, or `None` on a miss.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.index
            .get(code)
            .map(|&slot| self.entries[slot].original_url.as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Entry> for MappingTable {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut table = MappingTable::new();
        for entry in iter {
            table.insert(entry.code, entry.original_url);
        }
        table
    }
}

/// Two tables are equal when they hold the same associations, regardless of
/// order or history.
impl PartialEq for MappingTable {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|entry| other.lookup(entry.code.as_str()) == Some(entry.original_url.as_str()))
    }
}

impl Eq for MappingTable {}
