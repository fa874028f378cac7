use std::collections::BTreeSet;

use super::parts::PartEntry;

/// Deduplicated set of part entries selected by configuration
///
/// Entries are compared by identity, so inserting the same registry entry
/// twice keeps one copy. Equality ignores insertion order.
#[derive(Debug, Clone, Default)]
pub struct RegisteredTypeSet {
    entries: Vec<&'static PartEntry>,
}

impl RegisteredTypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry`; returns `false` if it was already present
    pub fn insert(&mut self, entry: &'static PartEntry) -> bool {
        if self.contains(entry) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, entry: &PartEntry) -> bool {
        self.entries.iter().any(|known| std::ptr::eq(*known, entry))
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.entries.iter().any(|entry| entry.type_name == type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static PartEntry> + '_ {
        self.entries.iter().copied()
    }

    /// Sorted type identifiers of the set
    pub fn type_names(&self) -> BTreeSet<&'static str> {
        self.entries.iter().map(|entry| entry.type_name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for RegisteredTypeSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|entry| other.contains(entry))
    }
}

impl Eq for RegisteredTypeSet {}

impl Extend<&'static PartEntry> for RegisteredTypeSet {
    fn extend<I: IntoIterator<Item = &'static PartEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl FromIterator<&'static PartEntry> for RegisteredTypeSet {
    fn from_iter<I: IntoIterator<Item = &'static PartEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
