//! # Entry Table Model
//!
//! Accepted name/location pairs in insertion order. The table is the only
//! source of truth for duplicate-in-session detection.

/// A confirmed name and location accepted into the results table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    location: String,
}

impl Entry {
    pub fn new<N: Into<String>, L: Into<String>>(name: N, location: L) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Ordered sequence of accepted entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryTable {
    entries: Vec<Entry>,
}

impl EntryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end (display order = insertion order)
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Exact, case-sensitive name match against accepted entries
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }
}
