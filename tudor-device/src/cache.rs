//! Local mirror of the host's record store.
//!
//! The host is the only source of truth. The cache is a hint for fast
//! existence checks and is only ever changed after the host has acknowledged
//! the matching mutation.

use tudor_types::{PrintIdentity, Record};

/// Records the driver believes exist on the host. Order is not meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCache {
    records: Vec<Record>,
}

impl RecordCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache holding `records`.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Whether any cached record matches `identity`.
    pub fn contains(&self, identity: &PrintIdentity) -> bool {
        self.records.iter().any(|r| r == identity)
    }

    /// Adds a record the host has confirmed.
    pub fn insert(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Removes one record matching `identity`, if any.
    ///
    /// Duplicates are tolerated: only the first match goes. The last entry
    /// takes the removed one's slot.
    pub fn remove_first(&mut self, identity: &PrintIdentity) -> Option<Record> {
        let pos = self.records.iter().position(|r| r == identity)?;
        Some(self.records.swap_remove(pos))
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Replaces the contents with a fresh listing from the host.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }
}

impl<'a> IntoIterator for &'a RecordCache {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
