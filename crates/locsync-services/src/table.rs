use std::collections::{BTreeMap, HashMap};

use locsync_core::{Entry, EntryStatus};

/// A later occurrence of a key that is already indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    /// Position of the ignored occurrence in `entries_in_order`.
    pub index: usize,
    /// Position of the occurrence that wins.
    pub first_index: usize,
}

/// One language's entries. Lookup data is derived once in [`Table::build`]
/// and never updated; changes mean building a new table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    entries_in_order: Vec<Entry>,
    key_to_index: HashMap<String, usize>,
    status_counts: BTreeMap<EntryStatus, usize>,
    duplicates: Vec<DuplicateKey>,
}

impl Table {
    pub fn build(entries: Vec<Entry>) -> Self {
        let mut key_to_index: HashMap<String, usize> = HashMap::with_capacity(entries.len());
        let mut status_counts: BTreeMap<EntryStatus, usize> =
            EntryStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut duplicates = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            if entry.is_blank_line {
                continue;
            }
            if let Some(&first_index) = key_to_index.get(&entry.key) {
                tracing::warn!(event = "duplicate_key", line = i, key = %entry.key, first = first_index);
                duplicates.push(DuplicateKey {
                    key: entry.key.clone(),
                    index: i,
                    first_index,
                });
                continue;
            }
            key_to_index.insert(entry.key.clone(), i);
            *status_counts.entry(entry.status).or_insert(0) += 1;
        }

        Self {
            entries_in_order: entries,
            key_to_index,
            status_counts,
            duplicates,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries_in_order
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.key_to_index.contains_key(key)
    }

    /// First entry with `key`.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.key_to_index
            .get(key)
            .and_then(|&i| self.entries_in_order.get(i))
    }

    pub fn status_counts(&self) -> &BTreeMap<EntryStatus, usize> {
        &self.status_counts
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }

    /// Number of indexed (unique, non-blank) entries.
    pub fn len(&self) -> usize {
        self.key_to_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_index.is_empty()
    }
}
