//! Merge of a secondary table against the primary table.

use locsync_core::{Entry, EntryStatus, ReconcileConfig};

use crate::table::Table;

/// Keys that changed state during one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deprecated: Vec<String>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deprecated.is_empty()
    }
}

/// Build the new secondary table: entries in primary order, then orphans
/// of the old secondary marked deprecated.
pub fn reconcile(primary: &Table, old_secondary: &Table, config: &ReconcileConfig) -> Table {
    reconcile_with_report(primary, old_secondary, config).0
}

pub fn reconcile_with_report(
    primary: &Table,
    old_secondary: &Table,
    config: &ReconcileConfig,
) -> (Table, ReconcileReport) {
    let mut report = ReconcileReport::default();
    let mut out: Vec<Entry> = Vec::with_capacity(primary.entries().len());

    for p in primary.entries() {
        if p.is_blank_line {
            out.push(Entry::blank_line());
            continue;
        }

        let old = old_secondary
            .get(&p.key)
            .cloned()
            .unwrap_or_else(|| Entry::new(p.key.clone(), "", ""));

        let entry = if old.translation.is_empty() && !p.translation.is_empty() {
            tracing::warn!(event = "key_added", key = %p.key);
            report.added.push(p.key.clone());
            let translation = if p.key == config.author_metadata_key {
                config.author_placeholder.clone()
            } else {
                p.translation.clone()
            };
            Entry::new(p.key.clone(), translation, "")
                .with_snapshot(p.translation.clone())
                .with_status(EntryStatus::New)
        } else if old.source_snapshot != p.translation {
            let previous = old.source_snapshot.clone();
            let mut entry = old;
            entry.key = p.key.clone();
            entry.source_snapshot = p.translation.clone();
            if !previous.is_empty() {
                tracing::warn!(event = "key_modified", key = %p.key, was = %previous, now = %p.translation);
                report.modified.push(p.key.clone());
                entry.status = EntryStatus::Modified;
                entry.previous_source_snapshot = previous;
            }
            entry
        } else {
            let mut entry = old;
            entry.key = p.key.clone();
            entry
        };
        out.push(entry);
    }

    for s in old_secondary.entries() {
        if s.is_blank_line || primary.contains_key(&s.key) {
            continue;
        }
        tracing::warn!(event = "key_orphaned", key = %s.key, "unused key, marking deprecated");
        report.deprecated.push(s.key.clone());
        out.push(s.clone().with_status(EntryStatus::Deprecated));
    }

    (Table::build(out), report)
}
