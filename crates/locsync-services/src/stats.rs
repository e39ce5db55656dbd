use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use locsync_core::{EntryStatus, ReconcileConfig, Result};
use locsync_domain::{FileStats, StatsReport, SCHEMA_VERSION};
use rayon::prelude::*;

use crate::discover::{language_code_from_path, Naming};
use crate::table::Table;
use crate::update::load_table;

/// Per-status counts of a table, every status present.
pub fn localization_stats(table: &Table) -> BTreeMap<EntryStatus, usize> {
    let mut counts: BTreeMap<EntryStatus, usize> =
        EntryStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for (status, n) in table.status_counts() {
        *counts.entry(*status).or_insert(0) += n;
    }
    counts
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocStats {
    pub none: usize,
    pub new: usize,
    pub modified: usize,
    pub deprecated: usize,
}

impl LocStats {
    pub fn from_table(table: &Table) -> Self {
        let counts = localization_stats(table);
        let get = |s: EntryStatus| counts.get(&s).copied().unwrap_or(0);
        Self {
            none: get(EntryStatus::None),
            new: get(EntryStatus::New),
            modified: get(EntryStatus::Modified),
            deprecated: get(EntryStatus::Deprecated),
        }
    }

    /// Live entries; deprecated ones are not part of the total.
    pub fn total(&self) -> usize {
        self.none + self.new + self.modified
    }

    pub fn percent_complete(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.none as f64 * 100.0 / total as f64,
        }
    }

    pub fn merge(&mut self, other: &LocStats) {
        self.none += other.none;
        self.new += other.new;
        self.modified += other.modified;
        self.deprecated += other.deprecated;
    }

    pub fn to_file_stats(&self, path: &Path, language: &str) -> FileStats {
        FileStats {
            path: path.display().to_string(),
            language: language.to_string(),
            none: self.none,
            new: self.new,
            modified: self.modified,
            deprecated: self.deprecated,
            total: self.total(),
            percent_complete: self.percent_complete(),
            error: None,
        }
    }
}

pub fn stats_for_file(path: &Path, config: &ReconcileConfig) -> Result<LocStats> {
    let table = load_table(path, config)?;
    Ok(LocStats::from_table(&table))
}

/// Stats for many files, computed in parallel. Files that fail to load are
/// reported with their error instead of aborting the run.
pub fn collect_stats(paths: &[PathBuf], config: &ReconcileConfig, naming: &Naming) -> StatsReport {
    let results: Vec<(PathBuf, Result<LocStats>)> = paths
        .par_iter()
        .map(|p| (p.clone(), stats_for_file(p, config)))
        .collect();

    let mut files = Vec::with_capacity(results.len());
    for (path, result) in results {
        let language = language_code_from_path(&path, naming);
        match result {
            Ok(stats) => files.push(stats.to_file_stats(&path, &language)),
            Err(err) => {
                tracing::warn!(event = "stats_failed", path = %path.display(), error = %err);
                files.push(FileStats {
                    path: path.display().to_string(),
                    language,
                    error: Some(err.to_string()),
                    ..FileStats::default()
                });
            }
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    StatsReport {
        schema_version: SCHEMA_VERSION,
        files,
    }
}
