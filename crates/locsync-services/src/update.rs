//! Batch update of every secondary table against the primary table.

use std::path::{Path, PathBuf};

use locsync_core::{LocSyncError, ReconcileConfig, Result};
use locsync_domain::{UpdateFileStat, UpdateSummary, SCHEMA_VERSION};
use locsync_parsers_csv::{parse_table_file_text, read_table_file, serialize};
use rayon::prelude::*;

use crate::discover::{language_code_from_path, Naming};
use crate::reconcile::reconcile_with_report;
use crate::table::Table;
use crate::util::{backup_file, is_read_only, write_atomic};

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    pub dry_run: bool,
    pub create_backup: bool,
}

pub fn load_table(path: &Path, config: &ReconcileConfig) -> Result<Table> {
    let entries = read_table_file(path, &config.markers)?;
    Ok(Table::build(entries))
}

/// Load the primary table, failing when it has nothing to reconcile against.
pub fn load_primary(path: &Path, config: &ReconcileConfig) -> Result<Table> {
    let table = load_table(path, config)?;
    if table.is_empty() {
        tracing::error!(event = "primary_empty", path = %path.display());
        return Err(LocSyncError::EmptyPrimary {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(table)
}

fn skipped(path: &Path, language: &str, message: String) -> UpdateFileStat {
    UpdateFileStat {
        path: path.display().to_string(),
        language: language.to_string(),
        status: "skipped".into(),
        added: Vec::new(),
        modified: Vec::new(),
        deprecated: Vec::new(),
        message: Some(message),
    }
}

/// Reconcile one secondary file against `primary` and write it back when
/// its content changes.
pub fn update_translation_file(
    path: &Path,
    primary: &Table,
    config: &ReconcileConfig,
    naming: &Naming,
    options: UpdateOptions,
) -> Result<UpdateFileStat> {
    let language = language_code_from_path(path, naming);

    if is_read_only(path) {
        tracing::warn!(event = "file_read_only", path = %path.display(), "cannot write to read-only file");
        return Err(LocSyncError::FileWrite {
            path: path.to_path_buf(),
            reason: "file is read-only".into(),
        }
        .into());
    }

    let current = std::fs::read_to_string(path).map_err(|source| LocSyncError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let old = Table::build(parse_table_file_text(path, &current, &config.markers)?);
    if old.entries().is_empty() {
        tracing::warn!(event = "secondary_empty", path = %path.display(), "no entries found");
    }

    let (new_table, report) = reconcile_with_report(primary, &old, config);
    let text = serialize(new_table.entries(), config);

    let status = if text == current {
        "unchanged"
    } else if options.dry_run {
        "planned"
    } else {
        if options.create_backup {
            let bak = backup_file(path)?;
            tracing::debug!(event = "backup_written", path = %bak.display());
        }
        write_atomic(path, text.as_bytes())?;
        tracing::info!(
            event = "table_updated",
            path = %path.display(),
            added = report.added.len(),
            modified = report.modified.len(),
            deprecated = report.deprecated.len()
        );
        "updated"
    };

    Ok(UpdateFileStat {
        path: path.display().to_string(),
        language,
        status: status.into(),
        added: report.added,
        modified: report.modified,
        deprecated: report.deprecated,
        message: None,
    })
}

/// Reconcile every file in `files` against the primary table at `primary_path`.
///
/// Fails without touching anything when the primary table cannot be loaded or
/// is empty. Individual files that cannot be read, parsed or written are
/// reported as skipped; the rest are still processed.
pub fn update_translations(
    primary_path: &Path,
    files: &[PathBuf],
    config: &ReconcileConfig,
    naming: &Naming,
    options: UpdateOptions,
) -> Result<UpdateSummary> {
    let primary = load_primary(primary_path, config)?;
    tracing::info!(event = "primary_loaded", path = %primary_path.display(), keys = primary.len());

    let targets: Vec<&PathBuf> = files
        .iter()
        .filter(|p| {
            p.as_path() != primary_path
                && language_code_from_path(p, naming) != config.primary_language_code
        })
        .collect();

    let mut stats: Vec<UpdateFileStat> = targets
        .par_iter()
        .map(|path| {
            update_translation_file(path, &primary, config, naming, options).unwrap_or_else(|err| {
                tracing::warn!(event = "file_skipped", path = %path.display(), error = %err);
                skipped(path, &language_code_from_path(path, naming), err.to_string())
            })
        })
        .collect();
    stats.sort_by(|a, b| a.path.cmp(&b.path));

    let count = |s: &str| stats.iter().filter(|f| f.status == s).count();
    Ok(UpdateSummary {
        schema_version: SCHEMA_VERSION,
        primary: primary_path.display().to_string(),
        primary_keys: primary.len(),
        updated: count("updated") + count("planned"),
        unchanged: count("unchanged"),
        skipped: count("skipped"),
        files: stats,
    })
}

/// Create a table for a new language next to the primary table and fill it
/// with every primary key flagged as new.
pub fn create_language_table(
    primary_path: &Path,
    code: &str,
    config: &ReconcileConfig,
    naming: &Naming,
) -> Result<PathBuf> {
    let primary = load_primary(primary_path, config)?;
    let dir = primary_path.parent().unwrap_or_else(|| Path::new("."));
    let path = crate::discover::primary_table_path(dir, code, naming);
    if path.exists() {
        return Err(LocSyncError::Other(format!("{} already exists", path.display())).into());
    }
    let (table, _) = reconcile_with_report(&primary, &Table::default(), config);
    write_atomic(&path, serialize(table.entries(), config).as_bytes())?;
    tracing::info!(event = "language_created", path = %path.display(), keys = table.len());
    Ok(path)
}
