//! File naming convention and discovery of table files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    pub filename_prefix: String,
    pub filename_suffix: String,
    pub primary_extension: String,
    pub allowed_extensions: Vec<String>,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            filename_prefix: "loc_".to_string(),
            filename_suffix: String::new(),
            primary_extension: "csv".to_string(),
            allowed_extensions: vec!["txt".to_string()],
        }
    }
}

impl Naming {
    pub fn is_valid_extension(&self, ext: &str) -> bool {
        ext == self.primary_extension || self.allowed_extensions.iter().any(|e| e == ext)
    }

    fn matches_stem(&self, stem: &str) -> bool {
        (self.filename_prefix.is_empty() || stem.starts_with(&self.filename_prefix))
            && (self.filename_suffix.is_empty() || stem.ends_with(&self.filename_suffix))
    }
}

/// `<prefix><code><suffix>.<ext>`, e.g. `loc_fr.csv`.
pub fn filename_for_language_code(code: &str, naming: &Naming) -> String {
    format!(
        "{}{}{}.{}",
        naming.filename_prefix, code, naming.filename_suffix, naming.primary_extension
    )
}

pub fn primary_table_path(primary_dir: &Path, code: &str, naming: &Naming) -> PathBuf {
    primary_dir.join(filename_for_language_code(code, naming))
}

/// Language code of a table file: its stem with prefix and suffix chopped off
/// by length.
pub fn language_code_from_path(path: &Path, naming: &Naming) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let chars: Vec<char> = stem.chars().collect();
    let start = naming.filename_prefix.chars().count().min(chars.len());
    let end = chars
        .len()
        .saturating_sub(naming.filename_suffix.chars().count())
        .max(start);
    chars[start..end].iter().collect()
}

/// Every table file under `roots`, sorted and without duplicates.
/// Symlinks are followed. Missing roots and entries that cannot be read
/// (dangling links, loops, permission errors) are skipped with a warning.
pub fn discover_table_files(
    roots: &[PathBuf],
    naming: &Naming,
    include_subdirectories: bool,
) -> Vec<PathBuf> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();
    for root in roots {
        if !root.is_dir() {
            tracing::warn!(event = "discover_root_missing", root = %root.display());
            continue;
        }
        let max_depth = if include_subdirectories { usize::MAX } else { 1 };
        for entry in WalkDir::new(root).follow_links(true).max_depth(max_depth) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(event = "discover_entry_failed", root = %root.display(), error = %err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let ext_ok = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| naming.is_valid_extension(e))
                .unwrap_or(false);
            let stem_ok = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| naming.matches_stem(s))
                .unwrap_or(false);
            if ext_ok && stem_ok {
                found.insert(path.to_path_buf());
            }
        }
    }
    tracing::debug!(event = "discover_done", files = found.len());
    found.into_iter().collect()
}
