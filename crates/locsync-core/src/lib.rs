use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Review state of a single entry in a secondary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    None,
    New,
    Modified,
    Deprecated,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 4] = [
        EntryStatus::None,
        EntryStatus::New,
        EntryStatus::Modified,
        EntryStatus::Deprecated,
    ];
}

/// One row of a translation table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub translation: String,
    pub comment: String,
    /// Primary-language text as of the last reconciliation ("Primary" column).
    pub source_snapshot: String,
    /// Value of `source_snapshot` before the last change. Only set for `Modified`,
    /// never written as its own column.
    pub previous_source_snapshot: String,
    pub status: EntryStatus,
    /// Placeholder row that keeps the visual spacing of the file.
    pub is_blank_line: bool,
}

impl Entry {
    pub fn new(
        key: impl Into<String>,
        translation: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            translation: translation.into(),
            comment: comment.into(),
            ..Self::default()
        }
    }

    pub fn blank_line() -> Self {
        Self {
            is_blank_line: true,
            ..Self::default()
        }
    }

    pub fn with_snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.source_snapshot = snapshot.into();
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuotingPolicy {
    /// Every non-empty value field is wrapped in quotes.
    #[default]
    ForceQuoted,
    /// Only fields containing a quote, comma or line break are wrapped.
    OnlyWhenNeeded,
}

/// Sentinel strings written to the status column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMarkers {
    pub new: String,
    pub modified_prefix: String,
    pub modified_suffix: String,
    pub deprecated: String,
}

impl Default for StatusMarkers {
    fn default() -> Self {
        Self {
            new: "New Entry".to_string(),
            modified_prefix: "Modified Entry: was '".to_string(),
            modified_suffix: "'".to_string(),
            deprecated: "Deprecated Entry".to_string(),
        }
    }
}

/// Policy handed to every parse/reconcile/serialize call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    pub primary_language_code: String,
    pub markers: StatusMarkers,
    pub preserve_deprecated_lines: bool,
    pub quoting_policy: QuotingPolicy,
    /// Key whose translation names the table's author.
    pub author_metadata_key: String,
    /// Written instead of the primary author when the author key is new.
    pub author_placeholder: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            primary_language_code: "en".to_string(),
            markers: StatusMarkers::default(),
            preserve_deprecated_lines: false,
            quoting_policy: QuotingPolicy::ForceQuoted,
            author_metadata_key: "_meta_author".to_string(),
            author_placeholder: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LocSyncError {
    #[error("invalid header in {path}: {reason}")]
    InvalidHeader { path: PathBuf, reason: String },
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {reason}")]
    FileWrite { path: PathBuf, reason: String },
    #[error("primary table {path} has no usable entries")]
    EmptyPrimary { path: PathBuf },
    #[error("{0}")]
    Other(String),
}

impl LocSyncError {
    /// Same error with the path filled in, for errors raised before the file was known.
    pub fn at_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            LocSyncError::InvalidHeader { reason, .. } => LocSyncError::InvalidHeader {
                path: path.into(),
                reason,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markers_match_file_format() {
        let m = StatusMarkers::default();
        assert_eq!(m.new, "New Entry");
        assert_eq!(m.modified_prefix, "Modified Entry: was '");
        assert_eq!(m.modified_suffix, "'");
        assert_eq!(m.deprecated, "Deprecated Entry");
    }

    #[test]
    fn blank_line_has_no_key() {
        let e = Entry::blank_line();
        assert!(e.is_blank_line);
        assert!(e.key.is_empty());
        assert_eq!(e.status, EntryStatus::None);
    }

    #[test]
    fn invalid_header_takes_path() {
        let err = LocSyncError::InvalidHeader {
            path: PathBuf::new(),
            reason: "column 0 must be 'Key'".into(),
        }
        .at_path("loc_fr.csv");
        assert_eq!(
            err.to_string(),
            "invalid header in loc_fr.csv: column 0 must be 'Key'"
        );
    }
}
