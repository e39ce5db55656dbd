use std::path::{Path, PathBuf};

use locsync_core::{QuotingPolicy, ReconcileConfig, StatusMarkers};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "locsync.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocSyncConfig {
    pub primary_language_code: Option<String>,
    pub files: Option<FilesCfg>,
    pub csv: Option<CsvCfg>,
    pub status: Option<StatusCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesCfg {
    pub primary_dir: Option<String>,
    pub additional_dirs: Option<Vec<String>>,
    pub include_subdirectories: Option<bool>,
    pub filename_prefix: Option<String>,
    pub filename_suffix: Option<String>,
    pub primary_extension: Option<String>,
    pub allowed_extensions: Option<Vec<String>>,
    pub create_backup: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CsvCfg {
    pub author_metadata_key: Option<String>,
    pub author_placeholder: Option<String>,
    pub quoting_policy: Option<QuotingPolicy>,
    pub preserve_deprecated_lines: Option<bool>,
    pub warn_on_long_key: Option<usize>,
    pub warn_on_quote_fail: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusCfg {
    pub new: Option<String>,
    pub modified_prefix: Option<String>,
    pub modified_suffix: Option<String>,
    pub deprecated: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Read one config file. A missing file is an error here; [`load_config`]
/// decides which files are optional.
pub fn load_config_file(path: &Path) -> Result<LocSyncConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<LocSyncConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Layered config. Search order: `explicit` (must exist), CWD/locsync.toml,
/// $CONFIG_DIR/locsync/locsync.toml. Earlier sources win field by field.
pub fn load_config(explicit: Option<&Path>) -> Result<LocSyncConfig, ConfigError> {
    let mut merged = LocSyncConfig::default();
    if let Some(p) = explicit {
        merged = merge(merged, load_config_file(p)?);
    }
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(CONFIG_FILE));
    }
    if let Some(base) = dirs::config_dir() {
        candidates.push(base.join("locsync").join(CONFIG_FILE));
    }
    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match load_config_file(&path) {
            Ok(cfg) => {
                tracing::debug!(event = "config_loaded", path = %path.display());
                merged = merge(merged, cfg);
            }
            Err(e) => tracing::warn!(event = "config_ignored", error = %e),
        }
    }
    Ok(merged.normalized())
}

pub fn merge(mut a: LocSyncConfig, b: LocSyncConfig) -> LocSyncConfig {
    if a.primary_language_code.is_none() {
        a.primary_language_code = b.primary_language_code;
    }
    a.files = merge_opt(a.files, b.files, merge_files);
    a.csv = merge_opt(a.csv, b.csv, merge_csv);
    a.status = merge_opt(a.status, b.status, merge_status);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_files(mut a: FilesCfg, b: FilesCfg) -> FilesCfg {
    if a.primary_dir.is_none() {
        a.primary_dir = b.primary_dir;
    }
    if a.additional_dirs.is_none() {
        a.additional_dirs = b.additional_dirs;
    }
    if a.include_subdirectories.is_none() {
        a.include_subdirectories = b.include_subdirectories;
    }
    if a.filename_prefix.is_none() {
        a.filename_prefix = b.filename_prefix;
    }
    if a.filename_suffix.is_none() {
        a.filename_suffix = b.filename_suffix;
    }
    if a.primary_extension.is_none() {
        a.primary_extension = b.primary_extension;
    }
    if a.allowed_extensions.is_none() {
        a.allowed_extensions = b.allowed_extensions;
    }
    if a.create_backup.is_none() {
        a.create_backup = b.create_backup;
    }
    a
}
fn merge_csv(mut a: CsvCfg, b: CsvCfg) -> CsvCfg {
    if a.author_metadata_key.is_none() {
        a.author_metadata_key = b.author_metadata_key;
    }
    if a.author_placeholder.is_none() {
        a.author_placeholder = b.author_placeholder;
    }
    if a.quoting_policy.is_none() {
        a.quoting_policy = b.quoting_policy;
    }
    if a.preserve_deprecated_lines.is_none() {
        a.preserve_deprecated_lines = b.preserve_deprecated_lines;
    }
    if a.warn_on_long_key.is_none() {
        a.warn_on_long_key = b.warn_on_long_key;
    }
    if a.warn_on_quote_fail.is_none() {
        a.warn_on_quote_fail = b.warn_on_quote_fail;
    }
    a
}
fn merge_status(mut a: StatusCfg, b: StatusCfg) -> StatusCfg {
    if a.new.is_none() {
        a.new = b.new;
    }
    if a.modified_prefix.is_none() {
        a.modified_prefix = b.modified_prefix;
    }
    if a.modified_suffix.is_none() {
        a.modified_suffix = b.modified_suffix;
    }
    if a.deprecated.is_none() {
        a.deprecated = b.deprecated;
    }
    a
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

fn trim_dir(dir: String) -> Option<String> {
    let trimmed = dir.trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl LocSyncConfig {
    /// Drop values that would break the file format: empty extension, empty
    /// primary code, empty status markers. Directories lose trailing slashes;
    /// absolute paths stay absolute.
    pub fn normalized(mut self) -> Self {
        self.primary_language_code = non_empty(self.primary_language_code);
        if let Some(files) = self.files.as_mut() {
            files.primary_extension = non_empty(files.primary_extension.take());
            files.primary_dir = files.primary_dir.take().and_then(trim_dir);
            files.additional_dirs = files
                .additional_dirs
                .take()
                .map(|dirs| dirs.into_iter().filter_map(trim_dir).collect());
        }
        if let Some(status) = self.status.as_mut() {
            status.new = non_empty(status.new.take());
            status.modified_prefix = non_empty(status.modified_prefix.take());
            status.deprecated = non_empty(status.deprecated.take());
        }
        self
    }

    pub fn primary_language_code(&self) -> String {
        self.primary_language_code
            .clone()
            .unwrap_or_else(|| "en".to_string())
    }

    pub fn primary_dir(&self) -> PathBuf {
        PathBuf::from(
            self.files
                .as_ref()
                .and_then(|f| f.primary_dir.clone())
                .unwrap_or_else(|| "Localization".to_string()),
        )
    }

    /// Primary directory followed by the additional ones.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.primary_dir()];
        if let Some(extra) = self.files.as_ref().and_then(|f| f.additional_dirs.as_ref()) {
            dirs.extend(extra.iter().map(PathBuf::from));
        }
        dirs
    }

    pub fn include_subdirectories(&self) -> bool {
        self.files
            .as_ref()
            .and_then(|f| f.include_subdirectories)
            .unwrap_or(true)
    }

    pub fn create_backup(&self) -> bool {
        self.files
            .as_ref()
            .and_then(|f| f.create_backup)
            .unwrap_or(true)
    }

    pub fn warn_on_long_key(&self) -> usize {
        self.csv
            .as_ref()
            .and_then(|c| c.warn_on_long_key)
            .unwrap_or(100)
    }

    pub fn warn_on_quote_fail(&self) -> bool {
        self.csv
            .as_ref()
            .and_then(|c| c.warn_on_quote_fail)
            .unwrap_or(true)
    }

    /// Prefix, suffix, primary extension and other allowed extensions.
    pub fn naming_parts(&self) -> (String, String, String, Vec<String>) {
        let files = self.files.clone().unwrap_or_default();
        (
            files.filename_prefix.unwrap_or_else(|| "loc_".to_string()),
            files.filename_suffix.unwrap_or_default(),
            files.primary_extension.unwrap_or_else(|| "csv".to_string()),
            files
                .allowed_extensions
                .unwrap_or_else(|| vec!["txt".to_string()]),
        )
    }

    pub fn to_reconcile_config(&self) -> ReconcileConfig {
        let defaults = ReconcileConfig::default();
        let csv = self.csv.clone().unwrap_or_default();
        let status = self.status.clone().unwrap_or_default();
        ReconcileConfig {
            primary_language_code: self.primary_language_code(),
            markers: StatusMarkers {
                new: status.new.unwrap_or(defaults.markers.new),
                modified_prefix: status
                    .modified_prefix
                    .unwrap_or(defaults.markers.modified_prefix),
                modified_suffix: status
                    .modified_suffix
                    .unwrap_or(defaults.markers.modified_suffix),
                deprecated: status.deprecated.unwrap_or(defaults.markers.deprecated),
            },
            preserve_deprecated_lines: csv
                .preserve_deprecated_lines
                .unwrap_or(defaults.preserve_deprecated_lines),
            quoting_policy: csv.quoting_policy.unwrap_or(defaults.quoting_policy),
            author_metadata_key: csv
                .author_metadata_key
                .unwrap_or(defaults.author_metadata_key),
            author_placeholder: csv
                .author_placeholder
                .unwrap_or(defaults.author_placeholder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_source_wins_per_field() {
        let a: LocSyncConfig = toml::from_str(
            r#"
            [files]
            filename_prefix = "lang_"
            "#,
        )
        .expect("toml");
        let b: LocSyncConfig = toml::from_str(
            r#"
            primary_language_code = "fr"
            [files]
            filename_prefix = "loc_"
            primary_extension = "txt"
            "#,
        )
        .expect("toml");
        let m = merge(a, b);
        assert_eq!(m.primary_language_code(), "fr");
        let (prefix, _, ext, _) = m.naming_parts();
        assert_eq!(prefix, "lang_");
        assert_eq!(ext, "txt");
    }

    #[test]
    fn reconcile_config_from_toml() {
        let cfg: LocSyncConfig = toml::from_str(
            r#"
            [csv]
            quoting_policy = "only-when-needed"
            preserve_deprecated_lines = true
            author_metadata_key = "_LocMeta_Author"
            [status]
            new = "NEW"
            "#,
        )
        .expect("toml");
        let rc = cfg.to_reconcile_config();
        assert_eq!(rc.quoting_policy, QuotingPolicy::OnlyWhenNeeded);
        assert!(rc.preserve_deprecated_lines);
        assert_eq!(rc.author_metadata_key, "_LocMeta_Author");
        assert_eq!(rc.markers.new, "NEW");
        assert_eq!(rc.markers.deprecated, "Deprecated Entry");
        assert_eq!(rc.primary_language_code, "en");
    }

    #[test]
    fn normalization_repairs_empty_values() {
        let cfg: LocSyncConfig = toml::from_str(
            r#"
            primary_language_code = ""
            [files]
            primary_dir = "Localization/"
            primary_extension = ""
            [status]
            deprecated = ""
            "#,
        )
        .expect("toml");
        let cfg = cfg.normalized();
        assert_eq!(cfg.primary_language_code(), "en");
        assert_eq!(cfg.primary_dir(), PathBuf::from("Localization"));
        assert_eq!(cfg.naming_parts().2, "csv");
        assert_eq!(cfg.to_reconcile_config().markers.deprecated, "Deprecated Entry");
    }

    #[test]
    fn absolute_dirs_stay_absolute() {
        let cfg: LocSyncConfig = toml::from_str(
            r#"
            [files]
            primary_dir = "/srv/game/Localization/"
            additional_dirs = ["/srv/game/DLC/", "Mods//", ""]
            "#,
        )
        .expect("toml");
        let cfg = cfg.normalized();
        assert_eq!(cfg.primary_dir(), PathBuf::from("/srv/game/Localization"));
        assert_eq!(
            cfg.search_dirs(),
            vec![
                PathBuf::from("/srv/game/Localization"),
                PathBuf::from("/srv/game/DLC"),
                PathBuf::from("Mods"),
            ]
        );
    }

    #[test]
    fn explicit_file_must_exist_and_parse() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "primary_language_code = [").expect("write");
        assert!(matches!(load_config(Some(&bad)), Err(ConfigError::Parse { .. })));

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "primary_language_code = \"de\"\n").expect("write");
        let cfg = load_config(Some(&good)).expect("config");
        assert_eq!(cfg.primary_language_code(), "de");
    }
}
