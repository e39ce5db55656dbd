use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use locsync_core::{LocSyncError, Result};

pub fn is_read_only(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.permissions().readonly())
        .unwrap_or(false)
}

/// Write `bytes` through a sibling temp file and rename it over `path`, so
/// readers never see a half-written table.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string());
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let write = || -> std::io::Result<()> {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
        fs::rename(&tmp, path)
    };
    write().map_err(|e| {
        let _ = fs::remove_file(&tmp);
        color_eyre::eyre::Report::from(LocSyncError::FileWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })
}

/// Copy `path` to `<file name>.bak` next to it.
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".bak");
    let bak = path.with_file_name(name);
    fs::copy(path, &bak)?;
    Ok(bak)
}
