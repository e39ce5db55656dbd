//! Parsing and writing of translation table files.

use std::path::Path;

use locsync_core::{Entry, LocSyncError, Result, StatusMarkers};

pub mod codec;
pub mod status;

pub use codec::{escape, parse_rows, serialize, unescape, wrap, HEADER, LINE_END};
pub use status::{decode_status, encode_status};

/// Check the first two header columns. Returns the complaint for the first bad column.
fn check_header(header: &[String]) -> std::result::Result<(), String> {
    if header.first().map(String::as_str) != Some("Key") {
        tracing::error!(event = "header_invalid", column = 0, "column 0 in header must be 'Key'");
        return Err("column 0 in header must be 'Key'".to_string());
    }
    if header.get(1).map(String::as_str) != Some("SourceString") {
        tracing::error!(event = "header_invalid", column = 1, "column 1 in header must be 'SourceString'");
        return Err("column 1 in header must be 'SourceString'".to_string());
    }
    Ok(())
}

fn row_to_entry(row: Vec<String>, markers: &StatusMarkers) -> Entry {
    if row.len() < 2 || row[0].is_empty() {
        return Entry::blank_line();
    }
    let mut fields = row.into_iter();
    let key = fields.next().unwrap_or_default();
    let translation = fields.next().unwrap_or_default();
    let comment = fields.next().unwrap_or_default();
    let mut entry = Entry::new(key, translation, comment);

    if let (Some(snapshot), Some(status_text)) = (fields.next(), fields.next()) {
        let (status, previous) = decode_status(&status_text, markers);
        entry.source_snapshot = snapshot;
        entry.status = status;
        entry.previous_source_snapshot = previous;
    }
    entry
}

/// Parse table text into entries, header excluded.
///
/// Empty text yields no entries. A bad header fails with
/// [`LocSyncError::InvalidHeader`] before any body row is read.
pub fn parse_table_text(text: &str, markers: &StatusMarkers) -> Result<Vec<Entry>> {
    let mut rows = parse_rows(text).into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    check_header(&header).map_err(|reason| LocSyncError::InvalidHeader {
        path: Default::default(),
        reason,
    })?;
    Ok(rows.map(|row| row_to_entry(row, markers)).collect())
}

/// Read and parse a table file.
pub fn read_table_file(path: &Path, markers: &StatusMarkers) -> Result<Vec<Entry>> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        tracing::error!(event = "table_read_failed", path = %path.display(), error = %source);
        LocSyncError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    })?;
    parse_table_file_text(path, &text, markers)
}

/// Parse text already read from `path`; header errors carry the path.
pub fn parse_table_file_text(path: &Path, text: &str, markers: &StatusMarkers) -> Result<Vec<Entry>> {
    match parse_table_text(text, markers) {
        Ok(entries) => {
            tracing::debug!(event = "table_parsed", path = %path.display(), entries = entries.len());
            Ok(entries)
        }
        Err(err) => match err.downcast::<LocSyncError>() {
            Ok(typed) => Err(typed.at_path(path).into()),
            Err(other) => Err(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locsync_core::EntryStatus;

    const HEAD: &str = "Key,SourceString,Comment,Primary,Status\r\n";

    fn parse(body: &str) -> Vec<Entry> {
        parse_table_text(&format!("{HEAD}{body}"), &StatusMarkers::default()).expect("parse")
    }

    #[test]
    fn simple_row() {
        let entries = parse("Hello_World,Salut world,\r\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "Hello_World");
        assert_eq!(entries[0].translation, "Salut world");
        assert_eq!(entries[0].status, EntryStatus::None);
    }

    #[test]
    fn quoted_keys_and_values() {
        let entries = parse("\"Hello, World\",\"Salut, world\",\r\n");
        assert_eq!(entries[0].key, "Hello, World");
        assert_eq!(entries[0].translation, "Salut, world");
    }

    #[test]
    fn five_columns_with_status() {
        let entries = parse("K,Bonjour,note,Hello,Modified Entry: was 'Hi'\r\n");
        let e = &entries[0];
        assert_eq!(e.comment, "note");
        assert_eq!(e.source_snapshot, "Hello");
        assert_eq!(e.status, EntryStatus::Modified);
        assert_eq!(e.previous_source_snapshot, "Hi");
    }

    #[test]
    fn four_columns_have_no_snapshot() {
        let entries = parse("K,Bonjour,note,Hello\r\n");
        assert_eq!(entries[0].source_snapshot, "");
        assert_eq!(entries[0].status, EntryStatus::None);
    }

    #[test]
    fn short_or_keyless_rows_become_blank_lines() {
        let entries = parse("\r\nlonely\r\n,orphan text\r\nK,v\r\n");
        assert_eq!(entries.len(), 4);
        assert!(entries[0].is_blank_line);
        assert!(entries[1].is_blank_line);
        assert!(entries[2].is_blank_line);
        assert!(!entries[3].is_blank_line);
    }

    #[test]
    fn header_must_start_with_key_and_source_string() {
        let markers = StatusMarkers::default();
        for text in [
            "key,SourceString\r\nA,b\r\n",
            "Key,Source\r\nA,b\r\n",
            "Key\r\nA,b\r\n",
        ] {
            let err = parse_table_text(text, &markers).expect_err("bad header");
            assert!(matches!(
                err.downcast_ref::<LocSyncError>(),
                Some(LocSyncError::InvalidHeader { .. })
            ));
        }
    }

    #[test]
    fn empty_text_has_no_entries() {
        let entries = parse_table_text("", &StatusMarkers::default()).expect("parse");
        assert!(entries.is_empty());
    }

    #[test]
    fn read_file_reports_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("loc_fr.csv");
        std::fs::write(&path, "Nope,SourceString\r\n")?;
        let err = read_table_file(&path, &StatusMarkers::default()).expect_err("bad header");
        match err.downcast_ref::<LocSyncError>() {
            Some(LocSyncError::InvalidHeader { path: p, .. }) => assert_eq!(p, &path),
            other => panic!("unexpected error {other:?}"),
        }

        let missing = dir.path().join("missing.csv");
        let err = read_table_file(&missing, &StatusMarkers::default()).expect_err("missing");
        assert!(matches!(
            err.downcast_ref::<LocSyncError>(),
            Some(LocSyncError::FileRead { .. })
        ));
        Ok(())
    }
}
