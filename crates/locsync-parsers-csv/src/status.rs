use locsync_core::{Entry, EntryStatus, StatusMarkers};

/// Status column text for `entry`.
pub fn encode_status(entry: &Entry, markers: &StatusMarkers) -> String {
    match entry.status {
        EntryStatus::None => String::new(),
        EntryStatus::New => markers.new.clone(),
        EntryStatus::Modified => format!(
            "{}{}{}",
            markers.modified_prefix, entry.previous_source_snapshot, markers.modified_suffix
        ),
        EntryStatus::Deprecated => markers.deprecated.clone(),
    }
}

/// Decode a status column into the status and, for `Modified`, the previous
/// source snapshot.
///
/// Checked in a fixed order: deprecated, modified, new. The previous snapshot
/// is cut out by length (prefix chars from the left, suffix chars from the
/// right); the suffix text itself is not matched. Empty markers never match.
pub fn decode_status(text: &str, markers: &StatusMarkers) -> (EntryStatus, String) {
    let starts = |marker: &str| !marker.is_empty() && text.starts_with(marker);

    if starts(&markers.deprecated) {
        (EntryStatus::Deprecated, String::new())
    } else if starts(&markers.modified_prefix) {
        let prefix_len = markers.modified_prefix.chars().count();
        let suffix_len = markers.modified_suffix.chars().count();
        let rest: Vec<char> = text.chars().skip(prefix_len).collect();
        let keep = rest.len().saturating_sub(suffix_len);
        (EntryStatus::Modified, rest[..keep].iter().collect())
    } else if starts(&markers.new) {
        (EntryStatus::New, String::new())
    } else {
        (EntryStatus::None, String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> StatusMarkers {
        StatusMarkers::default()
    }

    #[test]
    fn encodes_each_status() {
        let m = markers();
        let mut e = Entry::new("K", "t", "");
        assert_eq!(encode_status(&e, &m), "");
        e.status = EntryStatus::New;
        assert_eq!(encode_status(&e, &m), "New Entry");
        e.status = EntryStatus::Deprecated;
        assert_eq!(encode_status(&e, &m), "Deprecated Entry");
        e.status = EntryStatus::Modified;
        e.previous_source_snapshot = "Hello".into();
        assert_eq!(encode_status(&e, &m), "Modified Entry: was 'Hello'");
    }

    #[test]
    fn decodes_each_status() {
        let m = markers();
        assert_eq!(decode_status("", &m), (EntryStatus::None, String::new()));
        assert_eq!(decode_status("New Entry", &m), (EntryStatus::New, String::new()));
        assert_eq!(
            decode_status("Deprecated Entry", &m),
            (EntryStatus::Deprecated, String::new())
        );
        assert_eq!(
            decode_status("Modified Entry: was 'Hello'", &m),
            (EntryStatus::Modified, "Hello".to_string())
        );
        assert_eq!(decode_status("something else", &m).0, EntryStatus::None);
    }

    #[test]
    fn suffix_is_stripped_by_length() {
        let m = markers();
        // last char is dropped even though it is not the suffix
        assert_eq!(
            decode_status("Modified Entry: was 'Hello", &m).1,
            "Hell".to_string()
        );
        // snapshot ending in a quote keeps it
        assert_eq!(
            decode_status("Modified Entry: was 'it's''", &m).1,
            "it's'".to_string()
        );
        assert_eq!(decode_status("Modified Entry: was '", &m).1, "");
    }

    #[test]
    fn multibyte_snapshot() {
        let m = markers();
        let mut e = Entry::new("K", "t", "").with_status(EntryStatus::Modified);
        e.previous_source_snapshot = "Привет, мир".into();
        let text = encode_status(&e, &m);
        assert_eq!(decode_status(&text, &m).1, "Привет, мир");
    }

    #[test]
    fn precedence_is_deprecated_modified_new() {
        let m = StatusMarkers {
            new: "X".into(),
            modified_prefix: "X".into(),
            modified_suffix: String::new(),
            deprecated: "X".into(),
        };
        assert_eq!(decode_status("X", &m).0, EntryStatus::Deprecated);

        let m = StatusMarkers {
            new: "Mark".into(),
            modified_prefix: "Mark".into(),
            modified_suffix: String::new(),
            deprecated: "Gone".into(),
        };
        assert_eq!(decode_status("Mark: old", &m), (EntryStatus::Modified, ": old".into()));
    }

    #[test]
    fn empty_markers_never_match() {
        let m = StatusMarkers {
            new: String::new(),
            modified_prefix: String::new(),
            modified_suffix: String::new(),
            deprecated: String::new(),
        };
        assert_eq!(decode_status("anything", &m).0, EntryStatus::None);
    }
}
