//! Reader and writer for the table dialect.
//!
//! Close to RFC 4180 but not the same: empty lines are rows of their own,
//! empty fields are never quoted and the key column is only quoted when it
//! has to be. Output must re-parse to the same bytes.

use locsync_core::{Entry, EntryStatus, QuotingPolicy, ReconcileConfig};

use crate::status::encode_status;

pub const HEADER: &str = "Key,SourceString,Comment,Primary,Status";
pub const LINE_END: &str = "\r\n";

/// Split `text` into rows of unescaped fields.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    // anything consumed since the last line break
    let mut row_started = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
                row_started = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                at_field_start = true;
                row_started = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                at_field_start = true;
                row_started = false;
            }
            _ => {
                field.push(c);
                at_field_start = false;
                row_started = true;
            }
        }
    }

    if row_started || in_quotes {
        row.push(field);
        rows.push(row);
    }
    rows
}

/// Double every quote character. Nothing else is touched.
pub fn escape(s: &str) -> String {
    s.replace('"', "\"\"")
}

/// Inverse of [`escape`].
pub fn unescape(s: &str) -> String {
    s.replace("\"\"", "\"")
}

fn needs_quotes(s: &str) -> bool {
    s.contains(|c: char| matches!(c, '"' | ',' | '\r' | '\n'))
}

/// Wrap an already escaped field in quotes. Empty fields stay bare.
pub fn wrap(s: &str, force: bool) -> String {
    if !s.is_empty() && (force || needs_quotes(s)) {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

/// Render entries as a full table file, header included.
pub fn serialize(entries: &[Entry], config: &ReconcileConfig) -> String {
    let force = config.quoting_policy == QuotingPolicy::ForceQuoted;

    let mut out = String::with_capacity(64 * (entries.len() + 1));
    out.push_str(HEADER);
    out.push_str(LINE_END);

    for entry in entries {
        if entry.status == EntryStatus::Deprecated && !config.preserve_deprecated_lines {
            continue;
        }
        if entry.is_blank_line {
            out.push_str(LINE_END);
            continue;
        }
        let status = encode_status(entry, &config.markers);
        out.push_str(&wrap(&escape(&entry.key), false));
        for value in [
            &entry.translation,
            &entry.comment,
            &entry.source_snapshot,
            &status,
        ] {
            out.push(',');
            out.push_str(&wrap(&escape(value), force));
        }
        out.push_str(LINE_END);
    }
    out
}
