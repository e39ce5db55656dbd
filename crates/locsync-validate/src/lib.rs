use locsync_core::Result;
use locsync_services::Table;
use regex::Regex;

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    pub key: String,
    /// 1-based row in the file; the header is row 1.
    pub line: usize,
    /// Machine-readable kind: "duplicate" | "long-key" | "empty" | "quote-suspect"
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    /// Keys longer than this are reported; 0 turns the check off.
    pub warn_on_long_key: usize,
    pub warn_on_quote_fail: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            warn_on_long_key: 100,
            warn_on_quote_fail: true,
        }
    }
}

fn line_of(index: usize) -> usize {
    index + 2
}

/// Run all checks over a parsed table.
pub fn validate_table(table: &Table, options: &ValidateOptions) -> Result<Vec<ValidationMessage>> {
    let mut messages = Vec::new();

    // --- duplicates ---
    for dup in table.duplicates() {
        messages.push(ValidationMessage {
            key: dup.key.clone(),
            line: line_of(dup.index),
            kind: "duplicate".into(),
            message: format!("already defined on line {}", line_of(dup.first_index)),
        });
    }

    // A translation swallowing the next row usually means an unbalanced quote.
    let runaway = Regex::new(r"[\r\n][A-Za-z0-9]+_[A-Za-z0-9_]+,")?;

    for (i, entry) in table.entries().iter().enumerate() {
        if entry.is_blank_line {
            continue;
        }
        if options.warn_on_long_key > 0 && entry.key.chars().count() > options.warn_on_long_key {
            messages.push(ValidationMessage {
                key: entry.key.clone(),
                line: line_of(i),
                kind: "long-key".into(),
                message: format!(
                    "key is {} characters long (limit {})",
                    entry.key.chars().count(),
                    options.warn_on_long_key
                ),
            });
        }
        if entry.translation.trim().is_empty() {
            messages.push(ValidationMessage {
                key: entry.key.clone(),
                line: line_of(i),
                kind: "empty".into(),
                message: "translation is empty".into(),
            });
        }
        if options.warn_on_quote_fail && runaway.is_match(&entry.translation) {
            messages.push(ValidationMessage {
                key: entry.key.clone(),
                line: line_of(i),
                kind: "quote-suspect".into(),
                message: "possible runaway quotation mark".into(),
            });
        }
    }

    messages.sort_by_key(|m| m.line);
    Ok(messages)
}
