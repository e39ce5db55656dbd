//! High-level orchestration layer over the table codec.
//! Exposes the functions used by the CLI: reconcile, stats, discovery and
//! batch updates.

pub mod discover;
pub mod reconcile;
pub mod stats;
pub mod table;
pub mod update;
pub mod util;

pub use discover::{
    discover_table_files, filename_for_language_code, language_code_from_path,
    primary_table_path, Naming,
};
pub use locsync_core::{Entry, EntryStatus, ReconcileConfig, Result};
pub use reconcile::{reconcile, reconcile_with_report, ReconcileReport};
pub use stats::{collect_stats, localization_stats, stats_for_file, LocStats};
pub use table::{DuplicateKey, Table};
pub use update::{
    create_language_table, load_primary, load_table, update_translation_file,
    update_translations, UpdateOptions,
};
