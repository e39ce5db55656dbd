use std::path::PathBuf;

use color_eyre::eyre::Result;
use locsync_services::{primary_table_path, update_translations, UpdateOptions};

use crate::context::Context;

pub fn run_update(
    ctx: &Context,
    root: Vec<PathBuf>,
    primary_dir: Option<PathBuf>,
    lang: Option<String>,
    dry_run: bool,
    no_backup: bool,
    format: &str,
) -> Result<()> {
    let mut reconcile = ctx.reconcile.clone();
    if let Some(code) = lang {
        reconcile.primary_language_code = code;
    }
    let primary_dir = primary_dir
        .or_else(|| root.first().cloned())
        .unwrap_or_else(|| ctx.config.primary_dir());
    let primary_path = primary_table_path(&primary_dir, &reconcile.primary_language_code, &ctx.naming);

    let files = ctx.discover(root);
    tracing::info!(event = "update_files_found", count = files.len(), primary = %primary_path.display());

    let options = UpdateOptions {
        dry_run,
        create_backup: ctx.config.create_backup() && !no_backup,
    };
    let summary = update_translations(&primary_path, &files, &reconcile, &ctx.naming, options)?;

    if format == "json" {
        serde_json::to_writer(std::io::stdout().lock(), &summary)?;
        println!();
        return Ok(());
    }

    for f in &summary.files {
        let detail = match &f.message {
            Some(msg) => msg.clone(),
            None => format!(
                "+{} new, ~{} modified, -{} deprecated",
                f.added.len(),
                f.modified.len(),
                f.deprecated.len()
            ),
        };
        if ctx.use_color {
            use owo_colors::OwoColorize;
            let status = match f.status.as_str() {
                "updated" | "planned" => f.status.green().to_string(),
                "skipped" => f.status.red().to_string(),
                _ => f.status.dimmed().to_string(),
            };
            println!("[{}] {} {} — {}", status, f.language.cyan(), f.path.blue(), detail);
        } else {
            println!("[{}] {} {} — {}", f.status, f.language, f.path, detail);
        }
    }
    let verb = if dry_run { "would update" } else { "updated" };
    println!(
        "✔ {} {} file(s), {} unchanged, {} skipped",
        verb, summary.updated, summary.unchanged, summary.skipped
    );
    Ok(())
}
