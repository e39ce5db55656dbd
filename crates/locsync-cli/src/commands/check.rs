use std::path::Path;

use color_eyre::eyre::Result;
use locsync_domain::{ValidationMsg, SCHEMA_VERSION};
use locsync_validate::{validate_table, ValidateOptions};

use crate::context::Context;

pub fn run_check(ctx: &Context, file: &Path, format: &str) -> Result<()> {
    let table = locsync_services::load_table(file, &ctx.reconcile)?;
    let options = ValidateOptions {
        warn_on_long_key: ctx.config.warn_on_long_key(),
        warn_on_quote_fail: ctx.config.warn_on_quote_fail(),
    };
    let msgs = validate_table(&table, &options)?;

    if format == "json" {
        let items: Vec<ValidationMsg> = msgs
            .iter()
            .map(|m| ValidationMsg {
                schema_version: SCHEMA_VERSION,
                kind: m.kind.clone(),
                key: m.key.clone(),
                path: file.display().to_string(),
                line: Some(m.line),
                message: m.message.clone(),
            })
            .collect();
        serde_json::to_writer(std::io::stdout().lock(), &items)?;
        println!();
        return Ok(());
    }

    if msgs.is_empty() {
        println!("✔ {}: no issues found ({} entries)", file.display(), table.len());
        return Ok(());
    }
    for m in msgs {
        if !ctx.use_color {
            println!("[{}] {} ({}:{}) — {}", m.kind, m.key, file.display(), m.line, m.message);
        } else {
            use owo_colors::OwoColorize;
            let tag = match m.kind.as_str() {
                "duplicate" => "⚠",
                "empty" => "✖",
                "quote-suspect" => "ℹ",
                _ => "•",
            };
            let colored_kind = match m.kind.as_str() {
                "duplicate" => m.kind.yellow().to_string(),
                "empty" => m.kind.red().to_string(),
                "quote-suspect" => m.kind.cyan().to_string(),
                _ => m.kind.white().to_string(),
            };
            println!(
                "{} [{}] {} ({}:{}) — {}",
                tag,
                colored_kind,
                m.key.green(),
                file.display().blue(),
                m.line.to_string().magenta(),
                m.message
            );
        }
    }
    Ok(())
}
