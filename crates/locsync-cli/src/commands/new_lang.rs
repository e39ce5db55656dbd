use std::path::PathBuf;

use color_eyre::eyre::Result;
use locsync_services::{create_language_table, primary_table_path};

use crate::context::Context;

pub fn run_new_lang(ctx: &Context, code: &str, primary_dir: Option<PathBuf>) -> Result<()> {
    let dir = primary_dir.unwrap_or_else(|| ctx.config.primary_dir());
    let primary = primary_table_path(&dir, &ctx.reconcile.primary_language_code, &ctx.naming);
    let path = create_language_table(&primary, code, &ctx.reconcile, &ctx.naming)?;
    println!("✔ created {}", path.display());
    Ok(())
}
