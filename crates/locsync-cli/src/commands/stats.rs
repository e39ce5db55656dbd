use std::path::PathBuf;

use color_eyre::eyre::Result;
use locsync_domain::StatsReport;

use crate::context::Context;

fn print_text(report: &StatsReport, use_color: bool) {
    for f in &report.files {
        if let Some(err) = &f.error {
            if use_color {
                use owo_colors::OwoColorize;
                println!("{} {} — {}", f.language.cyan(), f.path.blue(), err.red());
            } else {
                println!("{} {} — {}", f.language, f.path, err);
            }
            continue;
        }
        let line = format!(
            "{:>5.1}% done, {} ok / {} new / {} modified / {} deprecated (total {})",
            f.percent_complete, f.none, f.new, f.modified, f.deprecated, f.total
        );
        if use_color {
            use owo_colors::OwoColorize;
            println!("{} {} — {}", f.language.cyan(), f.path.blue(), line);
        } else {
            println!("{} {} — {}", f.language, f.path, line);
        }
    }
}

pub fn run_stats(ctx: &Context, root: Vec<PathBuf>, format: &str, out: Option<PathBuf>) -> Result<()> {
    let files = ctx.discover(root);
    let report = locsync_services::collect_stats(&files, &ctx.reconcile, &ctx.naming);

    match (format, out) {
        ("json", Some(path)) => {
            let file = std::fs::File::create(&path)?;
            serde_json::to_writer_pretty(file, &report)?;
            println!("✔ stats saved to {}", path.display());
        }
        ("json", None) => {
            serde_json::to_writer(std::io::stdout().lock(), &report)?;
            println!();
        }
        ("csv", Some(path)) => {
            let file = std::fs::File::create(&path)?;
            locsync_export_csv::write_stats_csv(file, &report)?;
            println!("✔ stats saved to {}", path.display());
        }
        ("csv", None) => {
            locsync_export_csv::write_stats_csv(std::io::stdout().lock(), &report)?;
        }
        (_, Some(path)) => {
            return Err(color_eyre::eyre::eyre!(
                "--out {} needs --format json or csv",
                path.display()
            ));
        }
        (_, None) => print_text(&report, ctx.use_color),
    }
    Ok(())
}
