use color_eyre::eyre::Result;
use locsync_domain::StatsReport;
use std::io::Write;

/// Write a stats report as plain RFC 4180 CSV, one row per table file.
pub fn write_stats_csv<W: Write>(writer: W, report: &StatsReport) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "path",
        "language",
        "none",
        "new",
        "modified",
        "deprecated",
        "total",
        "percent_complete",
        "error",
    ])?;

    for f in &report.files {
        wtr.write_record([
            f.path.as_str(),
            f.language.as_str(),
            &f.none.to_string(),
            &f.new.to_string(),
            &f.modified.to_string(),
            &f.deprecated.to_string(),
            &f.total.to_string(),
            &format!("{:.1}", f.percent_complete),
            f.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
