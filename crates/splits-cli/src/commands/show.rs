//! Show command for printing a run's projections.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use splits_core::display::split_rows;
use splits_core::{Run, SplitRow, TimeStyle, format_time};

const TOTAL_LABEL: &str = "Total";

/// JSON output shape.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    name: &'a str,
    subtitle: &'a str,
    total: String,
    splits: Vec<SplitRow>,
}

pub fn run<W: Write>(writer: &mut W, path: &Path, json: bool) -> Result<()> {
    let run = Run::from_path(path)
        .with_context(|| format!("failed to load run {}", path.display()))?;
    let rows = split_rows(&run, false);
    let total = format_time(run.projected_split_time(None), TimeStyle::Full);

    if json {
        let report = RunReport {
            name: run.name(),
            subtitle: run.subtitle(),
            total,
            splits: rows,
        };
        serde_json::to_writer_pretty(&mut *writer, &report).context("failed to serialize run")?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "{}", run.name())?;
    writeln!(writer, "{}", run.subtitle())?;
    writeln!(writer)?;

    let width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .chain(std::iter::once(TOTAL_LABEL.len()))
        .max()
        .unwrap_or_default();

    for row in &rows {
        write_line(writer, &row.name, &row.time, width)?;
    }
    write_line(writer, TOTAL_LABEL, &total, width)?;

    Ok(())
}

fn write_line<W: Write>(writer: &mut W, label: &str, time: &str, width: usize) -> Result<()> {
    let line = format!("{label:<width$}  {time:>7}");
    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}
