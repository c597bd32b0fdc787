//! List command for discovering run files.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use splits_core::discover_runs;

pub fn run<W: Write>(writer: &mut W, dir: &Path, extension: &str) -> Result<()> {
    let runs = discover_runs(dir, extension)
        .with_context(|| format!("failed to list runs in {}", dir.display()))?;

    if runs.is_empty() {
        writeln!(writer, "No runs found in {}.", dir.display())?;
        return Ok(());
    }

    for path in runs {
        if let Some(name) = path.file_name() {
            writeln!(writer, "{}", name.to_string_lossy())?;
        }
    }

    Ok(())
}
