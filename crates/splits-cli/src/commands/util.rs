//! Shared utilities for CLI commands.

use std::path::{Path, PathBuf};

use crate::Config;

/// Resolve a run argument to a file path.
///
/// Tries, in order:
/// - the argument as given
/// - the argument inside the configured runs directory
/// - the same with the run extension appended
///
/// Falls back to the argument as given so loading reports the real path.
pub fn resolve_run(config: &Config, run: &Path) -> PathBuf {
    let in_dir = config.runs_dir.join(run);
    let with_extension = in_dir.with_extension(&config.extension);

    [run.to_path_buf(), in_dir, with_extension]
        .into_iter()
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| run.to_path_buf())
}
