//! Run resource discovery.

use std::path::{Path, PathBuf};

use crate::error::SplitError;

/// Default extension of run resources.
pub const RUN_EXTENSION: &str = "txt";

/// Lists regular files in `dir` whose extension is `extension`, sorted by
/// file name.
pub fn discover_runs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SplitError> {
    let to_error = |source| SplitError::Discover {
        path: dir.to_path_buf(),
        source,
    };

    let mut runs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(to_error)? {
        let entry = entry.map_err(to_error)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == extension) {
            runs.push(path);
        }
    }

    runs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(dir = %dir.display(), count = runs.len(), "discovered runs");
    Ok(runs)
}
