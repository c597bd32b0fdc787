//! Error types for the split timer core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::time::TimeError;

/// Errors surfaced by run loading, saving and discovery.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The run resource could not be read.
    #[error("failed to read run {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The run resource could not be written.
    #[error("failed to write run {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A run directory could not be listed.
    #[error("failed to list runs in {}", .path.display())]
    Discover {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A split line carried an unparseable timestamp.
    #[error("invalid timestamp for split {split:?} on line {line}")]
    Timestamp {
        split: String,
        line: usize,
        #[source]
        source: TimeError,
    },

    /// A command needing a run resource was issued before any load.
    #[error("no run loaded")]
    NoRunLoaded,
}
