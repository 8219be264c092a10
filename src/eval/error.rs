use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading the golden set.
pub enum GoldenSetError {
    /// Fixture file could not be read.
    #[error("failed to read golden set '{path}': {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid golden case.
    #[error("invalid golden case at {path}:{line}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}
