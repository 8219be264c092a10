use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading or validating the pin table.
///
/// All of these are fatal at startup: a table that fails validation is never
/// partially loaded, because a silently dropped rule could misroute traffic.
pub enum PinError {
    /// Pattern did not compile under case-insensitive matching.
    #[error("pin pattern '{pattern}' does not compile: {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compile error detail.
        message: String,
    },

    /// Pattern uses engine-specific inline-flag syntax.
    #[error("pin pattern '{pattern}' uses inline-flag syntax; only '(?:' groups are portable")]
    InlineFlags {
        /// The offending pattern.
        pattern: String,
    },

    /// Pattern exceeds the length bound.
    #[error("pin pattern '{pattern}' is {length} chars, max is {max}")]
    PatternTooLong {
        /// The offending pattern.
        pattern: String,
        /// Observed length in characters.
        length: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Table file could not be read.
    #[error("failed to read pin table '{path}': {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Table file is not valid JSON of the expected shape.
    #[error("failed to parse pin table '{path}': {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}
