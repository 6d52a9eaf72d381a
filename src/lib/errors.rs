//! Custom error types for umidedup operations.

use thiserror::Error;

/// Result type alias for umidedup operations
pub type Result<T> = std::result::Result<T, DedupError>;

/// Error type for umidedup operations
#[derive(Error, Debug)]
pub enum DedupError {
    /// A mode the deduplicator does not implement was requested (e.g. paired-end input)
    #[error("Unsupported mode: {reason}")]
    UnsupportedMode {
        /// Explanation of what was requested
        reason: String,
    },

    /// An alignment line could not be parsed
    #[error("Malformed record at line {line_number}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the input stream (0 when unknown)
        line_number: u64,
        /// Explanation of the problem
        reason: String,
    },

    /// The UMI whitelist could not be loaded
    #[error("UMI whitelist '{path}' is unavailable: {reason}")]
    WhitelistUnavailable {
        /// Path to the whitelist file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "SAM", "whitelist")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Underlying I/O failure while reading or writing a stream
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DedupError {
    /// Builds a [`DedupError::MalformedRecord`] with an unknown line number.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord { line_number: 0, reason: reason.into() }
    }

    /// Attaches a line number to a [`DedupError::MalformedRecord`]; other variants are unchanged.
    #[must_use]
    pub fn at_line(self, line: u64) -> Self {
        match self {
            Self::MalformedRecord { reason, .. } => {
                Self::MalformedRecord { line_number: line, reason }
            }
            other => other,
        }
    }
}
