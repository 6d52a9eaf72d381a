//! Input validation utilities
//!
//! Checks on command-line parameters and file paths with consistent error messages, built on
//! the structured error types in [`crate::errors`].

use std::path::Path;

use crate::errors::{DedupError, Result};

/// Validate that a file exists
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use umidedup_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.sam", "Input file");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(DedupError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that the output path would not overwrite the input
///
/// Paths are compared as given; symbolic links are not resolved.
///
/// # Errors
/// Returns an error if both paths are identical
///
/// # Example
/// ```
/// use umidedup_lib::validation::validate_distinct_paths;
///
/// validate_distinct_paths("in.sam", "in_dedup.sam").unwrap();
/// assert!(validate_distinct_paths("in.sam", "in.sam").is_err());
/// ```
pub fn validate_distinct_paths<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    if input.as_ref() == output.as_ref() {
        return Err(DedupError::InvalidParameter {
            parameter: "output".to_string(),
            reason: format!(
                "output path must differ from the input path: {}",
                input.as_ref().display()
            ),
        });
    }
    Ok(())
}

/// Reject paired-end processing
///
/// Only single-end reads are supported, so this is called before any input is touched.
///
/// # Errors
/// Returns [`DedupError::UnsupportedMode`] if `paired` is true
pub fn validate_single_end(paired: bool) -> Result<()> {
    if paired {
        return Err(DedupError::UnsupportedMode {
            reason: "paired-end deduplication is not implemented; only single-end alignments \
                     are supported"
                .to_string(),
        });
    }
    Ok(())
}
