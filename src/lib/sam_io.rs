//! SAM text I/O utilities.
//!
//! Opens buffered line readers and writers over files or the standard streams, and derives the
//! default output path for a given input.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Buffer size for SAM readers and writers.
const BUFFER_SIZE: usize = 128 * 1024;

/// Suffix that replaces `.sam` in the default output path.
pub const DEDUP_SUFFIX: &str = "_dedup.sam";

/// Extension recognised on SAM inputs.
pub const SAM_EXTENSION: &str = ".sam";

/// Returns true if the path refers to standard input (`-` or `/dev/stdin`).
#[must_use]
pub fn is_stdin_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdin"
}

/// Returns true if the path refers to standard output (`-` or `/dev/stdout`).
#[must_use]
pub fn is_stdout_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdout"
}

/// Opens a buffered reader over a SAM file, or standard input for `-` and `/dev/stdin`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_sam_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    if is_stdin_path(path) {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, io::stdin())));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input SAM: {}", path.display()))?;
    Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
}

/// Creates a buffered writer over a new SAM file, or standard output for `-` and `/dev/stdout`.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn create_sam_writer<P: AsRef<Path>>(path: P) -> Result<Box<dyn Write>> {
    let path = path.as_ref();
    if is_stdout_path(path) {
        return Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, io::stdout())));
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output SAM: {}", path.display()))?;
    Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, file)))
}

/// Default output path for an input: a trailing `.sam` becomes `_dedup.sam`, any other name
/// gets `_dedup.sam` appended.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use umidedup_lib::sam_io::default_output_path;
///
/// assert_eq!(default_output_path("data/reads.sam"), PathBuf::from("data/reads_dedup.sam"));
/// assert_eq!(default_output_path("reads.txt"), PathBuf::from("reads.txt_dedup.sam"));
/// ```
#[must_use]
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref().to_string_lossy();
    let stem = input.strip_suffix(SAM_EXTENSION).unwrap_or(&input);
    PathBuf::from(format!("{stem}{DEDUP_SUFFIX}"))
}
