//! Delegated coordinate sorting with `samtools sort`.
//!
//! Deduplication requires input sorted by leftmost position. When the input is not already
//! sorted, [`SamtoolsSort`] shells out to samtools and writes a `_sorted.sam` file next to the
//! input, which is then used as the deduplication input.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use log::info;

/// Default samtools executable, resolved through `PATH`.
pub const DEFAULT_SAMTOOLS: &str = "samtools";

/// Suffix that replaces `.sam` in the sorted output path.
const SORTED_SUFFIX: &str = "_sorted.sam";

/// Path of the sorted copy of `input`: a trailing `.sam` becomes `_sorted.sam`, any other name
/// gets `_sorted.sam` appended.
#[must_use]
pub fn sorted_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref().to_string_lossy();
    let stem = input.strip_suffix(".sam").unwrap_or(&input);
    PathBuf::from(format!("{stem}{SORTED_SUFFIX}"))
}

/// Runs `samtools sort` on SAM files.
#[derive(Debug, Clone)]
pub struct SamtoolsSort {
    executable: PathBuf,
}

impl SamtoolsSort {
    /// Uses `executable` as the samtools binary.
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into() }
    }

    /// Sorts `input` by coordinate into [`sorted_path`]`(input)` and returns that path.
    ///
    /// Temporary files are prefixed with `<input>.sort`.
    ///
    /// # Errors
    ///
    /// Returns an error if samtools cannot be started or exits unsuccessfully.
    pub fn sort<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf> {
        let input = input.as_ref();
        let output = sorted_path(input);
        let mut temp_prefix = input.as_os_str().to_owned();
        temp_prefix.push(".sort");

        info!(
            "Sorting {} into {} with {}",
            input.display(),
            output.display(),
            self.executable.display()
        );

        let result = Command::new(&self.executable)
            .arg("sort")
            .arg("-T")
            .arg(&temp_prefix)
            .arg("-o")
            .arg(&output)
            .arg(input)
            .output()
            .with_context(|| format!("Failed to execute {}", self.executable.display()))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            bail!(
                "samtools sort failed with exit code {:?}. Error: {}",
                result.status.code(),
                stderr.trim()
            );
        }
        Ok(output)
    }
}
