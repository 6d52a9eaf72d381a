//! Common CLI options shared across commands.
//!
//! Argument structures here are composed into command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use umidedup_lib::sam_io::{default_output_path, is_stdin_path};
use umidedup_lib::validation::{validate_distinct_paths, validate_file_exists};

/// Input/output options for commands that read a SAM and write a SAM.
#[derive(Debug, Clone, Args)]
pub struct SamIoOptions {
    /// Input SAM file, sorted by leftmost position (`-` for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output SAM file (`-` for stdout) [default: input with `.sam` replaced by `_dedup.sam`]
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

impl SamIoOptions {
    /// Validates that the input file exists (skipped for stdin paths) and that the output
    /// would not overwrite it.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not exist or equals the output path.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_stdin_path(&self.input) {
            validate_file_exists(&self.input, "Input SAM")?;
            validate_distinct_paths(&self.input, self.output_path())?;
        }
        Ok(())
    }

    /// The output path, falling back to the default derived from the input.
    ///
    /// Reading from stdin without an explicit output writes to stdout.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None if is_stdin_path(&self.input) => PathBuf::from("-"),
            None => default_output_path(&self.input),
        }
    }
}
