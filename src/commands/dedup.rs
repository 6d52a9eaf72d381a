//! UMI-aware duplicate removal command.
//!
//! Removes PCR duplicates from single-end SAM text sorted by leftmost position. The UMI is read
//! from the read name, and reads sharing a UMI, a soft-clip corrected start and a chromosome
//! are collapsed to the first one seen.
//!
//! # Output
//!
//! Header lines are written first in their original order, followed by the retained records in
//! the order their keys were first seen.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use log::{info, warn};

use umidedup_lib::dedup::{DedupConfig, run_dedup, write_dedup_metrics};
use umidedup_lib::external_sort::{DEFAULT_SAMTOOLS, SamtoolsSort};
use umidedup_lib::logging::{OperationTimer, log_dedup_summary};
use umidedup_lib::sam_io::{create_sam_writer, is_stdin_path, is_stdout_path, open_sam_reader};
use umidedup_lib::umi::{UmiSegment, UmiValidator, UmiWhitelist};
use umidedup_lib::validation::validate_single_end;

use crate::commands::command::Command;
use crate::commands::common::SamIoOptions;

/// UMI-aware duplicate removal command.
#[derive(Debug, Parser)]
#[command(
    name = "dedup",
    about = "\x1b[38;5;151m[DEDUP]\x1b[0m         \x1b[36mRemove PCR duplicates using UMIs in read names\x1b[0m",
    long_about = r#"
Removes PCR duplicates from a single-end SAM file using the UMI embedded in each read name.

Two reads are duplicates when they have the same UMI, the same chromosome, and the same start
position after correcting for a leading soft clip (POS minus the length of a leading `<n>S`
CIGAR operation). Only the first read of each group is kept. Reads whose UMI is not in the
whitelist are discarded.

# Input Requirements

- Single-end alignments (paired-end input is rejected)
- Sorted by leftmost position, e.g. `samtools sort`, or pass `--sort` to run it first
- UMI as the last colon-delimited field of the read name, e.g. `NS500451:154:...:1103:AACGCCAT`

# Output

Header lines first, in their original order, then the retained records. Without `--output`
the output is written next to the input with `.sam` replaced by `_dedup.sam`.
"#
)]
pub struct Dedup {
    /// Input and output SAM files
    #[command(flatten)]
    pub io: SamIoOptions,

    /// File of known UMIs, separated by whitespace
    #[arg(short = 'u', long = "umis", required_unless_present = "accept_all_umis")]
    pub umis: Option<PathBuf>,

    /// Accept every UMI instead of validating against a whitelist
    #[arg(long = "accept-all-umis", default_value = "false", conflicts_with = "umis")]
    pub accept_all_umis: bool,

    /// Input is paired-end (not supported; the command exits with an error)
    #[arg(short = 'p', long = "paired", default_value = "false")]
    pub paired: bool,

    /// Which colon-delimited field of the read name holds the UMI
    #[arg(long = "umi-segment", value_enum, default_value_t = UmiSegment::Last)]
    pub umi_segment: UmiSegment,

    /// Only admit a new key when its corrected position is at least the previous record's
    /// corrected position plus its template length
    #[arg(long = "gap-gate", action = ArgAction::Set, default_value = "true")]
    pub gap_gate: bool,

    /// Path to write deduplication metrics
    #[arg(short = 'm', long = "metrics")]
    pub metrics: Option<PathBuf>,

    /// Sort the input with `samtools sort` before deduplicating
    #[arg(long = "sort", default_value = "false")]
    pub sort: bool,

    /// samtools executable used by --sort
    #[arg(long = "samtools", default_value = DEFAULT_SAMTOOLS)]
    pub samtools: PathBuf,
}

impl Dedup {
    /// Builds the UMI validator, loading the whitelist if one was given.
    fn build_validator(&self) -> Result<UmiValidator> {
        match (&self.umis, self.accept_all_umis) {
            (Some(_), true) => bail!("--umis and --accept-all-umis are mutually exclusive"),
            (Some(path), false) => Ok(UmiWhitelist::from_path(path)?.into()),
            (None, true) => {
                warn!("Accepting all UMIs; no whitelist validation will be performed");
                Ok(UmiValidator::AcceptAll)
            }
            (None, false) => bail!(
                "A UMI whitelist is required (--umis); pass --accept-all-umis to skip validation"
            ),
        }
    }

    fn config(&self) -> DedupConfig {
        DedupConfig { umi_segment: self.umi_segment, gap_gate: self.gap_gate }
    }

    /// Returns the path to deduplicate, sorting the input first if requested.
    fn prepare_input(&self) -> Result<PathBuf> {
        if !self.sort {
            return Ok(self.io.input.clone());
        }
        if is_stdin_path(&self.io.input) {
            bail!("--sort cannot be used when reading from stdin");
        }
        SamtoolsSort::new(&self.samtools)
            .sort(&self.io.input)
            .with_context(|| format!("Failed to sort {}", self.io.input.display()))
    }
}

/// Removes a partially written output file, logging rather than failing if that is impossible.
fn remove_partial_output(output: &Path) {
    if is_stdout_path(output) || !output.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_file(output) {
        warn!("Failed to remove partial output {}: {e}", output.display());
    }
}

impl Command for Dedup {
    fn execute(&self, command_line: &str) -> Result<()> {
        validate_single_end(self.paired)?;
        self.io.validate()?;

        let output = self.io.output_path();
        let validator = self.build_validator()?;

        let timer = OperationTimer::new("Removing duplicates");

        info!("Command line: {command_line}");
        info!("Input: {}", self.io.input.display());
        info!("Output: {}", output.display());
        match &self.umis {
            Some(umis) => info!("UMI whitelist: {}", umis.display()),
            None => info!("UMI whitelist: none (accepting all UMIs)"),
        }
        info!("UMI segment: {}", self.umi_segment);
        info!("Gap gate: {}", self.gap_gate);

        let input = self.prepare_input()?;
        let reader = open_sam_reader(&input)?;
        let writer = create_sam_writer(&output)?;

        let metrics = match run_dedup(reader, writer, self.config(), validator) {
            Ok(metrics) => metrics,
            Err(e) => {
                remove_partial_output(&output);
                return Err(e)
                    .with_context(|| format!("Failed to deduplicate {}", input.display()));
            }
        };

        if let Some(metrics_path) = &self.metrics {
            write_dedup_metrics(metrics_path, &metrics)?;
            info!("Wrote metrics to {}", metrics_path.display());
        }

        log_dedup_summary(&metrics);
        timer.log_completion(metrics.total_records);
        Ok(())
    }
}
