#![deny(unsafe_code)]
// Clippy lint configuration for CI
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::items_after_statements,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # umidedup - UMI-aware PCR duplicate removal
//!
//! This library removes PCR duplicates from position-sorted, single-end SAM text. Reads are
//! considered duplicates when they share a UMI (taken from the read name), a soft-clip
//! corrected start position and a chromosome. The first read seen for each key is kept.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`dedup`]** - the deduplication engine, the line iterator driving it, and metrics
//! - **[`sam`]** - SAM text record parsing and CIGAR utilities
//! - **[`umi`]** - UMI extraction from read names and whitelist validation
//!
//! ### Utilities
//!
//! - **[`sam_io`]** - buffered SAM readers and writers over files or standard streams
//! - **[`external_sort`]** - coordinate sorting delegated to `samtools sort`
//! - **[`validation`]** - input validation utilities for parameters and files
//! - **[`progress`]** - progress tracking and logging
//! - **[`logging`]** - log formatting helpers and the run summary
//! - **[`errors`]** - the [`errors::DedupError`] type
//!
//! ## Quick Start
//!
//! ```no_run
//! use umidedup_lib::dedup::{DedupConfig, run_dedup};
//! use umidedup_lib::sam_io::{create_sam_writer, open_sam_reader};
//! use umidedup_lib::umi::{UmiValidator, UmiWhitelist};
//!
//! # fn main() -> anyhow::Result<()> {
//! let whitelist = UmiWhitelist::from_path("umis.txt")?;
//! let reader = open_sam_reader("input.sam")?;
//! let writer = create_sam_writer("input_dedup.sam")?;
//!
//! let metrics = run_dedup(reader, writer, DedupConfig::default(), whitelist.into())?;
//! println!("kept {} of {} records", metrics.retained, metrics.total_records);
//! # Ok(())
//! # }
//! ```
//!
//! ## Input Requirements
//!
//! - Single-end alignments; records flagged as paired are rejected
//! - Sorted by leftmost position (optionally via [`external_sort::SamtoolsSort`])
//! - UMI as the last colon-delimited field of the read name (or the second, see
//!   [`umi::UmiSegment`])

pub mod dedup;
pub mod errors;
pub mod external_sort;
pub mod logging;
pub mod progress;
pub mod sam;
pub mod sam_io;
pub mod umi;
pub mod validation;
