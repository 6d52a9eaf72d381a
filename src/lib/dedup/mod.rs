//! UMI-aware removal of PCR duplicates from position-sorted SAM text.
//!
//! - [`key`] - the [`DuplicateKey`] identifying a duplicate group
//! - [`engine`] - the [`DedupEngine`] state machine and its retention policy
//! - [`metrics`] - counters and TSV output
//!
//! [`Deduplicator`] adapts an iterator of input lines into a lazy iterator of output lines:
//! header lines are yielded as soon as they are read, retained records once the input is
//! exhausted. [`run_dedup`] drives it from a reader to a writer.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use umidedup_lib::dedup::{DedupConfig, run_dedup};
//! use umidedup_lib::umi::{UmiValidator, UmiWhitelist};
//!
//! let input = "@HD\tVN:1.6\tSO:coordinate\n\
//!              r1:AACCTT\t0\tchr1\t100\t60\t100M\t*\t0\t50\tA\tI\n\
//!              r2:AACCTT\t0\tchr1\t100\t60\t100M\t*\t0\t50\tA\tI\n";
//! let validator = UmiValidator::from(UmiWhitelist::from_text("AACCTT"));
//! let mut output = Vec::new();
//!
//! let metrics = run_dedup(Cursor::new(input), &mut output, DedupConfig::default(), validator)?;
//! assert_eq!(metrics.retained, 1);
//! assert_eq!(metrics.duplicates, 1);
//! # Ok::<(), umidedup_lib::errors::DedupError>(())
//! ```

pub mod engine;
pub mod key;
pub mod metrics;

use std::io::{BufRead, Write};

use log::warn;

use crate::errors::{DedupError, Result};
use crate::progress::ProgressTracker;
use crate::sam::record::{AlignmentRecord, is_header_line};
use crate::sam::{header_sort_order, is_coordinate_sorted};
use crate::umi::UmiValidator;

pub use engine::{DedupConfig, DedupEngine, Decision, EngineState};
pub use key::DuplicateKey;
pub use metrics::{DedupMetrics, write_dedup_metrics};

/// Lazy iterator of deduplicated output lines.
///
/// Yields header lines in input order as they are encountered, then the retained records in
/// key-insertion order. The first error ends the iteration.
pub struct Deduplicator<I> {
    lines: I,
    engine: DedupEngine,
    line_number: u64,
    flushing: Option<std::vec::IntoIter<AlignmentRecord>>,
    failed: bool,
    progress: ProgressTracker,
}

impl<I> Deduplicator<I>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    /// Wraps `lines` (without line terminators) around `engine`.
    #[must_use]
    pub fn new(lines: I, engine: DedupEngine) -> Self {
        Self {
            lines,
            engine,
            line_number: 0,
            flushing: None,
            failed: false,
            progress: ProgressTracker::new("Processed records").with_interval(1_000_000),
        }
    }

    /// Counters accumulated so far; complete once the iterator returned `None`.
    #[must_use]
    pub fn metrics(&self) -> &DedupMetrics {
        self.engine.metrics()
    }

    /// Handles one input line, returning it if it must be written through immediately.
    fn process_line(&mut self, mut line: String) -> Result<Option<String>> {
        if line.ends_with('\r') {
            line.pop();
        }
        if line.trim().is_empty() {
            return Ok(None);
        }

        if is_header_line(&line) {
            if let Some(sort_order) = header_sort_order(&line) {
                if !is_coordinate_sorted(sort_order) {
                    warn!(
                        "Header declares sort order '{sort_order}'; input must be sorted by \
                         leftmost position or duplicates will be missed"
                    );
                }
            }
            self.engine.record_header();
            return Ok(Some(line));
        }

        let line_number = self.line_number;
        let record = AlignmentRecord::parse(line).map_err(|e| e.at_line(line_number))?;
        self.engine.process_record(record).map_err(|e| e.at_line(line_number))?;
        self.progress.log_if_needed(1);
        Ok(None)
    }

    fn next_flushed(&mut self) -> Option<Result<String>> {
        if self.flushing.is_none() {
            self.progress.log_final();
            self.flushing = Some(self.engine.finish());
        }
        self.flushing.as_mut()?.next().map(|record| Ok(record.into_line()))
    }
}

impl<I> Iterator for Deduplicator<I>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.flushing.is_some() {
            return self.next_flushed();
        }

        while let Some(line) = self.lines.next() {
            self.line_number += 1;
            let outcome = line.map_err(DedupError::from).and_then(|line| self.process_line(line));
            match outcome {
                Ok(Some(header)) => return Some(Ok(header)),
                Ok(None) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }

        self.next_flushed()
    }
}

/// Deduplicates SAM text from `reader` into `writer`.
///
/// Output lines are terminated with `\n`. On error the writer may hold a partial output.
///
/// # Errors
///
/// Returns the first parse, validation or I/O error encountered.
pub fn run_dedup<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    config: DedupConfig,
    validator: UmiValidator,
) -> Result<DedupMetrics> {
    let mut dedup = Deduplicator::new(reader.lines(), DedupEngine::new(config, validator));
    for line in &mut dedup {
        let line = line?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(dedup.metrics().clone())
}
