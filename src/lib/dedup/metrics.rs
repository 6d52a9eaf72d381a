//! Counters collected during deduplication and their TSV output.

use std::path::Path;

use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use serde::{Deserialize, Serialize};

/// Metrics collected during deduplication.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DedupMetrics {
    /// Header lines passed through
    pub header_lines: u64,
    /// Alignment records read
    pub total_records: u64,
    /// Records dropped because their UMI failed validation
    pub invalid_umi: u64,
    /// Records dropped because their key was already retained
    pub duplicates: u64,
    /// Records with a new key that the gap gate refused
    pub gap_gate_rejections: u64,
    /// Records retained in the output
    pub retained: u64,
    /// Retained records mapped to the reverse strand
    pub reverse_strand_retained: u64,
}

impl DedupMetrics {
    /// Records whose UMI passed validation.
    #[must_use]
    pub fn valid_records(&self) -> u64 {
        self.total_records - self.invalid_umi
    }

    /// Fraction of valid records dropped as same-key duplicates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duplicate_rate(&self) -> f64 {
        let valid = self.valid_records();
        if valid == 0 { 0.0 } else { self.duplicates as f64 / valid as f64 }
    }
}

/// Serializable version of `DedupMetrics` for file output.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DedupMetricsOutput {
    total_records: u64,
    header_lines: u64,
    invalid_umi: u64,
    duplicates: u64,
    gap_gate_rejections: u64,
    retained: u64,
    reverse_strand_retained: u64,
    duplicate_rate: f64,
}

impl From<&DedupMetrics> for DedupMetricsOutput {
    fn from(m: &DedupMetrics) -> Self {
        Self {
            total_records: m.total_records,
            header_lines: m.header_lines,
            invalid_umi: m.invalid_umi,
            duplicates: m.duplicates,
            gap_gate_rejections: m.gap_gate_rejections,
            retained: m.retained,
            reverse_strand_retained: m.reverse_strand_retained,
            duplicate_rate: m.duplicate_rate(),
        }
    }
}

/// Writes `metrics` as a single-row TSV with a header line.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_dedup_metrics<P: AsRef<Path>>(path: P, metrics: &DedupMetrics) -> Result<()> {
    let path_ref = path.as_ref();
    let rows = [DedupMetricsOutput::from(metrics)];
    DelimFile::default()
        .write_tsv(&path_ref, &rows)
        .with_context(|| format!("Failed to write dedup metrics: {}", path_ref.display()))
}
