//! Single-pass duplicate removal over position-sorted records.
//!
//! # Retention policy
//!
//! Records are fed in ascending order of their raw leftmost position. For every record whose UMI
//! passes validation a [`DuplicateKey`] is built from the UMI, the soft-clip corrected position
//! and the chromosome. The first record seen for a key is retained; later records with the same
//! key are dropped.
//!
//! # Gap gate
//!
//! After the first record, a record with a new key is only admitted when
//!
//! ```text
//! corrected_position >= previous_corrected_position + previous_template_length
//! ```
//!
//! where "previous" is the first data record (valid UMI or not) or, after that, the last record
//! with a valid UMI, whether or not it was retained. The threshold saturates instead of
//! overflowing. The gate is on by default so output matches existing pipelines. Key uniqueness
//! does not depend on it, and it can be switched off with [`DedupConfig::gap_gate`].
//!
//! The gate relies on sorted input. Unsorted input is not detected and silently changes which
//! records are admitted.

use ahash::AHashMap;
use log::debug;

use crate::errors::{DedupError, Result};
use crate::sam::cigar::corrected_record_position;
use crate::sam::record::AlignmentRecord;
use crate::umi::{UmiSegment, UmiValidator, extract_umi};

use super::key::DuplicateKey;
use super::metrics::DedupMetrics;

/// Behavioural switches of the dedup engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupConfig {
    /// Which read-name segment holds the UMI.
    pub umi_segment: UmiSegment,
    /// Whether the gap gate filters records with new keys.
    pub gap_gate: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self { umi_segment: UmiSegment::Last, gap_gate: true }
    }
}

/// Lifecycle of a [`DedupEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No data record has been seen yet.
    AwaitingFirstRecord,
    /// At least one data record has been seen; the gap gate is active.
    Streaming,
    /// The retention map has been flushed; no more records are accepted.
    Done,
}

/// What happened to a record passed to [`DedupEngine::process_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// First record for its key; it will be written out.
    Retained,
    /// The UMI was missing from the read name or failed validation.
    InvalidUmi,
    /// A record with the same key was already retained.
    Duplicate,
    /// New key, but the gap gate refused it.
    GapGateRejected,
}

/// Corrected position and template length the gap gate measures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PreviousMarkers {
    corrected_position: i64,
    template_length: i64,
}

/// Returns true if a record at `corrected_position` clears the gap after `previous`.
fn gap_gate_admits(corrected_position: i64, previous: PreviousMarkers) -> bool {
    corrected_position >= previous.corrected_position.saturating_add(previous.template_length)
}

/// Retained records keyed by [`DuplicateKey`], in insertion order.
#[derive(Debug, Default)]
struct RetentionMap {
    index: AHashMap<DuplicateKey, usize>,
    records: Vec<AlignmentRecord>,
}

impl RetentionMap {
    fn contains(&self, key: &DuplicateKey) -> bool {
        self.index.contains_key(key)
    }

    fn insert(&mut self, key: DuplicateKey, record: AlignmentRecord) {
        self.index.insert(key, self.records.len());
        self.records.push(record);
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn drain(&mut self) -> std::vec::IntoIter<AlignmentRecord> {
        self.index.clear();
        std::mem::take(&mut self.records).into_iter()
    }
}

/// Streaming duplicate remover for one run.
///
/// Each engine owns its retention map, so independent runs (for example one per chromosome)
/// can use separate engines without sharing state.
#[derive(Debug)]
pub struct DedupEngine {
    config: DedupConfig,
    validator: UmiValidator,
    state: EngineState,
    previous: Option<PreviousMarkers>,
    retained: RetentionMap,
    metrics: DedupMetrics,
}

impl DedupEngine {
    /// Creates an engine in the [`EngineState::AwaitingFirstRecord`] state.
    #[must_use]
    pub fn new(config: DedupConfig, validator: UmiValidator) -> Self {
        Self {
            config,
            validator,
            state: EngineState::AwaitingFirstRecord,
            previous: None,
            retained: RetentionMap::default(),
            metrics: DedupMetrics::default(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn metrics(&self) -> &DedupMetrics {
        &self.metrics
    }

    /// Number of records currently retained.
    #[must_use]
    pub fn retained_count(&self) -> usize {
        self.retained.len()
    }

    /// Counts a header line that was passed through.
    pub fn record_header(&mut self) {
        self.metrics.header_lines += 1;
    }

    /// Applies the retention policy to one record.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::UnsupportedMode`] if the record is part of a paired-end template, or
    /// if the engine has already been finished.
    pub fn process_record(&mut self, record: AlignmentRecord) -> Result<Decision> {
        if self.state == EngineState::Done {
            return Err(DedupError::UnsupportedMode {
                reason: "records cannot be added after the retained records were flushed"
                    .to_string(),
            });
        }
        if record.is_paired() {
            return Err(DedupError::UnsupportedMode {
                reason: format!(
                    "record '{}' is flagged as paired-end; only single-end reads are supported",
                    record.read_name()
                ),
            });
        }

        self.metrics.total_records += 1;

        let current = PreviousMarkers {
            corrected_position: corrected_record_position(&record),
            template_length: record.template_length(),
        };

        let key = match extract_umi(record.read_name(), self.config.umi_segment) {
            Some(umi) if self.validator.is_valid(umi) => {
                DuplicateKey::new(umi, current.corrected_position, record.chromosome())
            }
            _ => {
                self.metrics.invalid_umi += 1;
                // The first data record starts the gap gate even when its UMI is rejected
                if self.state == EngineState::AwaitingFirstRecord {
                    self.previous = Some(current);
                    self.state = EngineState::Streaming;
                }
                return Ok(Decision::InvalidUmi);
            }
        };

        let decision = match self.previous {
            None => Decision::Retained,
            Some(_) if self.retained.contains(&key) => Decision::Duplicate,
            Some(previous)
                if self.config.gap_gate
                    && !gap_gate_admits(current.corrected_position, previous) =>
            {
                debug!("Gap gate rejected {} ({key})", record.read_name());
                Decision::GapGateRejected
            }
            Some(_) => Decision::Retained,
        };

        match decision {
            Decision::Retained => {
                self.metrics.retained += 1;
                if record.is_reverse_strand() {
                    self.metrics.reverse_strand_retained += 1;
                }
                self.retained.insert(key, record);
            }
            Decision::Duplicate => self.metrics.duplicates += 1,
            Decision::GapGateRejected => self.metrics.gap_gate_rejections += 1,
            Decision::InvalidUmi => {}
        }

        self.previous = Some(current);
        self.state = EngineState::Streaming;
        Ok(decision)
    }

    /// Moves to [`EngineState::Done`] and returns the retained records in key-insertion order.
    pub fn finish(&mut self) -> std::vec::IntoIter<AlignmentRecord> {
        self.state = EngineState::Done;
        self.retained.drain()
    }
}
