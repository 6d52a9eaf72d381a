//! Parsed view of a single SAM alignment line.
//!
//! Only the columns the deduplicator looks at are parsed; the original line is kept so that a
//! retained record can be written back byte-for-byte.

use std::str::FromStr;

use noodles::sam::alignment::record::Flags;

use crate::errors::{DedupError, Result};

/// Character that starts every SAM header line.
pub const HEADER_MARKER: char = '@';

/// Minimum number of tab-separated columns in a SAM alignment line.
pub const MIN_FIELDS: usize = 11;

const QNAME: usize = 0;
const FLAG: usize = 1;
const RNAME: usize = 2;
const POS: usize = 3;
const CIGAR: usize = 5;
const TLEN: usize = 8;

/// Returns true if `line` is a SAM header line.
#[must_use]
pub fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_MARKER)
}

/// One alignment line of a SAM file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    line: String,
    read_name: String,
    flags: Flags,
    chromosome: String,
    position: i64,
    cigar: String,
    template_length: i64,
}

impl AlignmentRecord {
    /// Parses a tab-separated alignment line.
    ///
    /// A trailing line terminator (`\n` or `\r\n`) is removed before parsing and is not part of
    /// [`AlignmentRecord::line`].
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::MalformedRecord`] if the line has fewer than [`MIN_FIELDS`] columns,
    /// if the flag column is not a 16-bit integer, or if the position or template length column
    /// is not a 32-bit signed integer.
    pub fn parse(line: impl Into<String>) -> Result<Self> {
        let mut line = line.into();
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MIN_FIELDS {
            return Err(DedupError::malformed(format!(
                "expected at least {MIN_FIELDS} tab-separated fields, found {}",
                fields.len()
            )));
        }

        let flag: u16 = parse_field(fields[FLAG], "FLAG")?;
        let position = i64::from(parse_field::<i32>(fields[POS], "POS")?);
        let template_length = i64::from(parse_field::<i32>(fields[TLEN], "TLEN")?);
        let read_name = fields[QNAME].to_string();
        let chromosome = fields[RNAME].to_string();
        let cigar = fields[CIGAR].to_string();

        Ok(Self {
            line,
            read_name,
            flags: Flags::from(flag),
            chromosome,
            position,
            cigar,
            template_length,
        })
    }

    /// The original line, without its line terminator.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Consumes the record and returns the original line.
    #[must_use]
    pub fn into_line(self) -> String {
        self.line
    }

    /// Query (read) name; one of its colon-delimited segments carries the UMI.
    #[must_use]
    pub fn read_name(&self) -> &str {
        &self.read_name
    }

    /// SAM flags.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Reference sequence name.
    #[must_use]
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// 1-based leftmost mapping position as reported by the aligner.
    #[must_use]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// CIGAR string.
    #[must_use]
    pub fn cigar(&self) -> &str {
        &self.cigar
    }

    /// Signed observed template length.
    #[must_use]
    pub fn template_length(&self) -> i64 {
        self.template_length
    }

    /// True if the read maps to the reverse strand (flag 0x10).
    #[must_use]
    pub fn is_reverse_strand(&self) -> bool {
        self.flags.is_reverse_complemented()
    }

    /// True if the read is one segment of a multi-segment template (flag 0x1).
    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.flags.is_segmented()
    }
}

impl FromStr for AlignmentRecord {
    type Err = DedupError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_field<T: FromStr>(value: &str, name: &str) -> Result<T> {
    value.parse().map_err(|_| {
        DedupError::malformed(format!("{name} is not an integer in the SAM range: '{value}'"))
    })
}
