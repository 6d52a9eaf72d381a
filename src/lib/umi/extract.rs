//! Extraction of the UMI from a read name.
//!
//! UMI extraction tools append the UMI to the read name as an extra colon-delimited segment,
//! but not every tool puts it in the same place. [`UmiSegment`] names the supported
//! conventions; callers must pick one.

use std::fmt;

/// Separator between read-name segments.
pub const UMI_SEPARATOR: char = ':';

/// Which colon-delimited segment of the read name holds the UMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UmiSegment {
    /// The last segment, as in Illumina names with the UMI appended
    /// (`NS500451:154:HWKTMBGXX:1:11101:24260:1121:CTGTTCAC`).
    #[default]
    Last,

    /// The second segment, for names of the form `<prefix>:<UMI>:...`
    /// (`READ1:CTGTTCAC:chr1:100`).
    Second,
}

impl fmt::Display for UmiSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UmiSegment::Last => write!(f, "last"),
            UmiSegment::Second => write!(f, "second"),
        }
    }
}

/// Returns the UMI segment of `read_name`, or `None` if the name has no such segment.
///
/// # Examples
///
/// ```
/// use umidedup_lib::umi::{UmiSegment, extract_umi};
///
/// assert_eq!(extract_umi("A:B:C:AACCTT", UmiSegment::Last), Some("AACCTT"));
/// assert_eq!(extract_umi("READ1:AACCTT:x", UmiSegment::Second), Some("AACCTT"));
/// assert_eq!(extract_umi("noumi", UmiSegment::Second), None);
/// ```
#[must_use]
pub fn extract_umi(read_name: &str, segment: UmiSegment) -> Option<&str> {
    match segment {
        UmiSegment::Last => read_name.rsplit(UMI_SEPARATOR).next(),
        UmiSegment::Second => read_name.split(UMI_SEPARATOR).nth(1),
    }
}
