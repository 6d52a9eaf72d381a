//! SAM text utilities.
//!
//! - [`record`] - parsing of alignment lines into [`AlignmentRecord`]
//! - [`cigar`] - CIGAR parsing and soft-clip position correction
//!
//! Header lines are handled as opaque text except for the `@HD` sort-order tag, which is only
//! inspected to warn about inputs that do not claim coordinate order.

pub mod cigar;
pub mod record;

pub use cigar::{corrected_position, corrected_record_position, leading_soft_clip};
pub use record::{AlignmentRecord, HEADER_MARKER, MIN_FIELDS, is_header_line};

/// Sort order declared by the `SO` tag of an `@HD` header line, if any.
///
/// Returns `None` for other header lines and for `@HD` lines without an `SO` tag.
///
/// # Examples
///
/// ```
/// use umidedup_lib::sam::header_sort_order;
///
/// assert_eq!(header_sort_order("@HD\tVN:1.6\tSO:coordinate"), Some("coordinate"));
/// assert_eq!(header_sort_order("@HD\tVN:1.6"), None);
/// assert_eq!(header_sort_order("@SQ\tSN:chr1\tLN:100"), None);
/// ```
#[must_use]
pub fn header_sort_order(line: &str) -> Option<&str> {
    let mut fields = line.trim_end_matches(['\n', '\r']).split('\t');
    if fields.next()? != "@HD" {
        return None;
    }
    fields.find_map(|field| field.strip_prefix("SO:"))
}

/// Returns true if a header declaring `sort_order` is acceptable input for deduplication.
#[must_use]
pub fn is_coordinate_sorted(sort_order: &str) -> bool {
    sort_order == "coordinate"
}
