//! CIGAR string parsing and leftmost-position correction.
//!
//! Aligners report the position of the first *aligned* base. Bases soft-clipped at the start of
//! the read are still part of the molecule, so two PCR copies of one molecule can report
//! different positions when only one of them was clipped. Subtracting the leading soft clip
//! recovers the position the read would have started at without clipping.
//!
//! Only a soft clip that is the very first operation counts. Trailing clips never move the
//! leftmost position, and a leading hard clip (`5H3S...`) disables the correction entirely.

use noodles::sam::alignment::record::cigar::op::Kind;

use super::record::AlignmentRecord;

/// Placeholder CIGAR used when no alignment is available.
pub const UNAVAILABLE_CIGAR: &str = "*";

/// Iterator over the `(Kind, length)` operations of a textual CIGAR string.
///
/// Iteration stops at the first token that is not `<length><operator>` with a known operator,
/// so a malformed prefix yields no operations at all.
pub struct CigarOps<'a> {
    remaining: &'a str,
}

impl<'a> CigarOps<'a> {
    /// Creates an iterator over the operations of `cigar`.
    #[must_use]
    pub fn new(cigar: &'a str) -> Self {
        let remaining = if cigar == UNAVAILABLE_CIGAR { "" } else { cigar };
        Self { remaining }
    }
}

impl Iterator for CigarOps<'_> {
    type Item = (Kind, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let digits = self.remaining.bytes().take_while(u8::is_ascii_digit).count();
        let (num_str, rest) = self.remaining.split_at(digits);
        let mut chars = rest.chars();
        let op = chars.next();
        self.remaining = chars.as_str();

        let parsed = num_str.parse::<usize>().ok().zip(op.and_then(op_kind));
        if parsed.is_none() {
            self.remaining = "";
        }
        parsed.map(|(len, kind)| (kind, len))
    }
}

fn op_kind(op: char) -> Option<Kind> {
    match op {
        'M' => Some(Kind::Match),
        'I' => Some(Kind::Insertion),
        'D' => Some(Kind::Deletion),
        'N' => Some(Kind::Skip),
        'S' => Some(Kind::SoftClip),
        'H' => Some(Kind::HardClip),
        'P' => Some(Kind::Pad),
        '=' => Some(Kind::SequenceMatch),
        'X' => Some(Kind::SequenceMismatch),
        _ => None,
    }
}

/// Parses a CIGAR string into a vector of `(Kind, length)` operations.
#[must_use]
pub fn parse_cigar_string(cigar: &str) -> Vec<(Kind, usize)> {
    CigarOps::new(cigar).collect()
}

/// Number of bases soft-clipped at the start of the alignment.
///
/// Returns 0 when the first operation is anything other than a soft clip, and for the
/// unavailable placeholder `*`.
///
/// # Examples
///
/// ```
/// use umidedup_lib::sam::cigar::leading_soft_clip;
///
/// assert_eq!(leading_soft_clip("5S95M"), 5);
/// assert_eq!(leading_soft_clip("95M5S"), 0);
/// assert_eq!(leading_soft_clip("*"), 0);
/// ```
#[must_use]
pub fn leading_soft_clip(cigar: &str) -> usize {
    match CigarOps::new(cigar).next() {
        Some((Kind::SoftClip, len)) => len,
        _ => 0,
    }
}

/// Leftmost mapping position corrected for the leading soft clip.
///
/// The result is not clamped: a large clip next to the reference start yields zero or a
/// negative value, and that value is used as-is in the duplicate key. A clip too large to
/// subtract saturates at `i64::MIN`.
///
/// # Examples
///
/// ```
/// use umidedup_lib::sam::cigar::corrected_position;
///
/// assert_eq!(corrected_position(100, "5S95M"), 95);
/// assert_eq!(corrected_position(50, "100M"), 50);
/// assert_eq!(corrected_position(3, "10S90M"), -7);
/// ```
#[must_use]
pub fn corrected_position(position: i64, cigar: &str) -> i64 {
    i64::try_from(leading_soft_clip(cigar)).map_or(i64::MIN, |clip| position.saturating_sub(clip))
}

/// Corrected leftmost position of a parsed record.
#[must_use]
pub fn corrected_record_position(record: &AlignmentRecord) -> i64 {
    corrected_position(record.position(), record.cigar())
}
