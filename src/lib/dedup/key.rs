//! The key that identifies a group of PCR duplicates.

use std::fmt;

/// Identity of a duplicate group: reads sharing all three components are copies of one
/// molecule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    /// Validated UMI.
    pub umi: String,
    /// Leftmost position after soft-clip correction (may be zero or negative).
    pub corrected_position: i64,
    /// Reference sequence name.
    pub chromosome: String,
}

impl DuplicateKey {
    /// Builds a key from its components.
    #[must_use]
    pub fn new(umi: &str, corrected_position: i64, chromosome: &str) -> Self {
        Self { umi: umi.to_string(), corrected_position, chromosome: chromosome.to_string() }
    }
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.chromosome, self.corrected_position, self.umi)
    }
}
