//! The set of known UMIs and membership validation.

use std::path::Path;

use ahash::AHashSet;
use log::info;

use crate::errors::{DedupError, Result};

/// Immutable set of known UMI sequences.
///
/// Matching is exact and case-sensitive; no mismatches are tolerated.
#[derive(Debug, Clone, Default)]
pub struct UmiWhitelist {
    umis: AHashSet<String>,
}

impl UmiWhitelist {
    /// Loads a whitelist from a file of whitespace-delimited UMIs.
    ///
    /// UMIs may be given one per line or several per line; blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::WhitelistUnavailable`] if the file does not exist, cannot be read,
    /// or contains no UMIs.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |reason: String| DedupError::WhitelistUnavailable {
            path: path.display().to_string(),
            reason,
        };

        if !path.exists() {
            return Err(unavailable("File does not exist".to_string()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;

        let whitelist = Self::from_text(&content);
        if whitelist.is_empty() {
            return Err(unavailable("File contains no UMIs".to_string()));
        }

        info!("Loaded {} UMIs from {}", whitelist.len(), path.display());
        Ok(whitelist)
    }

    /// Builds a whitelist from whitespace-delimited text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        text.split_whitespace().collect()
    }

    /// Returns true if `umi` is in the whitelist.
    #[must_use]
    pub fn contains(&self, umi: &str) -> bool {
        self.umis.contains(umi)
    }

    /// Number of distinct UMIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.umis.len()
    }

    /// True if the whitelist holds no UMIs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.umis.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for UmiWhitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { umis: iter.into_iter().map(Into::into).collect() }
    }
}

/// Decides whether an extracted UMI is acceptable.
#[derive(Debug, Clone)]
pub enum UmiValidator {
    /// Only UMIs present in the whitelist pass.
    Whitelist(UmiWhitelist),
    /// Every UMI passes. Must be requested explicitly; there is no implicit fallback.
    AcceptAll,
}

impl UmiValidator {
    /// Returns true if `umi` passes validation.
    #[must_use]
    pub fn is_valid(&self, umi: &str) -> bool {
        match self {
            UmiValidator::Whitelist(whitelist) => whitelist.contains(umi),
            UmiValidator::AcceptAll => true,
        }
    }
}

impl From<UmiWhitelist> for UmiValidator {
    fn from(whitelist: UmiWhitelist) -> Self {
        UmiValidator::Whitelist(whitelist)
    }
}
