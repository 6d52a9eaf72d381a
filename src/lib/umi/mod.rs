//! UMI (Unique Molecular Identifier) utilities
//!
//! - [`extract`] - pulling the UMI out of a read name according to a naming convention
//! - [`whitelist`] - the set of known UMIs and the validator built on top of it

pub mod extract;
pub mod whitelist;

pub use extract::{UMI_SEPARATOR, UmiSegment, extract_umi};
pub use whitelist::{UmiValidator, UmiWhitelist};
