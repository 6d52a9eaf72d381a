//! CLI command implementations for umidedup.
//!
//! - [`dedup`] - Remove PCR duplicates from position-sorted single-end SAM using UMIs

#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args,
    clippy::struct_excessive_bools
)]

pub mod command;
pub mod common;
pub mod dedup;
