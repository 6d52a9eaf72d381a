//! Integration tests for umidedup.
//!
//! These tests exercise end-to-end behaviour through the library entry points and the built
//! binary.

mod helpers;
mod test_dedup_command;
mod test_error_paths;
