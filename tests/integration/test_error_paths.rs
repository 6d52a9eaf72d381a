//! Error path integration tests.
//!
//! These tests verify that error conditions are reported with the right error kind and that
//! processing stops at the first failure.

use std::io::Cursor;

use rstest::rstest;
use umidedup_lib::dedup::{DedupConfig, DedupEngine, Deduplicator, EngineState, run_dedup};
use umidedup_lib::errors::DedupError;
use umidedup_lib::sam::AlignmentRecord;
use umidedup_lib::umi::{UmiValidator, UmiWhitelist};
use umidedup_lib::validation::validate_single_end;

use crate::helpers::SamLineBuilder;

fn accept_all() -> DedupEngine {
    DedupEngine::new(DedupConfig::default(), UmiValidator::AcceptAll)
}

// ==================== Malformed Records ====================

#[rstest]
#[case::too_few_fields("r1:AACC\t0\tchr1\t100\t36\t8M\t*\t0\t0\tACGT")]
#[case::bad_flag("r1:AACC\tzero\tchr1\t100\t36\t8M\t*\t0\t0\tACGT\tEEEE")]
#[case::bad_position("r1:AACC\t0\tchr1\tabc\t36\t8M\t*\t0\t0\tACGT\tEEEE")]
#[case::bad_template_length("r1:AACC\t0\tchr1\t100\t36\t8M\t*\t0\t1.5\tACGT\tEEEE")]
fn test_malformed_records_are_rejected(#[case] line: &str) {
    let err = AlignmentRecord::parse(line).unwrap_err();
    assert!(matches!(err, DedupError::MalformedRecord { .. }), "unexpected error: {err}");
}

#[test]
fn test_malformed_record_aborts_run_with_line_number() {
    let input = format!(
        "@HD\tVN:1.6\n{}\nbroken line\n{}\n",
        SamLineBuilder::new().name("a").position(100).build(),
        SamLineBuilder::new().name("b").position(900).build(),
    );
    let mut output = Vec::new();
    let err =
        run_dedup(Cursor::new(input), &mut output, DedupConfig::default(), UmiValidator::AcceptAll)
            .unwrap_err();

    assert!(matches!(err, DedupError::MalformedRecord { line_number: 3, .. }));
    // Retained records are only flushed at the end, so just the header made it out
    assert_eq!(String::from_utf8(output).unwrap(), "@HD\tVN:1.6\n");
}

// ==================== Unsupported Modes ====================

#[test]
fn test_paired_mode_is_unsupported() {
    let err = validate_single_end(true).unwrap_err();
    assert!(matches!(err, DedupError::UnsupportedMode { .. }));
}

#[test]
fn test_paired_record_is_unsupported() {
    let mut engine = accept_all();
    let record = AlignmentRecord::parse(SamLineBuilder::new().flags(0x1 | 0x40).build()).unwrap();
    let err = engine.process_record(record).unwrap_err();
    assert!(matches!(err, DedupError::UnsupportedMode { .. }));
}

#[test]
fn test_records_after_finish_are_rejected() {
    let mut engine = accept_all();
    let _ = engine.finish();
    assert_eq!(engine.state(), EngineState::Done);

    let record = AlignmentRecord::parse(SamLineBuilder::new().build()).unwrap();
    assert!(matches!(engine.process_record(record), Err(DedupError::UnsupportedMode { .. })));
}

// ==================== Whitelist ====================

#[test]
fn test_missing_whitelist_is_unavailable() {
    let err = UmiWhitelist::from_path("/nonexistent/whitelist.txt").unwrap_err();
    assert!(matches!(err, DedupError::WhitelistUnavailable { .. }));
}

#[test]
fn test_whitespace_only_whitelist_is_unavailable() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "\n  \n\t\n").unwrap();
    let err = UmiWhitelist::from_path(file.path()).unwrap_err();
    assert!(matches!(err, DedupError::WhitelistUnavailable { .. }));
}

// ==================== Iterator Behaviour ====================

#[test]
fn test_deduplicator_stops_after_error() {
    let lines = vec![
        Ok(SamLineBuilder::new().name("a").build()),
        Ok("not\ta\trecord".to_string()),
        Ok(SamLineBuilder::new().name("b").position(500).build()),
    ];
    let mut dedup = Deduplicator::new(lines.into_iter(), accept_all());

    assert!(matches!(dedup.next(), Some(Err(DedupError::MalformedRecord { line_number: 2, .. }))));
    assert!(dedup.next().is_none());
    assert_eq!(dedup.metrics().total_records, 1);
}
