//! End-to-end CLI tests for the dedup command.
//!
//! These tests run the actual `umidedup dedup` binary and validate:
//! 1. Duplicate removal with a whitelist
//! 2. The default output path
//! 3. Metrics output
//! 4. Rejection of paired-end mode and missing whitelists

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use crate::helpers::{
    SamLineBuilder, assert_headers_preserved, assert_unique_keys, duplicate_group, read_names,
    sam_header, write_sam, write_whitelist,
};

struct Inputs {
    dir: TempDir,
    sam: PathBuf,
    umis: PathBuf,
}

impl Inputs {
    fn new(records: &[String]) -> Self {
        let dir = TempDir::new().unwrap();
        let sam = dir.path().join("input.sam");
        let umis = dir.path().join("umis.txt");
        write_sam(&sam, &sam_header(&["chr1", "chr2"]), records);
        write_whitelist(&umis, &["AACGCCAT", "AAGGTACG", "ACACAGAG"]);
        Self { dir, sam, umis }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn run_dedup(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_umidedup"))
        .arg("dedup")
        .args(args)
        .output()
        .expect("Failed to run dedup command")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_dedup_command_removes_duplicates() {
    let mut records = duplicate_group("dup1", "AACGCCAT", 100, 3);
    records.extend(duplicate_group("dup2", "AAGGTACG", 100, 2));
    records.push(SamLineBuilder::new().name("other").umi("AACGCCAT").position(500).build());
    let inputs = Inputs::new(&records);
    let output = inputs.path("output.sam");

    let result = run_dedup(&[
        "--input",
        path_str(&inputs.sam),
        "--output",
        path_str(&output),
        "--umis",
        path_str(&inputs.umis),
    ]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let input_text = fs::read_to_string(&inputs.sam).unwrap();
    let output_text = fs::read_to_string(&output).unwrap();
    assert_headers_preserved(&input_text, &output_text);
    assert_unique_keys(&output_text);
    assert_eq!(
        read_names(&output_text),
        vec!["dup1_0:AACGCCAT", "dup2_0:AAGGTACG", "other:AACGCCAT"]
    );
}

#[test]
fn test_dedup_command_default_output_path() {
    let inputs = Inputs::new(&duplicate_group("dup", "AACGCCAT", 100, 2));

    let result = run_dedup(&["--input", path_str(&inputs.sam), "--umis", path_str(&inputs.umis)]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let output_text = fs::read_to_string(inputs.path("input_dedup.sam")).unwrap();
    assert_eq!(read_names(&output_text), vec!["dup_0:AACGCCAT"]);
}

#[test]
fn test_dedup_command_soft_clip_correction() {
    let records = vec![
        SamLineBuilder::new().name("plain").umi("ACACAGAG").position(95).cigar("8M").build(),
        SamLineBuilder::new().name("clipped").umi("ACACAGAG").position(100).cigar("5S3M").build(),
    ];
    let inputs = Inputs::new(&records);
    let output = inputs.path("output.sam");

    let result = run_dedup(&[
        "-i",
        path_str(&inputs.sam),
        "-o",
        path_str(&output),
        "-u",
        path_str(&inputs.umis),
    ]);
    assert!(result.status.success());

    let output_text = fs::read_to_string(&output).unwrap();
    assert_eq!(read_names(&output_text), vec!["plain:ACACAGAG"]);
}

#[test]
fn test_dedup_command_with_metrics() {
    let mut records = duplicate_group("dup", "AACGCCAT", 100, 3);
    records.push(SamLineBuilder::new().name("bad").umi("NNNNNNNN").position(200).build());
    let inputs = Inputs::new(&records);
    let output = inputs.path("output.sam");
    let metrics = inputs.path("metrics.tsv");

    let result = run_dedup(&[
        "--input",
        path_str(&inputs.sam),
        "--output",
        path_str(&output),
        "--umis",
        path_str(&inputs.umis),
        "--metrics",
        path_str(&metrics),
    ]);
    assert!(result.status.success());

    let content = fs::read_to_string(&metrics).unwrap();
    let mut lines = content.lines();
    let header: Vec<&str> = lines.next().unwrap().split('\t').collect();
    let row: Vec<&str> = lines.next().unwrap().split('\t').collect();
    let value = |column: &str| row[header.iter().position(|h| *h == column).unwrap()];

    assert_eq!(value("total_records"), "4");
    assert_eq!(value("header_lines"), "3");
    assert_eq!(value("invalid_umi"), "1");
    assert_eq!(value("duplicates"), "2");
    assert_eq!(value("retained"), "1");
}

#[test]
fn test_dedup_command_gap_gate_can_be_disabled() {
    // Second record starts inside the first one's template length
    let records = vec![
        SamLineBuilder::new().name("a").umi("AACGCCAT").position(100).template_length(50).build(),
        SamLineBuilder::new().name("b").umi("AAGGTACG").position(120).template_length(50).build(),
    ];
    let inputs = Inputs::new(&records);
    let gated = inputs.path("gated.sam");
    let ungated = inputs.path("ungated.sam");

    let sam = path_str(&inputs.sam);
    let umis = path_str(&inputs.umis);
    assert!(run_dedup(&["-i", sam, "-o", path_str(&gated), "-u", umis]).status.success());
    assert!(
        run_dedup(&["-i", sam, "-o", path_str(&ungated), "-u", umis, "--gap-gate", "false"])
            .status
            .success()
    );

    assert_eq!(read_names(&fs::read_to_string(&gated).unwrap()), vec!["a:AACGCCAT"]);
    assert_eq!(
        read_names(&fs::read_to_string(&ungated).unwrap()),
        vec!["a:AACGCCAT", "b:AAGGTACG"]
    );
}

#[test]
fn test_dedup_command_paired_is_rejected() {
    let inputs = Inputs::new(&duplicate_group("dup", "AACGCCAT", 100, 2));
    let output = inputs.path("output.sam");

    let result = run_dedup(&[
        "--input",
        path_str(&inputs.sam),
        "--output",
        path_str(&output),
        "--umis",
        path_str(&inputs.umis),
        "--paired",
    ]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("paired-end"));
    assert!(!output.exists(), "No output should be written for paired-end mode");
}

#[test]
fn test_dedup_command_missing_whitelist() {
    let inputs = Inputs::new(&duplicate_group("dup", "AACGCCAT", 100, 2));
    let output = inputs.path("output.sam");

    let result = run_dedup(&[
        "--input",
        path_str(&inputs.sam),
        "--output",
        path_str(&output),
        "--umis",
        path_str(&inputs.path("missing_umis.txt")),
    ]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("whitelist"));
    assert!(!output.exists());
}

#[test]
fn test_dedup_command_requires_whitelist_or_accept_all() {
    let inputs = Inputs::new(&duplicate_group("dup", "GGGGGGGG", 100, 2));
    let output = inputs.path("output.sam");

    let result = run_dedup(&["--input", path_str(&inputs.sam), "--output", path_str(&output)]);
    assert!(!result.status.success());

    let result = run_dedup(&[
        "--input",
        path_str(&inputs.sam),
        "--output",
        path_str(&output),
        "--accept-all-umis",
    ]);
    assert!(result.status.success());
    assert_eq!(read_names(&fs::read_to_string(&output).unwrap()), vec!["dup_0:GGGGGGGG"]);
}
