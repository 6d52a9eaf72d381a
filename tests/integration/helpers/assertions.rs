//! Custom assertion helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

/// Splits SAM text into header lines and data lines.
pub fn split_sam(text: &str) -> (Vec<&str>, Vec<&str>) {
    text.lines().filter(|l| !l.is_empty()).partition(|l| l.starts_with('@'))
}

/// Read names (QNAME) of the data lines in `text`, in output order.
pub fn read_names(text: &str) -> Vec<String> {
    let (_, records) = split_sam(text);
    records.iter().map(|l| l.split('\t').next().unwrap_or_default().to_string()).collect()
}

/// Computes the (umi, corrected position, chromosome) key of a data line.
pub fn duplicate_key(line: &str) -> (String, i64, String) {
    let fields: Vec<&str> = line.split('\t').collect();
    let umi = fields[0].rsplit(':').next().unwrap().to_string();
    let position: i64 = fields[3].parse().unwrap();
    let cigar = fields[5];
    let digits: String = cigar.chars().take_while(char::is_ascii_digit).collect();
    let clip = if !digits.is_empty() && cigar[digits.len()..].starts_with('S') {
        digits.parse::<i64>().unwrap()
    } else {
        0
    };
    (umi, position - clip, fields[2].to_string())
}

/// Asserts that no two data lines in `text` share a duplicate key.
///
/// # Panics
///
/// Panics if a key appears more than once.
pub fn assert_unique_keys(text: &str) {
    let (_, records) = split_sam(text);
    let mut seen = HashSet::new();
    for line in records {
        let key = duplicate_key(line);
        assert!(seen.insert(key.clone()), "Duplicate key in output: {key:?}");
    }
}

/// Asserts that `output` starts with exactly the header lines of `input`, in order, and that no
/// header line follows a data line.
///
/// # Panics
///
/// Panics if headers are missing, reordered or interleaved with records.
pub fn assert_headers_preserved(input: &str, output: &str) {
    let (input_headers, _) = split_sam(input);
    let output_lines: Vec<&str> = output.lines().collect();
    assert!(output_lines.len() >= input_headers.len(), "Output is missing header lines");
    assert_eq!(&output_lines[..input_headers.len()], input_headers.as_slice());
    assert!(
        output_lines[input_headers.len()..].iter().all(|l| !l.starts_with('@')),
        "Header line found after data lines"
    );
}
