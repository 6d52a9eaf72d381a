//! Formatting helpers for log output.
//!
//! Used by the dedup command to report timing, throughput and a summary of what was removed.

use std::time::{Duration, Instant};

use crate::dedup::DedupMetrics;

/// Formats a count with thousands separators (e.g. `1,234,567`).
///
/// # Examples
///
/// ```
/// use umidedup_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` decimal places.
///
/// # Examples
///
/// ```
/// use umidedup_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration in human-readable form ("45s", "2m 15s", "1h 30m").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a processing rate, switching to per-minute for slow rates.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} records/s", format_count(rate as u64))
    } else {
        let per_min = count as f64 / (secs / 60.0);
        format!("{per_min:.1} records/min")
    }
}

/// Logs a summary of a finished deduplication run.
pub fn log_dedup_summary(metrics: &DedupMetrics) {
    log::info!("Deduplication Summary:");
    log::info!("  Header lines: {}", format_count(metrics.header_lines));
    log::info!("  Input records: {}", format_count(metrics.total_records));
    log::info!("  Invalid UMI: {}", format_count(metrics.invalid_umi));
    log::info!("  Duplicates removed: {}", format_count(metrics.duplicates));
    if metrics.gap_gate_rejections > 0 {
        log::info!("  Rejected by gap gate: {}", format_count(metrics.gap_gate_rejections));
    }
    log::info!("  Records retained: {}", format_count(metrics.retained));

    if metrics.valid_records() > 0 {
        log::info!("  Duplicate rate: {}", format_percent(metrics.duplicate_rate(), 2));
    }
}

/// Logs the start of an operation and, on completion, its duration and rate.
///
/// ```no_run
/// use umidedup_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Removing duplicates");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with record count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} records in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
