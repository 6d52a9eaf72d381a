//! Progress logging at regular record intervals.

use log::info;

/// Counts processed items and logs a message each time the count crosses a multiple of the
/// interval.
///
/// # Example
/// ```
/// use umidedup_lib::progress::ProgressTracker;
///
/// let mut tracker = ProgressTracker::new("Processed records").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // Logs at 100, 200
/// }
/// tracker.log_final(); // Logs "Processed records 250 (complete)"
/// assert_eq!(tracker.count(), 250);
/// ```
#[derive(Debug)]
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: u64,
}

impl ProgressTracker {
    /// Creates a tracker with a count of 0 and an interval of 10,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 10_000, message: message.into(), count: 0 }
    }

    /// Sets the logging interval. An interval of 0 is treated as 1.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Adds `additional` to the count and logs every interval boundary crossed.
    ///
    /// Returns true if the new count lies exactly on an interval boundary.
    pub fn log_if_needed(&mut self, additional: u64) -> bool {
        let prev = self.count;
        self.count += additional;

        for i in (prev / self.interval + 1)..=(self.count / self.interval) {
            info!("{} {}", self.message, i * self.interval);
        }

        self.count > 0 && self.count.is_multiple_of(self.interval)
    }

    /// Logs the final count unless the last boundary message already reported it.
    pub fn log_final(&mut self) {
        if !self.log_if_needed(0) && self.count > 0 {
            info!("{} {} (complete)", self.message, self.count);
        }
    }

    /// Items counted so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}
