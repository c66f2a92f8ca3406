//! Date-range scanning
//!
//! Single linear scan for the min/max timestamp of a reading set. The scan
//! does not assume the input is sorted; the segmenter relies on it to derive
//! its absolute gap threshold.

use crate::types::{DateRange, Reading};

/// Scanner for the observed time span of a reading set
pub struct DateRangeScanner;

impl DateRangeScanner {
    /// Find the min/max timestamp over `readings`.
    ///
    /// Returns `None` for an empty set; callers must check before use.
    /// O(n) time, O(1) space.
    pub fn scan(readings: &[Reading]) -> Option<DateRange> {
        let first = readings.first()?;
        let mut min = first.timestamp;
        let mut max = first.timestamp;

        for reading in &readings[1..] {
            if reading.timestamp < min {
                min = reading.timestamp;
            }
            if reading.timestamp > max {
                max = reading.timestamp;
            }
        }

        Some(DateRange { min, max })
    }
}
