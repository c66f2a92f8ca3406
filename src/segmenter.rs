//! Adaptive time-series segmentation
//!
//! Converts a noisy, irregularly sampled pressure series into a small ordered
//! set of representative trend points. The stream is split wherever a
//! statistically unusual time gap occurs, then each segment is replaced by
//! its centroid (rounded mean timestamp, rounded mean value).
//!
//! Two split criteria run side by side:
//! - **absolute**: the gap exceeds the whole span divided by `chunk_count`
//! - **relative**: the gap exceeds the running mean gap times
//!   `grouping_factor` (only once at least two gaps have been observed)
//!
//! The gap history is cleared on every split, so the relative criterion
//! adapts to the local sampling cadence. Note that `chunk_count` only shapes
//! the absolute-threshold denominator; it is not a bucket count. Densely and
//! uniformly sampled data collapses to very few segments (often exactly one)
//! regardless of it. Downstream consumers depend on this behavior.

use crate::range::DateRangeScanner;
use crate::types::{BpField, Reading, TrendPoint};
use chrono::{DateTime, Utc};

/// Divisor applied to the data's total span to derive the absolute gap
/// threshold
pub const DEFAULT_CHUNK_COUNT: i64 = 20;

/// Multiplier applied to the running mean gap for the relative criterion
pub const DEFAULT_GROUPING_FACTOR: i64 = 10;

/// Segmentation tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterConfig {
    pub chunk_count: i64,
    pub grouping_factor: i64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            chunk_count: DEFAULT_CHUNK_COUNT,
            grouping_factor: DEFAULT_GROUPING_FACTOR,
        }
    }
}

/// Accumulator threaded through the segmentation fold.
///
/// Owns the in-progress segment; it never escapes the pass.
#[derive(Debug, Default)]
struct SegmentState {
    /// Consecutive gaps (ms) observed since the last split
    gap_history: Vec<i64>,
    /// `(timestamp_ms, value)` pairs of the segment being accumulated
    current: Vec<(i64, f64)>,
    /// Completed trend points, in time order
    output: Vec<TrendPoint>,
}

impl SegmentState {
    /// Record the gap leading into the next reading and split beforehand if
    /// it is anomalous.
    fn observe_gap(&mut self, gap_ms: i64, absolute_threshold: i64, grouping_factor: i64) {
        self.gap_history.push(gap_ms);
        let mean_gap = round_mean_i64(&self.gap_history);

        if gap_ms > absolute_threshold
            || (self.gap_history.len() > 1 && gap_ms > mean_gap * grouping_factor)
        {
            self.flush();
            self.gap_history.clear();
        }
    }

    fn push(&mut self, ts_ms: i64, value: f64) {
        self.current.push((ts_ms, value));
    }

    /// Replace the current segment with its centroid and emit it.
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }

        let n = self.current.len() as f64;
        let ts_sum: f64 = self.current.iter().map(|(ts, _)| *ts as f64).sum();
        let val_sum: f64 = self.current.iter().map(|(_, val)| val).sum();

        let centroid_ms = (ts_sum / n).round() as i64;
        let centroid_val = (val_sum / n).round() as i64;

        self.output.push(TrendPoint {
            // the mean of in-range instants is itself in range
            timestamp: DateTime::from_timestamp_millis(centroid_ms)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            value: centroid_val,
        });
        self.current.clear();
    }
}

/// Streaming segmenter producing the trend line for one pressure component
#[derive(Debug, Clone, Default)]
pub struct AdaptiveSegmenter {
    config: SegmenterConfig,
}

impl AdaptiveSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Build the trend line for `field` over `readings`.
    ///
    /// The input must be sorted ascending by timestamp (caller contract;
    /// unsorted input yields deterministic but unspecified output). Single
    /// forward pass, one centroid per detected segment; the final segment is
    /// always emitted. Empty input yields an empty line.
    pub fn build_trend_line(&self, readings: &[Reading], field: BpField) -> Vec<TrendPoint> {
        let mut state = SegmentState::default();

        // With fewer than two readings no gap exists; everything lands in
        // one segment.
        if readings.len() < 2 {
            for reading in readings {
                state.push(reading.timestamp.timestamp_millis(), field.project(reading));
            }
            state.flush();
            return state.output;
        }

        let span = match DateRangeScanner::scan(readings) {
            Some(range) => range,
            None => return state.output,
        };
        let span_ms = span.max.timestamp_millis() - span.min.timestamp_millis();
        let absolute_threshold = (span_ms as f64 / self.config.chunk_count as f64).round() as i64;

        let mut last_ts: Option<i64> = None;
        for reading in readings {
            let ts_ms = reading.timestamp.timestamp_millis();
            let value = field.project(reading);

            if let Some(last) = last_ts {
                state.observe_gap(ts_ms - last, absolute_threshold, self.config.grouping_factor);
            }

            state.push(ts_ms, value);
            last_ts = Some(ts_ms);
        }

        state.flush();
        state.output
    }
}

/// Rounded arithmetic mean of an i64 slice (halves away from zero)
fn round_mean_i64(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let sum: f64 = values.iter().map(|v| *v as f64).sum();
    (sum / values.len() as f64).round() as i64
}
