//! Pipeline orchestration
//!
//! Public entry points for the engine: the four call-style operations the
//! rendering layer consumes, the display-window filter, and a configurable
//! processor that assembles the full chart payload from a raw reading
//! payload.

use crate::classifier::ClassificationEngine;
use crate::encoder::ChartEncoder;
use crate::error::ComputeError;
use crate::markers::MarkerProjector;
use crate::range::DateRangeScanner;
use crate::schema::ReadingAdapter;
use crate::segmenter::{AdaptiveSegmenter, SegmenterConfig};
use crate::summary::Summarizer;
use crate::types::{
    BpField, BpGoal, ChartPayload, Classification, DateRange, MarkerShape, Reading,
    ReadingSummary, TrendPoint,
};
use chrono::{DateTime, Utc};

/// Find the min/max timestamp of `readings`; `None` when empty.
pub fn scan_date_range(readings: &[Reading]) -> Option<DateRange> {
    DateRangeScanner::scan(readings)
}

/// Build the trend line for one pressure component with default tuning.
///
/// `readings` must be sorted ascending by timestamp.
pub fn build_trend_line(readings: &[Reading], field: BpField) -> Vec<TrendPoint> {
    AdaptiveSegmenter::new().build_trend_line(readings, field)
}

/// Classify a rounded average reading.
pub fn classify(avg_systolic: i64, avg_diastolic: i64) -> Classification {
    ClassificationEngine::classify(avg_systolic, avg_diastolic)
}

/// Project collection sites to marker shapes, in input order.
pub fn project_markers(readings: &[Reading]) -> Vec<MarkerShape> {
    MarkerProjector::project(readings)
}

/// Filter readings to the display window starting at `start` (inclusive).
pub fn truncate_readings(readings: &[Reading], start: DateTime<Utc>) -> Vec<Reading> {
    readings
        .iter()
        .filter(|reading| reading.timestamp >= start)
        .cloned()
        .collect()
}

/// Summarize a reading set: rounded averages plus classification.
pub fn summarize(readings: &[Reading]) -> ReadingSummary {
    Summarizer::summarize(readings)
}

/// Configurable processor assembling full chart payloads.
///
/// Stateless between calls; each invocation recomputes everything from its
/// input, so independent callers can share nothing and still agree.
pub struct ChartProcessor {
    segmenter: AdaptiveSegmenter,
    encoder: ChartEncoder,
}

impl Default for ChartProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartProcessor {
    /// Create a processor with default segmentation tuning
    pub fn new() -> Self {
        Self {
            segmenter: AdaptiveSegmenter::new(),
            encoder: ChartEncoder::new(),
        }
    }

    /// Create a processor with specific segmentation tuning
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self {
            segmenter: AdaptiveSegmenter::with_config(config),
            encoder: ChartEncoder::new(),
        }
    }

    /// Build the chart payload for an already-parsed reading set
    pub fn process(&self, readings: &[Reading], goal: Option<BpGoal>) -> ChartPayload {
        self.encoder.encode(readings, &self.segmenter, goal)
    }

    /// Parse a JSON array of readings and build the chart payload as JSON
    pub fn process_json(&self, raw_json: &str, goal: Option<BpGoal>) -> Result<String, ComputeError> {
        let readings = ReadingAdapter::parse_array(raw_json)?;
        self.encoder.encode_to_json(&readings, &self.segmenter, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BpCategory, Quantity, ReadingSource};
    use pretty_assertions::assert_eq;

    const DAY_MS: i64 = 86_400_000;

    fn reading(ts_ms: i64, systolic: f64, diastolic: f64) -> Reading {
        Reading {
            timestamp: DateTime::from_timestamp_millis(ts_ms).unwrap(),
            systolic: Quantity::new(systolic),
            diastolic: Quantity::new(diastolic),
            source: ReadingSource::Home,
        }
    }

    fn sample_json() -> &'static str {
        r#"[
            {"timestamp": 0, "systolic": {"value": 120}, "diastolic": {"value": 80}, "source": "HOME"},
            {"timestamp": 86400000, "systolic": {"value": 122}, "diastolic": {"value": 78}, "source": "OFFICE"},
            {"timestamp": 172800000, "systolic": {"value": 118}, "diastolic": {"value": 76}, "source": "HOME"}
        ]"#
    }

    #[test]
    fn test_every_reading_lands_in_exactly_one_segment() {
        // Coverage: trend centroids are means over disjoint segments whose
        // union is the whole input. Verified via the weighted mean: the
        // value-weighted average of the centroids over segment sizes must
        // reconstruct the rounded whole-set mean when values are constant.
        let readings: Vec<Reading> = (0..25)
            .map(|i| {
                // three clusters separated by month-long silences
                let cluster = i / 10;
                reading(
                    (cluster as i64) * 30 * DAY_MS + (i % 10) as i64 * DAY_MS / 24,
                    130.0,
                    85.0,
                )
            })
            .collect();

        let line = build_trend_line(&readings, BpField::Systolic);
        assert!(!line.is_empty());
        // constant input: every centroid must equal the constant, which
        // only holds if no reading was dropped or double-counted
        assert!(line.iter().all(|p| p.value == 130));
        assert!(line.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_truncate_readings_window() {
        let readings = vec![
            reading(0, 120.0, 80.0),
            reading(DAY_MS, 121.0, 81.0),
            reading(2 * DAY_MS, 122.0, 82.0),
        ];
        let start = DateTime::from_timestamp_millis(DAY_MS).unwrap();

        let windowed = truncate_readings(&readings, start);
        assert_eq!(windowed.len(), 2);
        assert_eq!(windowed[0].timestamp.timestamp_millis(), DAY_MS);
    }

    #[test]
    fn test_process_json_end_to_end() {
        let processor = ChartProcessor::new();
        let json = processor.process_json(sample_json(), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["avg_systolic"], 120);
        assert_eq!(value["summary"]["avg_diastolic"], 78);
        assert_eq!(value["summary"]["classification"]["category"], "elevated");
        assert_eq!(value["point_styles"].as_array().unwrap().len(), 3);
        assert_eq!(value["systolic"]["scatter"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_process_json_invalid_input() {
        let processor = ChartProcessor::new();
        assert!(processor.process_json("not json", None).is_err());
    }

    #[test]
    fn test_custom_config_changes_splitting() {
        // Daily readings over 40 days: default tuning collapses to one
        // segment, but a grouping factor below 1 makes every equal gap
        // exceed the relative threshold once two gaps are seen.
        let readings: Vec<Reading> = (0..40).map(|i| reading(i * DAY_MS, 120.0, 80.0)).collect();

        let default_line = ChartProcessor::new()
            .process(&readings, None)
            .systolic
            .trend;
        assert_eq!(default_line.len(), 1);

        let aggressive = ChartProcessor::with_config(SegmenterConfig {
            chunk_count: 20,
            grouping_factor: 0,
        });
        let line = aggressive.process(&readings, None).systolic.trend;
        assert!(line.len() > 1);
    }

    #[test]
    fn test_operations_agree_with_component_entry_points() {
        let readings = vec![reading(0, 185.0, 95.0), reading(DAY_MS, 181.0, 93.0)];

        let range = scan_date_range(&readings).unwrap();
        assert_eq!(range.max.timestamp_millis(), DAY_MS);

        let summary = summarize(&readings);
        assert_eq!(summary.avg_systolic, 183);
        assert_eq!(summary.classification.category, BpCategory::Crisis);
        assert_eq!(
            classify(summary.avg_systolic, summary.avg_diastolic),
            summary.classification
        );

        assert_eq!(project_markers(&readings).len(), 2);
    }
}
