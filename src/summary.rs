//! Reading-set summary
//!
//! Computes the rounded whole-set average systolic/diastolic pressures and
//! pairs them with their severity classification. An empty set averages to
//! 0/0, which classifies as Normal.

use crate::classifier::ClassificationEngine;
use crate::types::{Reading, ReadingSummary};

/// Builder for whole-set summaries
pub struct Summarizer;

impl Summarizer {
    /// Summarize `readings`: rounded mean systolic/diastolic plus the
    /// resulting classification.
    pub fn summarize(readings: &[Reading]) -> ReadingSummary {
        let avg_systolic = round_mean(readings.iter().map(|r| r.systolic.value));
        let avg_diastolic = round_mean(readings.iter().map(|r| r.diastolic.value));

        ReadingSummary {
            avg_systolic,
            avg_diastolic,
            classification: ClassificationEngine::classify(avg_systolic, avg_diastolic),
            count: readings.len(),
        }
    }
}

/// Rounded arithmetic mean; 0 for an empty iterator
fn round_mean(values: impl Iterator<Item = f64>) -> i64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for value in values {
        total += value;
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    (total / count as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BpCategory, ColorTier, Quantity, ReadingSource};
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn reading(ts_ms: i64, systolic: f64, diastolic: f64) -> Reading {
        Reading {
            timestamp: DateTime::from_timestamp_millis(ts_ms).unwrap(),
            systolic: Quantity::new(systolic),
            diastolic: Quantity::new(diastolic),
            source: ReadingSource::Home,
        }
    }

    #[test]
    fn test_rounded_averages() {
        let readings = vec![
            reading(0, 120.0, 80.0),
            reading(1_000, 121.0, 79.0),
        ];
        let summary = Summarizer::summarize(&readings);

        // 120.5 rounds away from zero
        assert_eq!(summary.avg_systolic, 121);
        assert_eq!(summary.avg_diastolic, 80);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_classification_rides_on_averages() {
        let readings = vec![reading(0, 185.0, 70.0), reading(1_000, 179.0, 70.0)];
        let summary = Summarizer::summarize(&readings);

        // average 182/70 is a crisis even though one reading is not
        assert_eq!(summary.avg_systolic, 182);
        assert_eq!(summary.classification.category, BpCategory::Crisis);
        assert_eq!(summary.classification.tier, ColorTier::Red);
    }

    #[test]
    fn test_empty_set_is_normal() {
        let summary = Summarizer::summarize(&[]);

        assert_eq!(summary.avg_systolic, 0);
        assert_eq!(summary.avg_diastolic, 0);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.classification.category, BpCategory::Normal);
        assert_eq!(summary.classification.tier, ColorTier::Green);
    }
}
