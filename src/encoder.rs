//! Chart payload encoding
//!
//! Assembles everything the rendering layer needs into one payload: systolic
//! and diastolic scatter series with their trend-line overlays, the marker
//! shapes, the whole-set summary, and the pass-through goal thresholds.
//! Rendering itself (canvas, colors, axis config) stays outside the engine.

use crate::error::ComputeError;
use crate::markers::MarkerProjector;
use crate::range::DateRangeScanner;
use crate::segmenter::AdaptiveSegmenter;
use crate::summary::Summarizer;
use crate::types::{
    BpField, BpGoal, BpSeries, ChartPayload, ChartProducer, Reading, ScatterPoint,
};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Encoder producing chart payloads stamped with provenance
pub struct ChartEncoder {
    instance_id: String,
}

impl Default for ChartEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Build the chart payload for `readings`.
    ///
    /// The readings must be sorted ascending by timestamp and pre-filtered
    /// to the display window. `goal` is copied through uninterpreted.
    pub fn encode(
        &self,
        readings: &[Reading],
        segmenter: &AdaptiveSegmenter,
        goal: Option<BpGoal>,
    ) -> ChartPayload {
        let producer = ChartProducer {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        ChartPayload {
            producer,
            generated_at_utc: Utc::now().to_rfc3339(),
            date_range: DateRangeScanner::scan(readings),
            systolic: build_series(readings, segmenter, BpField::Systolic),
            diastolic: build_series(readings, segmenter, BpField::Diastolic),
            point_styles: MarkerProjector::project(readings),
            summary: Summarizer::summarize(readings),
            goal,
        }
    }

    /// Encode to a JSON string
    pub fn encode_to_json(
        &self,
        readings: &[Reading],
        segmenter: &AdaptiveSegmenter,
        goal: Option<BpGoal>,
    ) -> Result<String, ComputeError> {
        let payload = self.encode(readings, segmenter, goal);
        serde_json::to_string_pretty(&payload).map_err(ComputeError::JsonError)
    }
}

/// Scatter series plus trend overlay for one pressure component
fn build_series(readings: &[Reading], segmenter: &AdaptiveSegmenter, field: BpField) -> BpSeries {
    let scatter = readings
        .iter()
        .map(|reading| ScatterPoint {
            x: reading.timestamp,
            y: field.project(reading),
        })
        .collect();

    BpSeries {
        scatter,
        trend: segmenter.build_trend_line(readings, field),
    }
}
