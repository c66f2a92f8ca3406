//! Core types for the bptrend engine
//!
//! This module defines the data structures that flow through the engine:
//! raw readings, the trend/classification outputs, and the chart payload
//! handed to the rendering layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collection site a reading was taken at.
///
/// Unknown sites deserialize into `Other` rather than failing; the marker
/// projection skips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReadingSource {
    Home,
    Office,
    #[serde(untagged)]
    Other(String),
}

impl ReadingSource {
    pub fn as_str(&self) -> &str {
        match self {
            ReadingSource::Home => "HOME",
            ReadingSource::Office => "OFFICE",
            ReadingSource::Other(name) => name.as_str(),
        }
    }
}

/// A measured quantity with its (optional) unit.
///
/// The engine only ever reads `value`; the unit is carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Quantity {
    pub fn new(value: f64) -> Self {
        Self { value, unit: None }
    }
}

/// One blood-pressure observation.
///
/// Sequences handed to the segmenter and marker projector must already be
/// sorted ascending by `timestamp`; the engine does not re-sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Observation instant (wire format: epoch milliseconds)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Systolic pressure (mmHg)
    pub systolic: Quantity,
    /// Diastolic pressure (mmHg)
    pub diastolic: Quantity,
    /// Collection site
    pub source: ReadingSource,
}

/// Which pressure component to project out of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BpField {
    Systolic,
    Diastolic,
}

impl BpField {
    /// Extract this component's value from a reading
    pub fn project(&self, reading: &Reading) -> f64 {
        match self {
            BpField::Systolic => reading.systolic.value,
            BpField::Diastolic => reading.diastolic.value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BpField::Systolic => "systolic",
            BpField::Diastolic => "diastolic",
        }
    }
}

/// One averaged point on the trend line: the centroid of a segment of
/// time-adjacent readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Centroid instant (rounded mean of member timestamps)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Rounded mean of member values (mmHg)
    pub value: i64,
}

/// Observed time span of a reading set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub min: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub max: DateTime<Utc>,
}

/// Hypertension severity category, most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BpCategory {
    Crisis,
    Stage2,
    Stage1,
    Elevated,
    Normal,
}

impl BpCategory {
    /// Display label as shown next to the alert icon
    pub fn label(&self) -> &'static str {
        match self {
            BpCategory::Crisis => "Hypertension Crisis",
            BpCategory::Stage2 => "Hypertension Stage 2",
            BpCategory::Stage1 => "Hypertension Stage 1",
            BpCategory::Elevated => "Elevated",
            BpCategory::Normal => "Normal",
        }
    }
}

/// Alert color associated with a severity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    Red,
    Yellow,
    Green,
}

impl ColorTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTier::Red => "red",
            ColorTier::Yellow => "yellow",
            ColorTier::Green => "green",
        }
    }
}

/// Severity classification of an average reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: BpCategory,
    pub tier: ColorTier,
}

/// Scatter-point marker shape, keyed to collection site.
///
/// Serialized names match chart.js pointStyle values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Rect,
}

impl MarkerShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerShape::Circle => "circle",
            MarkerShape::Rect => "rect",
        }
    }
}

/// Rounded whole-set averages paired with their classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingSummary {
    pub avg_systolic: i64,
    pub avg_diastolic: i64,
    pub classification: Classification,
    /// Number of readings the averages were taken over
    pub count: usize,
}

/// One point of a scatter series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub x: DateTime<Utc>,
    pub y: f64,
}

/// Scatter series plus its trend-line overlay for one pressure component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpSeries {
    pub scatter: Vec<ScatterPoint>,
    pub trend: Vec<TrendPoint>,
}

/// Externally supplied target thresholds.
///
/// Opaque pass-through: the engine copies these into the payload without
/// interpreting them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpGoal {
    pub systolic: f64,
    pub diastolic: f64,
}

/// Producer metadata stamped on every chart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete chart payload handed to the rendering layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPayload {
    pub producer: ChartProducer,
    pub generated_at_utc: String,
    /// Observed span of the input, absent for an empty reading set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub systolic: BpSeries,
    pub diastolic: BpSeries,
    /// Marker shapes index-aligned with the scatter series (readings from
    /// unknown sites are skipped, shortening the list)
    pub point_styles: Vec<MarkerShape>,
    pub summary: ReadingSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<BpGoal>,
}
