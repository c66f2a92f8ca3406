//! Marker-shape projection
//!
//! Maps each reading's collection site to a scatter-marker shape: HOME
//! readings render as circles, OFFICE readings as squares. Readings from any
//! other site produce no entry at all rather than a default shape, matching
//! the gap-free push semantics the chart layer expects; with unknown sites
//! present the output is shorter than the input.

use crate::types::{MarkerShape, Reading, ReadingSource};

/// Projector from readings to an ordered marker-shape sequence
pub struct MarkerProjector;

impl MarkerProjector {
    /// Produce the marker-shape sequence for `readings`, in input order.
    pub fn project(readings: &[Reading]) -> Vec<MarkerShape> {
        readings
            .iter()
            .filter_map(|reading| match reading.source {
                ReadingSource::Home => Some(MarkerShape::Circle),
                ReadingSource::Office => Some(MarkerShape::Rect),
                ReadingSource::Other(_) => None,
            })
            .collect()
    }
}
