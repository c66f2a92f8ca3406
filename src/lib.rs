//! bptrend - Compute engine for blood-pressure trend and severity signals
//!
//! bptrend transforms a patient's chronological blood-pressure readings into
//! the derived views the charting UI renders: a smoothed trend line built by
//! adaptive gap-anomaly segmentation, a clinical severity classification of
//! the average reading, and the marker shapes keyed to each reading's
//! collection site.
//!
//! ## Components
//!
//! - **DateRangeScanner**: min/max timestamp scan over a reading set
//! - **AdaptiveSegmenter**: streaming segmentation into centroid trend points
//! - **ClassificationEngine**: priority-ordered hypertension staging rules
//! - **MarkerProjector**: collection site to scatter-marker shape
//!
//! All transforms are pure and synchronous: no I/O, no shared state, each
//! call recomputes from its arguments alone.

pub mod classifier;
pub mod encoder;
pub mod error;
pub mod markers;
pub mod pipeline;
pub mod range;
pub mod schema;
pub mod segmenter;
pub mod summary;
pub mod types;

pub use classifier::ClassificationEngine;
pub use encoder::ChartEncoder;
pub use error::ComputeError;
pub use markers::MarkerProjector;
pub use pipeline::{
    build_trend_line, classify, project_markers, scan_date_range, summarize, truncate_readings,
    ChartProcessor,
};
pub use range::DateRangeScanner;
pub use schema::{ReadingAdapter, SCHEMA_VERSION};
pub use segmenter::{AdaptiveSegmenter, SegmenterConfig};
pub use summary::Summarizer;

/// Engine version embedded in all chart payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for chart payloads
pub const PRODUCER_NAME: &str = "bptrend";
