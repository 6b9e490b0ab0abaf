//! Trace parsing and statistics extraction.
//!
//! This module handles:
//! - The recorded span schema
//! - Loading traces from JSON (bare or enveloped)
//! - Extracting per-component statistics bags from spans

pub mod extract;
pub mod schema;
pub mod trace;

// Re-export main types
pub use extract::{extract_stats_from_spans, SpanStatsExtractor, StatsExtractor};
pub use schema::{ComponentStatsRecord, RecordedSpan, StructuredRecord};
pub use trace::{parse_trace, read_trace};
