//! Trace analysis: attach trace statistics to a topology and reduce them.
//!
//! This module transforms a plan topology plus a finished trace into:
//! - Node-level series (per-node totals and peaks)
//! - Query-level scalars (whole-query totals)
//!
//! and drives the pipeline over several topologies sharing one trace.

pub mod aggregate;
pub mod config;
pub mod driver;
pub mod reduce;
pub mod trace_analyzer;

// Re-export main types and functions
pub use aggregate::{aggregate_node_level, network_bytes, network_messages};
pub use config::{AnalyzerConfig, ContentionSource};
pub use driver::{analyze_topologies, get_query_level_stats, QueryAnalysis};
pub use reduce::reduce_query_level;
pub use trace_analyzer::TraceAnalyzer;
