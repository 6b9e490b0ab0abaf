//! Report schema written to disk.
//!
//! Schema is versioned to allow future evolution.

use crate::analyzer::QueryAnalysis;
use crate::stats::{NodeLevelStats, QueryLevelStats};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Number of topologies analyzed
    pub topology_count: usize,

    /// Topology the statistics were taken from (none if all failed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_topology: Option<usize>,

    pub query: QueryLevelStats,

    #[serde(default)]
    pub nodes: NodeLevelStats,

    /// Human-readable errors; statistics above are still valid
    #[serde(default)]
    pub errors: Vec<String>,
}

impl StatsReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Build a report from a driver run
pub fn to_report(analysis: &QueryAnalysis, topology_count: usize) -> StatsReport {
    StatsReport {
        version: SCHEMA_VERSION.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        topology_count,
        source_topology: analysis.source_topology,
        query: analysis.stats,
        nodes: analysis.node_stats.clone(),
        errors: analysis.errors.iter().map(ToString::to_string).collect(),
    }
}
