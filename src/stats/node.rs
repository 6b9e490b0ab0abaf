//! Node-level statistics: one series per metric, keyed by node.

use crate::plan::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Statistics grouped by the node that produced them
///
/// Snapshot produced by [`crate::analyzer::TraceAnalyzer::process_stats`];
/// a node only appears in a series when some component reported that metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLevelStats {
    pub network_bytes_sent: BTreeMap<NodeId, u64>,
    pub max_mem_usage: BTreeMap<NodeId, u64>,
    pub kv_bytes_read: BTreeMap<NodeId, u64>,
    pub kv_rows_read: BTreeMap<NodeId, u64>,
    pub kv_time: BTreeMap<NodeId, Duration>,
    pub network_messages: BTreeMap<NodeId, u64>,
    pub contention_time: BTreeMap<NodeId, Duration>,
}

impl NodeLevelStats {
    /// Every node that appears in at least one series
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.network_bytes_sent
            .keys()
            .chain(self.max_mem_usage.keys())
            .chain(self.kv_bytes_read.keys())
            .chain(self.kv_rows_read.keys())
            .chain(self.kv_time.keys())
            .chain(self.network_messages.keys())
            .chain(self.contention_time.keys())
            .copied()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }
}
