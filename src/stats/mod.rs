//! Statistics types: per-component bags in, node and query totals out.
//!
//! This module defines:
//! - Component identifiers and their statistics bags (input)
//! - Node-level series (intermediate snapshot)
//! - Query-level scalars (final result)

pub mod component;
pub mod node;
pub mod query;
pub mod total;

use std::collections::BTreeMap;

// Re-export main types
pub use component::{
    ComponentId, ComponentStats, FlowStats, KvStats, NetworkRxStats, NetworkTxStats,
};
pub use node::NodeLevelStats;
pub use query::QueryLevelStats;

/// Output of statistics extraction: one bag per traced component
pub type ComponentStatsMap = BTreeMap<ComponentId, ComponentStats>;
