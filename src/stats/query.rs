//! Query-level statistics: the whole query collapsed to scalars.

use super::total::add_to;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Totals for one query
///
/// NOTE: When adding fields to this struct, be sure to update `accumulate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLevelStats {
    pub network_bytes_sent: u64,
    pub max_mem_usage: u64,
    pub kv_bytes_read: u64,
    pub kv_rows_read: u64,
    pub kv_time: Duration,
    pub network_messages: u64,
    pub contention_time: Duration,
}

impl QueryLevelStats {
    /// Fold `other` into `self`
    ///
    /// Additive fields are summed (clamping at the maximum), peak memory is
    /// the larger of the two.
    pub fn accumulate(&mut self, other: &Self) {
        add_to(&mut self.network_bytes_sent, other.network_bytes_sent);
        self.max_mem_usage = self.max_mem_usage.max(other.max_mem_usage);
        add_to(&mut self.kv_bytes_read, other.kv_bytes_read);
        add_to(&mut self.kv_rows_read, other.kv_rows_read);
        add_to(&mut self.kv_time, other.kv_time);
        add_to(&mut self.network_messages, other.network_messages);
        add_to(&mut self.contention_time, other.contention_time);
    }
}
