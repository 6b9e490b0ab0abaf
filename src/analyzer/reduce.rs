//! Collapse node-level series into query-level totals.

use super::config::ContentionSource;
use crate::stats::total::saturating_sum;
use crate::stats::{NodeLevelStats, QueryLevelStats};

/// Reduce node-level statistics to one scalar per metric
///
/// Everything is summed across nodes except peak memory, which is the
/// largest value any node reported. Sums clamp at the maximum instead of
/// overflowing. Cannot fail: data problems were already reported while
/// building `node_stats`.
pub fn reduce_query_level(
    node_stats: &NodeLevelStats,
    contention_source: ContentionSource,
) -> QueryLevelStats {
    let contention_series = match contention_source {
        ContentionSource::ContentionTime => &node_stats.contention_time,
        ContentionSource::KvTime => &node_stats.kv_time,
    };

    QueryLevelStats {
        network_bytes_sent: saturating_sum(node_stats.network_bytes_sent.values()),
        max_mem_usage: node_stats.max_mem_usage.values().copied().max().unwrap_or(0),
        kv_bytes_read: saturating_sum(node_stats.kv_bytes_read.values()),
        kv_rows_read: saturating_sum(node_stats.kv_rows_read.values()),
        kv_time: saturating_sum(node_stats.kv_time.values()),
        network_messages: saturating_sum(node_stats.network_messages.values()),
        contention_time: saturating_sum(contention_series.values()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::NodeId;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn series<T: Copy>(values: &[(u32, T)]) -> BTreeMap<NodeId, T> {
        values.iter().map(|&(node, v)| (NodeId(node), v)).collect()
    }

    fn sample() -> NodeLevelStats {
        NodeLevelStats {
            network_bytes_sent: series(&[(1, 40), (2, 60)]),
            max_mem_usage: series(&[(1, 80), (2, 300), (3, 10)]),
            kv_bytes_read: series(&[(1, 100), (3, 5)]),
            kv_rows_read: series(&[(1, 10)]),
            kv_time: series(&[(1, Duration::from_millis(7)), (2, Duration::from_millis(3))]),
            network_messages: series(&[(1, 4), (2, 6)]),
            contention_time: series(&[(2, Duration::from_millis(2))]),
        }
    }

    #[test]
    fn test_reduce_sums_and_maxes() {
        let query = reduce_query_level(&sample(), ContentionSource::ContentionTime);

        assert_eq!(
            query,
            QueryLevelStats {
                network_bytes_sent: 100,
                max_mem_usage: 300,
                kv_bytes_read: 105,
                kv_rows_read: 10,
                kv_time: Duration::from_millis(10),
                network_messages: 10,
                contention_time: Duration::from_millis(2),
            }
        );
    }

    #[test]
    fn test_reduce_legacy_contention_uses_kv_time() {
        let query = reduce_query_level(&sample(), ContentionSource::KvTime);
        assert_eq!(query.contention_time, Duration::from_millis(10));
    }

    #[test]
    fn test_reduce_saturates_instead_of_overflowing() {
        let node_stats = NodeLevelStats {
            kv_bytes_read: series(&[(1, u64::MAX), (2, 1)]),
            kv_time: series(&[(1, Duration::MAX), (2, Duration::from_secs(1))]),
            ..Default::default()
        };

        let query = reduce_query_level(&node_stats, ContentionSource::KvTime);
        assert_eq!(query.kv_bytes_read, u64::MAX);
        assert_eq!(query.kv_time, Duration::MAX);
        assert_eq!(query.contention_time, Duration::MAX);
    }

    #[test]
    fn test_reduce_empty_is_zero() {
        let query = reduce_query_level(&NodeLevelStats::default(), ContentionSource::default());
        assert_eq!(query, QueryLevelStats::default());
    }
}
