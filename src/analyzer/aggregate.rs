//! Reduce populated topology slots into node-level series.
//!
//! Combination rules per metric:
//! - KV bytes/rows/time and contention time: summed per processor owner node
//! - network bytes and messages: summed per stream origin node, taking
//!   whichever of the receive or send side the stream reported
//! - peak memory: running max over stream bags and flow slot entries
//!
//! Exactly one side of a network metric must be present. Streams violating
//! that lose their contribution to that metric only; the violation goes into
//! the error accumulator and the pass continues.

use crate::plan::NodeId;
use crate::stats::total::{add_to, SaturatingTotal};
use crate::stats::{ComponentStats, NodeLevelStats};
use crate::topology::FlowTopology;
use crate::utils::error::{ErrorList, ExclusivityError, NetworkMetric, StatsError};
use log::warn;
use std::collections::BTreeMap;

/// Compute node-level statistics for every slot of `topology`
///
/// The returned statistics are always complete for whatever could be
/// computed, even when the error list is not empty.
pub fn aggregate_node_level(topology: &FlowTopology) -> (NodeLevelStats, ErrorList<StatsError>) {
    let mut node_stats = NodeLevelStats::default();
    let mut errs = ErrorList::new();

    add_processor_stats(topology, &mut node_stats);
    add_stream_stats(topology, &mut node_stats, &mut errs);
    add_flow_stats(topology, &mut node_stats);

    (node_stats, errs)
}

/// **Private** - KV and contention series from processor bags
fn add_processor_stats(topology: &FlowTopology, node_stats: &mut NodeLevelStats) {
    for slot in topology.processors() {
        let Some(stats) = &slot.stats else {
            continue;
        };
        let node = slot.node_id;

        add_present(&mut node_stats.kv_bytes_read, node, stats.kv.bytes_read);
        add_present(&mut node_stats.kv_rows_read, node, stats.kv.tuples_read);
        add_present(&mut node_stats.kv_time, node, stats.kv.kv_time);
        add_present(&mut node_stats.contention_time, node, stats.kv.contention_time);
    }
}

/// **Private** - network series and stream-attached peak memory
fn add_stream_stats(
    topology: &FlowTopology,
    node_stats: &mut NodeLevelStats,
    errs: &mut ErrorList<StatsError>,
) {
    for slot in topology.streams() {
        let Some(stats) = &slot.stats else {
            continue;
        };
        let node = slot.origin_node_id;

        match network_bytes(stats) {
            Ok(bytes) => add_present(&mut node_stats.network_bytes_sent, node, Some(bytes)),
            Err(source) => {
                warn!("Skipping network bytes of stream {}: {}", slot.stream_id, source);
                errs.push(StatsError::NetworkBytes {
                    stream_id: slot.stream_id,
                    source,
                });
            }
        }

        // The row engine attaches peak memory to the stream of its last
        // outbox rather than to a flow span.
        max_present(&mut node_stats.max_mem_usage, node, stats.flow.max_mem_usage);

        match network_messages(stats) {
            Ok(messages) => add_present(&mut node_stats.network_messages, node, Some(messages)),
            Err(source) => {
                warn!("Skipping network messages of stream {}: {}", slot.stream_id, source);
                errs.push(StatsError::NetworkMessages {
                    stream_id: slot.stream_id,
                    source,
                });
            }
        }
    }
}

/// **Private** - flow-slot peak memory (vectorized engine)
fn add_flow_stats(topology: &FlowTopology, node_stats: &mut NodeLevelStats) {
    for slot in topology.flows() {
        for stats in &slot.stats {
            max_present(&mut node_stats.max_mem_usage, slot.node_id, stats.flow.max_mem_usage);
        }
    }
}

/// Bytes carried by a stream, from whichever side reported them
///
/// Only one side of a stream presents statistics (the sender in the row
/// engine, the receiver in the vectorized engine), so summing the present
/// side never double counts.
pub fn network_bytes(stats: &ComponentStats) -> Result<u64, ExclusivityError> {
    exclusive(
        stats.net_rx.bytes_received,
        stats.net_tx.bytes_sent,
        NetworkMetric::Bytes,
    )
}

/// Messages carried by a stream, from whichever side reported them
pub fn network_messages(stats: &ComponentStats) -> Result<u64, ExclusivityError> {
    exclusive(
        stats.net_rx.messages_received,
        stats.net_tx.messages_sent,
        NetworkMetric::Messages,
    )
}

fn exclusive(
    received: Option<u64>,
    sent: Option<u64>,
    metric: NetworkMetric,
) -> Result<u64, ExclusivityError> {
    match (received, sent) {
        (Some(value), None) | (None, Some(value)) => Ok(value),
        (Some(_), Some(_)) => Err(ExclusivityError::BothSet(metric)),
        (None, None) => Err(ExclusivityError::NeitherSet(metric)),
    }
}

fn add_present<T>(series: &mut BTreeMap<NodeId, T>, node: NodeId, value: Option<T>)
where
    T: SaturatingTotal,
{
    if let Some(value) = value {
        add_to(series.entry(node).or_default(), value);
    }
}

fn max_present(series: &mut BTreeMap<NodeId, u64>, node: NodeId, value: Option<u64>) {
    if let Some(value) = value {
        let current = series.entry(node).or_default();
        *current = (*current).max(value);
    }
}
