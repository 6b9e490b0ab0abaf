//! Per-component statistics bags extracted from trace spans.
//!
//! Every measurement is optional. An absent field means the component did
//! not report it, which is different from reporting zero, so nothing here
//! ever defaults a missing value.

use crate::plan::{FlowId, NodeId, ProcessorId, StreamId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which component a statistics bag belongs to
///
/// Processors and streams are addressed by their plan-wide id. Flows are
/// addressed by node, because every node shares the query's flow id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentId {
    Processor { id: ProcessorId },
    Stream { id: StreamId },
    Flow { flow_id: FlowId, node_id: NodeId },
}

impl ComponentId {
    pub fn processor(id: u32) -> Self {
        Self::Processor { id: ProcessorId(id) }
    }

    pub fn stream(id: u32) -> Self {
        Self::Stream { id: StreamId(id) }
    }

    pub fn flow(flow_id: impl Into<String>, node_id: u32) -> Self {
        Self::Flow {
            flow_id: FlowId::new(flow_id),
            node_id: NodeId(node_id),
        }
    }
}

/// Receive side of a stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRxStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_received: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_received: Option<u64>,
}

/// Send side of a stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTxStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_sent: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_sent: Option<u64>,
}

/// Key-value layer reads done by a processor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_read: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuples_read: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kv_time: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contention_time: Option<Duration>,
}

/// Flow-level measurements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mem_usage: Option<u64>,
}

/// Statistics bag for one component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentStats {
    #[serde(default)]
    pub net_rx: NetworkRxStats,

    #[serde(default)]
    pub net_tx: NetworkTxStats,

    #[serde(default)]
    pub kv: KvStats,

    #[serde(default, alias = "flow_stats")]
    pub flow: FlowStats,
}

impl ComponentStats {
    /// Pin measurements that change from run to run
    ///
    /// Present durations and peak memory become zero so output can be
    /// compared across runs. Counters are left alone and absent fields stay
    /// absent.
    pub fn make_deterministic(&mut self) {
        fn reset<T: Default>(v: &mut Option<T>) {
            if let Some(v) = v.as_mut() {
                *v = T::default();
            }
        }

        reset(&mut self.kv.kv_time);
        reset(&mut self.kv.contention_time);
        reset(&mut self.flow.max_mem_usage);
    }

    /// Merge two bags for the same component
    ///
    /// Values present in `self` win; absent ones are taken from `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            net_rx: NetworkRxStats {
                bytes_received: self.net_rx.bytes_received.or(other.net_rx.bytes_received),
                messages_received: self
                    .net_rx
                    .messages_received
                    .or(other.net_rx.messages_received),
            },
            net_tx: NetworkTxStats {
                bytes_sent: self.net_tx.bytes_sent.or(other.net_tx.bytes_sent),
                messages_sent: self.net_tx.messages_sent.or(other.net_tx.messages_sent),
            },
            kv: KvStats {
                bytes_read: self.kv.bytes_read.or(other.kv.bytes_read),
                tuples_read: self.kv.tuples_read.or(other.kv.tuples_read),
                kv_time: self.kv.kv_time.or(other.kv.kv_time),
                contention_time: self.kv.contention_time.or(other.kv.contention_time),
            },
            flow: FlowStats {
                max_mem_usage: self.flow.max_mem_usage.or(other.flow.max_mem_usage),
            },
        }
    }
}
