//! Index a physical plan into slots that trace statistics attach to.
//!
//! The topology owns one slot per processor, one per remote stream and one
//! per node. Statistics start absent and are filled in during ingestion.
//! Local streams never leave their node, so they carry no cross-node signal
//! and get no slot.

use crate::plan::{NodeId, PhysicalPlan, ProcessorId, StreamEndpointSpec, StreamId};
use crate::stats::ComponentStats;
use log::debug;
use std::collections::BTreeMap;

/// A processor and the node it runs on
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorSlot {
    pub processor_id: ProcessorId,
    pub node_id: NodeId,
    pub stats: Option<ComponentStats>,
}

/// A remote stream and the two nodes it connects
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSlot {
    pub stream_id: StreamId,
    pub origin_node_id: NodeId,
    pub destination_node_id: NodeId,
    pub stats: Option<ComponentStats>,
}

/// Flow-level statistics for one node
///
/// A node may report several flow-level spans, so entries are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowSlot {
    pub node_id: NodeId,
    pub stats: Vec<ComponentStats>,
}

/// Owned index of one physical plan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowTopology {
    processors: BTreeMap<ProcessorId, ProcessorSlot>,
    streams: BTreeMap<StreamId, StreamSlot>,
    flows: BTreeMap<NodeId, FlowSlot>,
}

impl FlowTopology {
    /// Build the topology for `plan`
    ///
    /// Never fails: the plan is taken as the planner produced it.
    pub fn new(plan: &PhysicalPlan) -> Self {
        let mut topology = Self::default();

        for (&node_id, flow) in &plan.flows {
            topology.flows.insert(
                node_id,
                FlowSlot {
                    node_id,
                    stats: Vec::new(),
                },
            );

            for proc in &flow.processors {
                topology.processors.insert(
                    proc.processor_id,
                    ProcessorSlot {
                        processor_id: proc.processor_id,
                        node_id,
                        stats: None,
                    },
                );

                let remote_streams = proc
                    .outputs
                    .iter()
                    .flat_map(|output| output.streams.iter());
                for stream in remote_streams {
                    if let StreamEndpointSpec::Remote {
                        stream_id,
                        target_node_id,
                    } = *stream
                    {
                        topology.streams.insert(
                            stream_id,
                            StreamSlot {
                                stream_id,
                                origin_node_id: node_id,
                                destination_node_id: target_node_id,
                                stats: None,
                            },
                        );
                    }
                }
            }
        }

        debug!(
            "Built topology: {} nodes, {} processors, {} remote streams",
            topology.flows.len(),
            topology.processors.len(),
            topology.streams.len()
        );

        topology
    }

    pub fn node_count(&self) -> usize {
        self.flows.len()
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    pub fn processor(&self, id: ProcessorId) -> Option<&ProcessorSlot> {
        self.processors.get(&id)
    }

    pub fn stream(&self, id: StreamId) -> Option<&StreamSlot> {
        self.streams.get(&id)
    }

    pub fn flow(&self, node_id: NodeId) -> Option<&FlowSlot> {
        self.flows.get(&node_id)
    }

    pub fn processor_mut(&mut self, id: ProcessorId) -> Option<&mut ProcessorSlot> {
        self.processors.get_mut(&id)
    }

    pub fn stream_mut(&mut self, id: StreamId) -> Option<&mut StreamSlot> {
        self.streams.get_mut(&id)
    }

    pub fn flow_mut(&mut self, node_id: NodeId) -> Option<&mut FlowSlot> {
        self.flows.get_mut(&node_id)
    }

    pub fn processors(&self) -> impl Iterator<Item = &ProcessorSlot> {
        self.processors.values()
    }

    pub fn streams(&self) -> impl Iterator<Item = &StreamSlot> {
        self.streams.values()
    }

    pub fn flows(&self) -> impl Iterator<Item = &FlowSlot> {
        self.flows.values()
    }
}

impl From<&PhysicalPlan> for FlowTopology {
    fn from(plan: &PhysicalPlan) -> Self {
        Self::new(plan)
    }
}
