//! Physical flow plan schema.
//!
//! This is the shape the planner hands over once per query: for every node,
//! the processors it runs and where their outputs are routed. Nothing here is
//! validated beyond what serde enforces; a malformed plan is the planner's
//! problem.

use super::ids::{FlowId, NodeId, ProcessorId, StreamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole physical plan: one flow per participating node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysicalPlan {
    pub flows: BTreeMap<NodeId, FlowSpec>,
}

impl PhysicalPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and programmatic plans
    pub fn with_flow(mut self, node_id: NodeId, flow: FlowSpec) -> Self {
        self.flows.insert(node_id, flow);
        self
    }
}

/// The part of the plan scheduled on a single node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowSpec {
    #[serde(default)]
    pub flow_id: FlowId,

    #[serde(default)]
    pub processors: Vec<ProcessorSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorSpec {
    pub processor_id: ProcessorId,

    /// Output routers, each fanning out to one or more streams
    #[serde(default, alias = "output")]
    pub outputs: Vec<OutputRouterSpec>,
}

impl ProcessorSpec {
    pub fn new(processor_id: ProcessorId) -> Self {
        Self {
            processor_id,
            outputs: Vec::new(),
        }
    }

    /// Add a single-router output carrying `streams`
    pub fn with_output(mut self, streams: Vec<StreamEndpointSpec>) -> Self {
        self.outputs.push(OutputRouterSpec { streams });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRouterSpec {
    #[serde(default)]
    pub streams: Vec<StreamEndpointSpec>,
}

/// Where a stream goes
///
/// Remote endpoints always carry their target node; local ones stay on the
/// node that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEndpointSpec {
    Local {
        stream_id: StreamId,
    },
    Remote {
        stream_id: StreamId,
        target_node_id: NodeId,
    },
}

impl StreamEndpointSpec {
    pub fn stream_id(&self) -> StreamId {
        match self {
            Self::Local { stream_id } | Self::Remote { stream_id, .. } => *stream_id,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}
