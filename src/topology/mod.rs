//! Plan topology: the identities trace statistics are matched against.

pub mod flow_topology;

pub use flow_topology::{FlowSlot, FlowTopology, ProcessorSlot, StreamSlot};
