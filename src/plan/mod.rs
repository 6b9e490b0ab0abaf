//! Physical flow plan: identifiers, schema and JSON loading.

pub mod ids;
pub mod loader;
pub mod schema;

// Re-export main types
pub use ids::{FlowId, NodeId, ProcessorId, StreamId};
pub use loader::{parse_plans, read_plans};
pub use schema::{FlowSpec, OutputRouterSpec, PhysicalPlan, ProcessorSpec, StreamEndpointSpec};
