//! Recorded span schema.
//!
//! Spans are what the tracing layer hands over once a query has finished.
//! Each span may carry structured payloads; the ones shaped like component
//! statistics are what the analyzer cares about, anything else is kept
//! verbatim and ignored.

use crate::stats::{ComponentId, ComponentStats};
use serde::{de, Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key marking a structured payload as component statistics
const COMPONENT_FIELD: &str = "component";

/// One completed unit of traced work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedSpan {
    #[serde(default)]
    pub trace_id: u64,

    #[serde(default)]
    pub span_id: u64,

    #[serde(default)]
    pub parent_span_id: u64,

    /// Operation name, e.g. "flow" or "outbox"
    #[serde(default)]
    pub operation: String,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Structured payloads attached to the span
    #[serde(default)]
    pub structured: Vec<StructuredRecord>,
}

impl RecordedSpan {
    /// Component statistics payloads carried by this span
    pub fn component_stats(&self) -> impl Iterator<Item = &ComponentStatsRecord> {
        self.structured.iter().filter_map(|record| match record {
            StructuredRecord::ComponentStats(stats) => Some(stats),
            StructuredRecord::Other(_) => None,
        })
    }
}

/// Statistics reported by one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStatsRecord {
    pub component: ComponentId,
    pub stats: ComponentStats,
}

/// Structured payload attached to a span
///
/// An object with a `component` key is a statistics payload and must match
/// [`ComponentStatsRecord`]; anything else is kept as [`StructuredRecord::Other`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredRecord {
    ComponentStats(ComponentStatsRecord),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for StructuredRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get(COMPONENT_FIELD).is_none() {
            return Ok(Self::Other(value));
        }

        serde_json::from_value(value)
            .map(Self::ComponentStats)
            .map_err(|err| {
                de::Error::custom(format!("invalid component statistics payload: {err}"))
            })
    }
}

impl From<ComponentStatsRecord> for StructuredRecord {
    fn from(record: ComponentStatsRecord) -> Self {
        Self::ComponentStats(record)
    }
}
