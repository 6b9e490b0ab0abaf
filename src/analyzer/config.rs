//! Analyzer settings.

use serde::{Deserialize, Serialize};

/// Series the query-level contention time is summed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentionSource {
    /// Sum the per-node contention time series
    #[default]
    ContentionTime,

    /// Sum the per-node KV time series, as older releases did. Only useful
    /// when output must match those releases exactly.
    KvTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub contention_source: ContentionSource,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contention_source(mut self, source: ContentionSource) -> Self {
        self.contention_source = source;
        self
    }
}
