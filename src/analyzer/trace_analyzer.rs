//! Top-level statistics from a plan topology and its trace.
//!
//! Example usage:
//! ```ignore
//! let mut analyzer = TraceAnalyzer::new(FlowTopology::new(&plan));
//! analyzer.add_trace(&spans, false)?;
//! analyzer.process_stats()?;
//! let bytes_by_node = &analyzer.node_level_stats().network_bytes_sent;
//! ```

use super::aggregate::aggregate_node_level;
use super::config::AnalyzerConfig;
use super::reduce::reduce_query_level;
use crate::parser::{RecordedSpan, SpanStatsExtractor, StatsExtractor};
use crate::stats::{ComponentId, ComponentStats, NodeLevelStats, QueryLevelStats};
use crate::topology::FlowTopology;
use crate::utils::error::{ErrorList, IngestError, StatsError};
use log::debug;

/// Computes node-level and query-level statistics for one topology
///
/// Owns its topology exclusively. Traces are ingested with
/// [`TraceAnalyzer::add_trace`], then [`TraceAnalyzer::process_stats`]
/// computes the snapshots exposed by the accessors.
#[derive(Debug, Clone)]
pub struct TraceAnalyzer {
    topology: FlowTopology,
    config: AnalyzerConfig,
    node_level_stats: NodeLevelStats,
    query_level_stats: QueryLevelStats,
}

impl TraceAnalyzer {
    pub fn new(topology: FlowTopology) -> Self {
        Self::with_config(topology, AnalyzerConfig::default())
    }

    pub fn with_config(topology: FlowTopology, config: AnalyzerConfig) -> Self {
        Self {
            topology,
            config,
            node_level_stats: NodeLevelStats::default(),
            query_level_stats: QueryLevelStats::default(),
        }
    }

    /// Attach the statistics of `trace` to the topology
    ///
    /// Uses [`SpanStatsExtractor`]. See [`TraceAnalyzer::add_trace_with`].
    pub fn add_trace(
        &mut self,
        trace: &[RecordedSpan],
        make_deterministic: bool,
    ) -> Result<(), IngestError> {
        self.add_trace_with(&SpanStatsExtractor, trace, make_deterministic)
    }

    /// Attach the statistics `extractor` finds in `trace` to the topology
    ///
    /// Processor and stream bags replace any bag attached by an earlier call;
    /// flow bags are appended to their node's slot. Calls are cumulative.
    ///
    /// # Errors
    /// Returns the first component that does not exist in the plan. Entries
    /// applied before it stay applied; the rest of the call is abandoned.
    pub fn add_trace_with<E>(
        &mut self,
        extractor: &E,
        trace: &[RecordedSpan],
        make_deterministic: bool,
    ) -> Result<(), IngestError>
    where
        E: StatsExtractor + ?Sized,
    {
        let stats_map = extractor.extract(trace, make_deterministic);
        let total = stats_map.len();

        for (component, stats) in stats_map {
            self.attach(component, stats)?;
        }

        debug!("Attached statistics for {} components", total);
        Ok(())
    }

    /// **Private** - route one bag to its slot
    fn attach(&mut self, component: ComponentId, stats: ComponentStats) -> Result<(), IngestError> {
        match component {
            ComponentId::Processor { id } => {
                let slot = self
                    .topology
                    .processor_mut(id)
                    .ok_or(IngestError::UnknownProcessor(id))?;
                if slot.stats.replace(stats).is_some() {
                    debug!("Replacing statistics of processor {}", id);
                }
            }

            ComponentId::Stream { id } => {
                let slot = self
                    .topology
                    .stream_mut(id)
                    .ok_or(IngestError::UnknownStream(id))?;
                if slot.stats.replace(stats).is_some() {
                    debug!("Replacing statistics of stream {}", id);
                }
            }

            ComponentId::Flow { flow_id, node_id } => {
                let slot = match self.topology.flow_mut(node_id) {
                    Some(slot) => slot,
                    None => return Err(IngestError::UnknownFlow { flow_id, node_id }),
                };
                slot.stats.push(stats);
            }
        }

        Ok(())
    }

    /// Compute node-level and query-level statistics
    ///
    /// Both snapshots are stored even when errors are returned; they hold
    /// everything that could be computed and stay valid.
    pub fn process_stats(&mut self) -> Result<(), ErrorList<StatsError>> {
        let (node_level_stats, errs) = aggregate_node_level(&self.topology);

        self.query_level_stats =
            reduce_query_level(&node_level_stats, self.config.contention_source);
        self.node_level_stats = node_level_stats;

        if !errs.is_empty() {
            debug!("Processed statistics with {} errors", errs.len());
        }
        errs.into_result(())
    }

    pub fn node_level_stats(&self) -> &NodeLevelStats {
        &self.node_level_stats
    }

    pub fn query_level_stats(&self) -> &QueryLevelStats {
        &self.query_level_stats
    }

    pub fn topology(&self) -> &FlowTopology {
        &self.topology
    }
}
