//! Query-level statistics across several topologies sharing one trace.
//!
//! A query planned as several sub-plans records a single trace. Each
//! sub-plan gets its own topology and a fresh analyzer; a failing topology
//! is reported and skipped, the others still run.

use super::config::AnalyzerConfig;
use super::trace_analyzer::TraceAnalyzer;
use crate::parser::{RecordedSpan, SpanStatsExtractor, StatsExtractor};
use crate::stats::{NodeLevelStats, QueryLevelStats};
use crate::topology::FlowTopology;
use crate::utils::error::{AnalyzeError, ErrorList};
use log::{debug, warn};

/// Outcome of a multi-topology run
///
/// `stats` is meaningful even when `errors` is not empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryAnalysis {
    /// Result of the last topology that processed cleanly, zero if none did
    pub stats: QueryLevelStats,

    /// Node-level statistics of the same topology
    pub node_stats: NodeLevelStats,

    /// Index of the topology `stats` came from
    pub source_topology: Option<usize>,

    /// Every per-topology failure, in topology order
    pub errors: ErrorList<AnalyzeError>,
}

impl QueryAnalysis {
    pub fn into_result(self) -> (QueryLevelStats, Result<(), ErrorList<AnalyzeError>>) {
        (self.stats, self.errors.into_result(()))
    }
}

/// Query-level statistics for `topologies` using the default extractor
///
/// Processes as many topologies as possible. The returned statistics are
/// those of the last topology processed without error, not a sum over
/// topologies; callers wanting a sum can fold results with
/// [`QueryLevelStats::accumulate`].
pub fn get_query_level_stats<I>(
    trace: &[RecordedSpan],
    make_deterministic: bool,
    topologies: I,
) -> (QueryLevelStats, Result<(), ErrorList<AnalyzeError>>)
where
    I: IntoIterator<Item = FlowTopology>,
{
    analyze_topologies(
        &SpanStatsExtractor,
        AnalyzerConfig::default(),
        trace,
        make_deterministic,
        topologies,
    )
    .into_result()
}

/// Like [`get_query_level_stats`] with an explicit extractor and config
pub fn analyze_topologies<E, I>(
    extractor: &E,
    config: AnalyzerConfig,
    trace: &[RecordedSpan],
    make_deterministic: bool,
    topologies: I,
) -> QueryAnalysis
where
    E: StatsExtractor + ?Sized,
    I: IntoIterator<Item = FlowTopology>,
{
    let mut analysis = QueryAnalysis::default();

    for (index, topology) in topologies.into_iter().enumerate() {
        let mut analyzer = TraceAnalyzer::with_config(topology, config);

        if let Err(source) = analyzer.add_trace_with(extractor, trace, make_deterministic) {
            warn!("Topology {} does not match the trace: {}", index, source);
            analysis.errors.push(AnalyzeError::Ingest {
                topology: index,
                source,
            });
            continue;
        }

        if let Err(source) = analyzer.process_stats() {
            warn!("Topology {} has {} statistics errors", index, source.len());
            analysis.errors.push(AnalyzeError::Stats {
                topology: index,
                source,
            });
            continue;
        }

        debug!("Topology {} processed", index);
        analysis.stats = *analyzer.query_level_stats();
        analysis.node_stats = analyzer.node_level_stats().clone();
        analysis.source_topology = Some(index);
    }

    analysis
}
