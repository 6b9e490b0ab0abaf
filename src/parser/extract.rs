//! Statistics extraction: recorded spans to per-component bags.
//!
//! The analyzer only depends on the [`StatsExtractor`] trait. Any pure
//! function with the right shape is an extractor, so callers with their own
//! span format can plug it in; [`SpanStatsExtractor`] reads the structured
//! payloads of [`RecordedSpan`].

use super::schema::RecordedSpan;
use crate::stats::ComponentStatsMap;
use log::debug;
use std::collections::btree_map::Entry;

/// Maps a finished trace to one statistics bag per component
pub trait StatsExtractor {
    /// Extract statistics from `spans`
    ///
    /// When `make_deterministic` is set, measurements that vary from run to
    /// run are pinned to fixed values.
    fn extract(&self, spans: &[RecordedSpan], make_deterministic: bool) -> ComponentStatsMap;
}

impl<F> StatsExtractor for F
where
    F: Fn(&[RecordedSpan], bool) -> ComponentStatsMap,
{
    fn extract(&self, spans: &[RecordedSpan], make_deterministic: bool) -> ComponentStatsMap {
        self(spans, make_deterministic)
    }
}

/// Default extractor reading component statistics payloads off spans
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanStatsExtractor;

impl StatsExtractor for SpanStatsExtractor {
    fn extract(&self, spans: &[RecordedSpan], make_deterministic: bool) -> ComponentStatsMap {
        extract_stats_from_spans(spans, make_deterministic)
    }
}

/// Collect every component statistics payload in `spans`
///
/// A component reporting from several spans is merged with
/// [`crate::stats::ComponentStats::union`], earlier spans winning on fields
/// both report.
pub fn extract_stats_from_spans(
    spans: &[RecordedSpan],
    make_deterministic: bool,
) -> ComponentStatsMap {
    let mut stats_map = ComponentStatsMap::new();

    for record in spans.iter().flat_map(RecordedSpan::component_stats) {
        let mut stats = record.stats;
        if make_deterministic {
            stats.make_deterministic();
        }

        match stats_map.entry(record.component.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(stats);
            }
            Entry::Occupied(mut entry) => {
                let merged = entry.get().union(&stats);
                entry.insert(merged);
            }
        }
    }

    debug!(
        "Extracted statistics for {} components from {} spans",
        stats_map.len(),
        spans.len()
    );

    stats_map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{ComponentStatsRecord, StructuredRecord};
    use crate::stats::{ComponentId, ComponentStats, KvStats};
    use std::time::Duration;

    fn span_with(records: Vec<ComponentStatsRecord>) -> RecordedSpan {
        RecordedSpan {
            structured: records.into_iter().map(StructuredRecord::from).collect(),
            ..Default::default()
        }
    }

    fn kv_record(
        component: ComponentId,
        bytes: Option<u64>,
        rows: Option<u64>,
    ) -> ComponentStatsRecord {
        ComponentStatsRecord {
            component,
            stats: ComponentStats {
                kv: KvStats {
                    bytes_read: bytes,
                    tuples_read: rows,
                    kv_time: Some(Duration::from_millis(3)),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_extract_merges_duplicate_components() {
        let spans = vec![
            span_with(vec![kv_record(ComponentId::processor(1), Some(10), None)]),
            span_with(vec![kv_record(ComponentId::processor(1), Some(99), Some(4))]),
        ];

        let map = extract_stats_from_spans(&spans, false);
        assert_eq!(map.len(), 1);

        let stats = &map[&ComponentId::processor(1)];
        assert_eq!(stats.kv.bytes_read, Some(10));
        assert_eq!(stats.kv.tuples_read, Some(4));
    }

    #[test]
    fn test_extract_deterministic() {
        let spans = vec![span_with(vec![kv_record(ComponentId::stream(3), Some(1), None)])];

        let map = extract_stats_from_spans(&spans, true);
        assert_eq!(map[&ComponentId::stream(3)].kv.kv_time, Some(Duration::ZERO));

        let map = extract_stats_from_spans(&spans, false);
        assert_eq!(map[&ComponentId::stream(3)].kv.kv_time, Some(Duration::from_millis(3)));
    }

    #[test]
    fn test_closure_is_an_extractor() {
        let fixed = |_: &[RecordedSpan], _: bool| {
            let mut map = ComponentStatsMap::new();
            map.insert(ComponentId::flow("f", 1), ComponentStats::default());
            map
        };

        let map = fixed.extract(&[], false);
        assert!(map.contains_key(&ComponentId::flow("f", 1)));
    }
}
