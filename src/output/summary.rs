//! Text summary in the style of an explain-analyze header.

use crate::stats::{NodeLevelStats, QueryLevelStats};
use std::fmt::Write as _;
use std::time::Duration;

/// Render query totals followed by one line per node
pub fn render_summary(query: &QueryLevelStats, nodes: &NodeLevelStats) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "network usage: {} ({} messages)",
        format_bytes(query.network_bytes_sent),
        query.network_messages
    );
    let _ = writeln!(out, "KV rows read: {}", query.kv_rows_read);
    let _ = writeln!(out, "KV bytes read: {}", format_bytes(query.kv_bytes_read));
    let _ = writeln!(out, "KV time: {}", format_duration(query.kv_time));
    let _ = writeln!(
        out,
        "cumulative time spent due to contention: {}",
        format_duration(query.contention_time)
    );
    let _ = writeln!(out, "maximum memory usage: {}", format_bytes(query.max_mem_usage));

    let node_ids = nodes.nodes();
    if node_ids.is_empty() {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<6} {:>12} {:>10} {:>12} {:>10} {:>12} {:>12} {:>12}",
        "node", "net sent", "messages", "kv read", "kv rows", "kv time", "contention", "peak mem"
    );
    for node in node_ids {
        let _ = writeln!(
            out,
            "{:<6} {:>12} {:>10} {:>12} {:>10} {:>12} {:>12} {:>12}",
            node.to_string(),
            format_bytes(nodes.network_bytes_sent.get(&node).copied().unwrap_or(0)),
            nodes.network_messages.get(&node).copied().unwrap_or(0),
            format_bytes(nodes.kv_bytes_read.get(&node).copied().unwrap_or(0)),
            nodes.kv_rows_read.get(&node).copied().unwrap_or(0),
            format_duration(nodes.kv_time.get(&node).copied().unwrap_or_default()),
            format_duration(nodes.contention_time.get(&node).copied().unwrap_or_default()),
            format_bytes(nodes.max_mem_usage.get(&node).copied().unwrap_or(0)),
        );
    }

    out
}

/// Binary-prefixed byte count, e.g. `1.5 KiB`
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Duration rounded to a readable unit, e.g. `1.2s` or `350µs`
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{}µs", nanos / 1_000)
    } else if nanos < 1_000_000_000 {
        format!("{}ms", nanos / 1_000_000)
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
