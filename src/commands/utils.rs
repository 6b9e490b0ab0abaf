use crate::output::{format_bytes, read_report};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Topologies: {}", report.topology_count);
    println!("  Network Bytes Sent: {}", format_bytes(report.query.network_bytes_sent));
    println!("  KV Bytes Read: {}", format_bytes(report.query.kv_bytes_read));
    println!("  Max Memory: {}", format_bytes(report.query.max_mem_usage));
    println!("  Nodes: {}", report.nodes.nodes().len());
    println!("  Errors: {}", report.errors.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Trace Execstats Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string       - RFC 3339 timestamp");
        println!("  topology_count: number     - Topologies analyzed");
        println!("  source_topology: number?   - Topology the statistics came from");
        println!("  query: object              - Query-level totals");
        println!("    network_bytes_sent, max_mem_usage, kv_bytes_read,");
        println!("    kv_rows_read, network_messages: number");
        println!("    kv_time, contention_time: {{secs, nanos}}");
        println!("  nodes: object              - Node-level series, each keyed by node id");
        println!("  errors: array              - Errors met while analyzing");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Trace Execstats v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Node-level and query-level statistics from distributed query traces.");
}
