//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the trace recording
//! 2. Reads every plan and builds one topology per sub-plan
//! 3. Runs the multi-topology driver
//! 4. Writes the JSON report and/or prints a summary

use super::models::AnalyzeArgs;
use crate::analyzer::{analyze_topologies, AnalyzerConfig};
use crate::output::{render_summary, to_report, write_report, StatsReport};
use crate::parser::{read_trace, SpanStatsExtractor};
use crate::plan::read_plans;
use crate::topology::FlowTopology;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Statistics errors do not fail the command; they are logged and kept in
/// the report. The command only fails on unreadable input, on a failed
/// write, or when no topology produced statistics at all.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<StatsReport> {
    let start_time = Instant::now();

    info!("Step 1/4: Reading trace from {}...", args.trace_path.display());
    let spans = read_trace(&args.trace_path).context("Failed to read trace")?;

    info!("Step 2/4: Building topologies from {} plan files...", args.plan_paths.len());
    let mut topologies = Vec::new();
    for path in &args.plan_paths {
        let plans = read_plans(path)
            .with_context(|| format!("Failed to read plan {}", path.display()))?;
        topologies.extend(plans.iter().map(FlowTopology::new));
    }
    let topology_count = topologies.len();
    debug!("Built {} topologies", topology_count);

    info!("Step 3/4: Analyzing {} spans...", spans.len());
    let config = AnalyzerConfig::new().with_contention_source(args.contention_source);
    let analysis = analyze_topologies(
        &SpanStatsExtractor,
        config,
        &spans,
        args.deterministic,
        topologies,
    );

    for err in &analysis.errors {
        warn!("{}", err);
    }

    info!("Step 4/4: Writing output...");
    let report = to_report(&analysis, topology_count);

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("EXECUTION STATISTICS");
        println!("{}", "=".repeat(80));
        match analysis.source_topology {
            Some(index) => println!("Topology: {} of {}", index + 1, topology_count),
            None => println!("Topology: none succeeded"),
        }
        println!("\n{}", render_summary(&analysis.stats, &analysis.node_stats));
        if !report.errors.is_empty() {
            println!("Errors:");
            for err in &report.errors {
                println!("  - {}", err);
            }
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    if analysis.source_topology.is_none() && topology_count > 0 {
        anyhow::bail!(
            "no topology produced statistics: {}",
            analysis.errors
        );
    }

    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.plan_paths.is_empty() {
        anyhow::bail!("At least one plan file is required");
    }

    for path in &args.plan_paths {
        if !path.is_file() {
            anyhow::bail!("Plan file not found: {}", path.display());
        }
    }

    if !args.trace_path.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace_path.display());
    }

    if let Some(output) = &args.output_json {
        if output.is_dir() {
            anyhow::bail!("Output path is a directory: {}", output.display());
        }
    }

    Ok(())
}
