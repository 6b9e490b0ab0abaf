//! Trace Execstats CLI
//!
//! Computes node-level and query-level execution statistics from a
//! distributed query trace and its physical plan(s).

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_execstats::analyzer::ContentionSource;
use trace_execstats::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs,
};
use trace_execstats::utils::config::{DEFAULT_LOG_LEVEL, VERBOSE_LOG_LEVEL};

/// Trace Execstats - execution statistics for distributed queries
#[derive(Parser, Debug)]
#[command(name = "execstats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a trace against one or more physical plans
    Analyze {
        /// Physical plan JSON file (repeat for several sub-plans)
        #[arg(short, long = "plan", required = true)]
        plans: Vec<PathBuf>,

        /// Trace recording JSON file
        #[arg(short, long)]
        trace: PathBuf,

        /// Output path for the JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pin measurements that vary from run to run
        #[arg(long, env = "EXECSTATS_DETERMINISTIC")]
        deterministic: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Derive query contention time from KV time, matching older releases
        #[arg(long)]
        legacy_contention: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { VERBOSE_LOG_LEVEL } else { DEFAULT_LOG_LEVEL };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            plans,
            trace,
            output,
            deterministic,
            summary,
            legacy_contention,
        } => {
            let contention_source = if legacy_contention {
                ContentionSource::KvTime
            } else {
                ContentionSource::ContentionTime
            };

            let args = AnalyzeArgs {
                plan_paths: plans,
                trace_path: trace,
                output_json: output,
                deterministic,
                print_summary: summary,
                contention_source,
            };

            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
