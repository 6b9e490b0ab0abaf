//! Trace Execstats
//!
//! Node-level and query-level execution statistics for distributed
//! queries, computed from a finished trace and the physical plan it ran.
//!
//! This crate provides the core implementation for the `execstats` CLI
//! tool, and the library pieces it is built from:
//!
//! - [`plan`]: physical plan schema and loading
//! - [`topology`]: the plan indexed into processor, stream and flow slots
//! - [`parser`]: recorded spans and statistics extraction
//! - [`analyzer`]: ingestion, node-level and query-level reduction, and the
//!   multi-topology driver
//! - [`output`]: JSON reports and text summaries
//!
//! ## Getting Started
//!
//! ```ignore
//! use trace_execstats::analyzer::TraceAnalyzer;
//! use trace_execstats::topology::FlowTopology;
//!
//! let mut analyzer = TraceAnalyzer::new(FlowTopology::new(&plan));
//! analyzer.add_trace(&spans, false)?;
//! if let Err(errs) = analyzer.process_stats() {
//!     // statistics are still usable
//!     log::warn!("{errs}");
//! }
//! println!("{:?}", analyzer.query_level_stats());
//! ```

pub mod analyzer;
pub mod commands;
pub mod output;
pub mod parser;
pub mod plan;
pub mod stats;
pub mod topology;
pub mod utils;
