//! Output writers for analysis results.
//!
//! This module handles:
//! - The versioned JSON report schema
//! - Writing and reading JSON reports
//! - Text summaries

pub mod json;
pub mod report;
pub mod summary;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report};
pub use report::{to_report, StatsReport};
pub use summary::{format_bytes, format_duration, render_summary};
