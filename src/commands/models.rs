use crate::analyzer::ContentionSource;
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Plan files, analyzed in order; each may hold several sub-plans
    pub plan_paths: Vec<PathBuf>,

    /// Trace recording shared by every plan
    pub trace_path: PathBuf,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Pin run-to-run varying measurements
    pub deterministic: bool,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Series the query-level contention time is taken from
    pub contention_source: ContentionSource,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            plan_paths: Vec::new(),
            trace_path: PathBuf::from("trace.json"),
            output_json: None,
            deterministic: false,
            print_summary: false,
            contention_source: ContentionSource::default(),
        }
    }
}
