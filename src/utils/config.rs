//! Configuration and constants for the analyzer and CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Log filter used when `--verbose` is not given
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log filter used with `--verbose`
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Field names under which a trace object may carry its spans
// (different collectors export recordings with different envelopes)
pub const TRACE_SPAN_FIELD_NAMES: &[&str] = &[
    "spans",
    "recording",
    "recordedSpans",
    "recorded_spans",
    "trace",
];
