//! Trace loading.
//!
//! Collectors export recordings either as a bare array of spans or wrapped
//! in an envelope object. Both are accepted; the envelope field is found by
//! name.

use super::schema::RecordedSpan;
use crate::plan::loader::json_kind;
use crate::utils::config::TRACE_SPAN_FIELD_NAMES;
use crate::utils::error::ParseError;
use log::debug;
use std::path::Path;

/// Parse a trace recording from JSON
///
/// # Errors
/// * `ParseError::JsonError` - spans do not match the span schema
/// * `ParseError::InvalidFormat` - no span array could be located
pub fn parse_trace(raw_trace: &serde_json::Value) -> Result<Vec<RecordedSpan>, ParseError> {
    let spans_value = locate_spans(raw_trace)?;
    let spans: Vec<RecordedSpan> = serde_json::from_value(spans_value.clone())?;

    debug!("Parsed {} recorded spans", spans.len());

    Ok(spans)
}

/// Read and parse a trace recording file
pub fn read_trace(path: impl AsRef<Path>) -> Result<Vec<RecordedSpan>, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());

    let contents = std::fs::read_to_string(path).map_err(|source| ParseError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    let raw: serde_json::Value = serde_json::from_str(&contents)?;

    parse_trace(&raw)
}

/// Find the span array inside a recording
///
/// **Private** - internal helper for parse_trace
fn locate_spans(raw_trace: &serde_json::Value) -> Result<&serde_json::Value, ParseError> {
    match raw_trace {
        serde_json::Value::Array(_) => Ok(raw_trace),

        serde_json::Value::Object(obj) => {
            for field in TRACE_SPAN_FIELD_NAMES {
                if let Some(value) = obj.get(*field) {
                    if value.is_array() {
                        debug!("Found spans under field: {}", field);
                        return Ok(value);
                    }
                    // Envelopes sometimes nest once more, e.g. {"trace": {"spans": [...]}}
                    if value.is_object() {
                        return locate_spans(value);
                    }
                }
            }
            Err(ParseError::InvalidFormat(format!(
                "no span array found; expected one of the fields: {}",
                TRACE_SPAN_FIELD_NAMES.join(", ")
            )))
        }

        other => Err(ParseError::InvalidFormat(format!(
            "trace must be a JSON array or object, got {}",
            json_kind(other)
        ))),
    }
}
