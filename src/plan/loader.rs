//! Load physical plans from JSON.
//!
//! A plan file holds either a single plan (an object keyed by node id) or an
//! array of plans, one per sub-plan of the query. Sub-plans are kept in file
//! order because the driver's result depends on it.

use super::schema::PhysicalPlan;
use crate::utils::error::ParseError;
use log::debug;
use std::path::Path;

/// Parse one or more plans from a JSON value
pub fn parse_plans(raw: &serde_json::Value) -> Result<Vec<PhysicalPlan>, ParseError> {
    match raw {
        serde_json::Value::Array(items) => {
            debug!("Plan document holds {} sub-plans", items.len());
            items
                .iter()
                .map(|item| serde_json::from_value(item.clone()).map_err(ParseError::from))
                .collect()
        }
        serde_json::Value::Object(_) => {
            let plan: PhysicalPlan = serde_json::from_value(raw.clone())?;
            Ok(vec![plan])
        }
        other => Err(ParseError::InvalidFormat(format!(
            "plan must be a JSON object or array, got {}",
            json_kind(other)
        ))),
    }
}

/// Read every plan stored in a JSON file
pub fn read_plans(path: impl AsRef<Path>) -> Result<Vec<PhysicalPlan>, ParseError> {
    let path = path.as_ref();
    debug!("Reading plan from: {}", path.display());

    let contents = std::fs::read_to_string(path).map_err(|source| ParseError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    let raw: serde_json::Value = serde_json::from_str(&contents)?;

    parse_plans(&raw)
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
