//! JSON output, and the JSON intermediate form the other formats start from.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::report::Report;

/// Pretty-printed JSON (2-space indent) followed by a newline.
pub fn render(reports: &[Report]) -> Result<String> {
    Ok(format!("{}\n", to_json(reports)?))
}

pub fn to_json(reports: &[Report]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Read reports back from their JSON form.
///
/// Accepts an array of reports or a single report object.
///
/// # Errors
///
/// Returns [`Error::Shape`] if the document is not made of reports, which
/// happens when a query reshapes the batch into something else.
pub fn from_json(json: &str) -> Result<Vec<Report>> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(|e| Error::Shape(e.to_string())),
        Value::Object(_) => serde_json::from_value(value)
            .map(|report| vec![report])
            .map_err(|e| Error::Shape(e.to_string())),
        other => Err(Error::Shape(format!(
            "expected an array of reports or a report object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
