//! JMESPath queries over the JSON form of a report batch.

use log::debug;

use crate::error::{Error, Result};

/// Apply `expression` to `json` and return the pretty-printed result.
///
/// # Errors
///
/// Returns [`Error::Query`] if the expression does not compile or cannot be
/// evaluated against the document.
///
/// # Examples
///
/// ```
/// let out = lsti::query::query(r#"[{"a": "x"}, {"a": "y"}]"#, "[].a")?;
/// assert_eq!(serde_json::from_str::<serde_json::Value>(&out)?, serde_json::json!(["x", "y"]));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn query(json: &str, expression: &str) -> Result<String> {
    let compiled = jmespath::compile(expression).map_err(|e| Error::Query(e.to_string()))?;
    let data = jmespath::Variable::from_json(json).map_err(Error::Query)?;
    let result = compiled
        .search(data)
        .map_err(|e| Error::Query(e.to_string()))?;
    debug!("query '{}' evaluated", expression);
    Ok(serde_json::to_string_pretty(&*result)?)
}
