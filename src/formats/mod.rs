//! Output formats.
//!
//! Every format except JSON is laid out against a [`Header`] resolved for
//! the whole batch; the CSV, TSV and table renderers share
//! [`rows::materialize`] so that a missing category renders identically in
//! all of them.

pub mod delimited;
pub mod html;
pub mod json;
pub mod rows;
pub mod table;

use crate::error::Result;
use crate::header::Header;
use crate::models::OutputFormat;
use crate::report::Report;

/// Placeholder for cells whose key is absent from a report.
pub const DEFAULT_MISSING: &str = "n/a";

/// Options shared by the tabular renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Text written for a column the report does not have
    pub missing: String,
    /// Show human-readable category labels instead of keys in header rows
    pub labels: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(mut self, text: impl Into<String>) -> Self {
        self.missing = text.into();
        self
    }

    pub fn labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            missing: DEFAULT_MISSING.to_string(),
            labels: false,
        }
    }
}

/// Render `reports` in `format`.
///
/// `header` must have been resolved from `reports`; it is ignored for JSON.
pub fn render(
    format: OutputFormat,
    reports: &[Report],
    header: &Header,
    options: &RenderOptions,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::render(reports),
        OutputFormat::Csv => delimited::render_csv(reports, header, options),
        OutputFormat::Tsv => delimited::render_tsv(reports, header, options),
        OutputFormat::Table => Ok(table::render(reports, header, options)),
        OutputFormat::Html => Ok(html::render(reports, header, options)),
    }
}
