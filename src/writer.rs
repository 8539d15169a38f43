//! High-level API for rendering reports to text, stdout and files.

use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::formats::{self, RenderOptions};
use crate::header::Header;
use crate::models::OutputFormat;
use crate::query;
use crate::report::Report;

/// Renders a batch of reports in one output format.
///
/// The reports are first serialized to JSON. If a query is set it is applied
/// to that JSON; non-JSON formats are then rendered from the (possibly
/// reshaped) JSON against a header resolved for the result, with property
/// columns kept in their pre-query order.
///
/// # Examples
///
/// ```no_run
/// use lsti::{build_reports, MessageReader, OutputFormat, ReportOptions, ReportWriter};
///
/// let batch = MessageReader::new().parse_files(&["messag"]);
/// let reports = build_reports(&batch.records, &ReportOptions::new().verbosity(1));
///
/// let text = ReportWriter::new(OutputFormat::Csv)
///     .missing("-")
///     .render(&reports)?;
/// print!("{}", text);
/// # Ok::<(), lsti::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReportWriter {
    format: OutputFormat,
    query: Option<String>,
    options: RenderOptions,
    output_file: Option<PathBuf>,
}

impl ReportWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            query: None,
            options: RenderOptions::default(),
            output_file: None,
        }
    }

    /// Set a JMESPath expression; an empty expression means no query.
    pub fn query(mut self, expression: impl Into<String>) -> Self {
        let expression = expression.into();
        self.query = (!expression.is_empty()).then_some(expression);
        self
    }

    /// Set the placeholder for absent cells. Default is `n/a`.
    pub fn missing(mut self, text: impl Into<String>) -> Self {
        self.options = self.options.missing(text);
        self
    }

    /// Show human-readable labels in header rows.
    pub fn labels(mut self, labels: bool) -> Self {
        self.options = self.options.labels(labels);
        self
    }

    pub fn render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Also write the rendered text to `path`.
    pub fn output_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render `reports` to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is malformed, or if its result cannot be
    /// laid out as a table in a non-JSON format.
    pub fn render(&self, reports: &[Report]) -> Result<String> {
        let mut json = formats::json::to_json(reports)?;
        if let Some(expression) = &self.query {
            json = query::query(&json, expression)?;
        }
        if self.format == OutputFormat::Json {
            return Ok(format!("{}\n", json));
        }

        let rendered = formats::json::from_json(&json)?;
        let mut header = Header::resolve(&rendered);
        if self.query.is_some() {
            // Query results come back with object keys sorted
            header.order_properties_by(&Header::resolve(reports).properties);
        }
        debug!(
            "{} report(s) laid out over {} column(s)",
            rendered.len(),
            header.len()
        );
        formats::render(self.format, &rendered, &header, &self.options)
    }

    /// Render `reports`, write them to `out`, and to the output file if one is set.
    pub fn write_with_stats<W: Write>(&self, reports: &[Report], out: &mut W) -> Result<WriteStats> {
        let text = self.render(reports)?;
        out.write_all(text.as_bytes())?;
        out.flush()?;

        if let Some(path) = &self.output_file {
            fs::write(path, &text)?;
            info!("Wrote {} bytes to {}", text.len(), path.display());
        }

        Ok(WriteStats {
            num_reports: reports.len(),
            num_bytes: text.len(),
            output_file: self.output_file.clone(),
        })
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStats {
    /// Number of reports rendered
    pub num_reports: usize,
    /// Size of the rendered text
    pub num_bytes: usize,
    /// File the text was duplicated to, if any
    pub output_file: Option<PathBuf>,
}

impl WriteStats {
    /// Get a human-readable summary of the write operation.
    pub fn summary(&self) -> String {
        match &self.output_file {
            Some(path) => format!(
                "Rendered {} report(s), {} bytes, copied to {}",
                self.num_reports,
                self.num_bytes,
                path.display()
            ),
            None => format!(
                "Rendered {} report(s), {} bytes",
                self.num_reports, self.num_bytes
            ),
        }
    }
}
