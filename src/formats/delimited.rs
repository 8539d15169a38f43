//! CSV and TSV output.

use crate::error::{Error, Result};
use crate::formats::{rows, RenderOptions};
use crate::header::Header;
use crate::report::Report;

/// Comma-separated values with a header row.
pub fn render_csv(reports: &[Report], header: &Header, options: &RenderOptions) -> Result<String> {
    render(reports, header, options, b',', true)
}

/// Tab-separated values without a header row.
pub fn render_tsv(reports: &[Report], header: &Header, options: &RenderOptions) -> Result<String> {
    render(reports, header, options, b'\t', false)
}

fn render(
    reports: &[Report],
    header: &Header,
    options: &RenderOptions,
    delimiter: u8,
    with_header: bool,
) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    if with_header && !header.is_empty() {
        writer.write_record(header.column_names(options.labels))?;
    }
    for row in rows::materialize(reports, header, &options.missing) {
        writer.write_record(&row)?;
    }

    let data = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}
