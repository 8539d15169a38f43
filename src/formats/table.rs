//! ASCII table output.
//!
//! The grid has vertical borders and a header separator but no top or
//! bottom border, which also makes it a valid Markdown table:
//!
//! ```text
//! | file   | KeywordProcessing |
//! |--------|-------------------|
//! | messag | 1.5               |
//! ```

use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{ContentArrangement, Table};

use crate::formats::{rows, RenderOptions};
use crate::header::Header;
use crate::report::Report;

pub fn render(reports: &[Report], header: &Header, options: &RenderOptions) -> String {
    if header.is_empty() {
        return String::new();
    }
    grid(
        header.column_names(options.labels),
        rows::materialize(reports, header, &options.missing),
    )
}

/// Lay out `names` and `rows` as a grid, cell text unchanged.
pub fn grid(names: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(names);

    for row in rows {
        table.add_row(row);
    }

    format!("{table}\n")
}
