//! HTML output: the table rendering converted from Markdown.
//!
//! Cell text is escaped before it reaches the Markdown parser, so a `|` or
//! an inline tag in a value is rendered literally.

use pulldown_cmark::{html, Options, Parser};

use crate::formats::{rows, table, RenderOptions};
use crate::header::Header;
use crate::report::Report;

pub fn render(reports: &[Report], header: &Header, options: &RenderOptions) -> String {
    if header.is_empty() {
        return String::new();
    }

    let names: Vec<String> = header
        .column_names(options.labels)
        .iter()
        .map(|name| escape_cell(name))
        .collect();
    let rows: Vec<Vec<String>> = rows::materialize(reports, header, &options.missing)
        .iter()
        .map(|row| row.iter().map(|cell| escape_cell(cell)).collect())
        .collect();
    markdown_to_html(&table::grid(names, rows))
}

/// Convert a Markdown document (with GFM tables) to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
    let mut output = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut output, parser);
    output
}

/// Escape `text` so that it reads as one literal Markdown table cell.
pub fn escape_cell(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            c if c.is_ascii_punctuation() => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("<b>"), "&lt;b&gt;");
        assert_eq!(escape_cell("x & y"), "x &amp; y");
        assert_eq!(escape_cell("*x*"), "\\*x\\*");
        assert_eq!(escape_cell("plain 12"), "plain 12");
    }

    #[test]
    fn test_escaped_cell_round_trips() {
        let markdown = format!(
            "| {} |\n|---|\n| {} |\n",
            escape_cell("h|1"),
            escape_cell("a|<i>b</i>")
        );
        let html = markdown_to_html(&markdown);
        assert!(html.contains("<th>h|1</th>"));
        assert!(html.contains("<td>a|&lt;i&gt;b&lt;/i&gt;</td>"));
    }
}
