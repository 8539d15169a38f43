use crate::header::{Column, Header};
use crate::report::Report;

/// Lay out every report against `header`, one row of cell strings each.
///
/// A property or timing key that a report does not have is written as
/// `missing`, so an absent category never looks like a zero measurement.
pub fn materialize(reports: &[Report], header: &Header, missing: &str) -> Vec<Vec<String>> {
    let columns = header.columns();
    reports
        .iter()
        .map(|report| row(report, &columns, missing))
        .collect()
}

fn row(report: &Report, columns: &[Column<'_>], missing: &str) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            let value = match column {
                Column::Property(name) => report.properties.get(name),
                Column::Parent(parent) => report.timing(&parent.key).map(|node| &node.value),
                Column::Child { parent, child } => report
                    .timing(&parent.key)
                    .and_then(|node| node.child(&child.key))
                    .map(|node| &node.value),
            };
            value.map_or_else(|| missing.to_string(), ToString::to_string)
        })
        .collect()
}
