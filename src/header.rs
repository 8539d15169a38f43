//! Column layout shared by every report in a batch.
//!
//! Reports in one batch rarely have identical keys: runs with different
//! element types produce different timing categories. [`Header::resolve`]
//! takes the union, in first-seen order, so that every report can be laid
//! out against the same columns.

use std::collections::{HashMap, HashSet};

use crate::report::Report;

/// A child column under a [`TimingColumn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildColumn {
    pub key: String,
    pub label: String,
}

/// A parent timing column and the child columns seen under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingColumn {
    pub key: String,
    pub label: String,
    pub children: Vec<ChildColumn>,
}

/// One column of a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column<'a> {
    Property(&'a str),
    Parent(&'a TimingColumn),
    Child {
        parent: &'a TimingColumn,
        child: &'a ChildColumn,
    },
}

impl Column<'_> {
    /// Display name: the key, or the human label when `labels` is set.
    pub fn name(&self, labels: bool) -> &str {
        match self {
            Column::Property(name) => name,
            Column::Parent(parent) if labels && !parent.label.is_empty() => &parent.label,
            Column::Parent(parent) => &parent.key,
            Column::Child { child, .. } if labels && !child.label.is_empty() => &child.label,
            Column::Child { child, .. } => &child.key,
        }
    }
}

/// Ordered, deduplicated columns for a batch of reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub properties: Vec<String>,
    pub timings: Vec<TimingColumn>,
}

impl Header {
    /// Derive the header for `reports`.
    ///
    /// Properties come first in first-seen order, then every parent key in
    /// first-seen order; each parent lists the union of the child keys seen
    /// under it anywhere in the batch.
    pub fn resolve(reports: &[Report]) -> Self {
        let mut header = Header::default();
        let mut seen_properties = HashSet::new();
        let mut parent_index: HashMap<String, usize> = HashMap::new();
        let mut seen_children: Vec<HashSet<String>> = Vec::new();

        for report in reports {
            for name in report.properties.keys() {
                if seen_properties.insert(name.to_string()) {
                    header.properties.push(name.to_string());
                }
            }

            for node in &report.timings {
                let index = *parent_index.entry(node.key.clone()).or_insert_with(|| {
                    header.timings.push(TimingColumn {
                        key: node.key.clone(),
                        label: node.label.clone(),
                        children: Vec::new(),
                    });
                    seen_children.push(HashSet::new());
                    header.timings.len() - 1
                });

                for child in node.children.iter().flatten() {
                    if seen_children[index].insert(child.key.clone()) {
                        header.timings[index].children.push(ChildColumn {
                            key: child.key.clone(),
                            label: child.label.clone(),
                        });
                    }
                }
            }
        }

        header
    }

    /// Sort the property columns by their position in `order`.
    ///
    /// Names missing from `order` go last, in their current relative order.
    pub fn order_properties_by(&mut self, order: &[String]) {
        let rank = |name: &String| {
            order
                .iter()
                .position(|known| known == name)
                .unwrap_or(order.len())
        };
        self.properties.sort_by_key(rank);
    }

    /// Columns in row order: properties, then each parent followed by its children.
    pub fn columns(&self) -> Vec<Column<'_>> {
        let mut columns: Vec<Column<'_>> = self
            .properties
            .iter()
            .map(|name| Column::Property(name))
            .collect();
        for parent in &self.timings {
            columns.push(Column::Parent(parent));
            columns.extend(
                parent
                    .children
                    .iter()
                    .map(|child| Column::Child { parent, child }),
            );
        }
        columns
    }

    pub fn column_names(&self, labels: bool) -> Vec<String> {
        self.columns()
            .iter()
            .map(|column| column.name(labels).to_string())
            .collect()
    }

    /// Total number of columns.
    pub fn len(&self) -> usize {
        self.properties.len()
            + self
                .timings
                .iter()
                .map(|parent| 1 + parent.children.len())
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
