//! Conversion of parsed records into report trees.
//!
//! A [`Report`] is the serializable form of one [`Record`]: a flat, ordered
//! set of properties selected by verbosity tier, and the timing hierarchy
//! reduced to one target metric. Its JSON form is what queries operate on
//! and what every other output format is rendered from.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::models::{DurationMode, Measures, Record, TargetMetric};

/// Highest verbosity tier.
pub const MAX_VERBOSITY: u8 = 3;

/// Property names, in the order they appear in a report.
pub mod property {
    pub const FILE: &str = "file";

    pub const ELAPSED_TIME: &str = "elapsed_time";
    pub const VERSION: &str = "version";
    pub const SVN_VERSION: &str = "svn_version";
    pub const PLATFORM: &str = "platform";
    pub const COMPILER: &str = "compiler";

    pub const NUM_CPUS: &str = "num_cpus";
    pub const OS: &str = "os";
    pub const INPUT_FILE: &str = "input_file";
    pub const HOSTNAME: &str = "hostname";

    pub const REVISION: &str = "revision";
    pub const PRECISION: &str = "precision";
    pub const LICENSED_TO: &str = "licensed_to";
    pub const ISSUED_BY: &str = "issued_by";
    pub const NORMAL_TERMINATION: &str = "normal_termination";
    pub const BUILD_DATE: &str = "build_date";
    pub const BUILD_TIME: &str = "build_time";
}

/// A single report value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Flag(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Flag(value) => write!(f, "{}", value),
            Cell::Integer(value) => write!(f, "{}", value),
            Cell::Number(value) => write!(f, "{}", value),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Flag(value)
    }
}

/// Insertion-ordered name/value pairs, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(Vec<(String, Cell)>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, keeping the original position of an existing name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Cell>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Properties, A::Error> {
                let mut properties = Properties::new();
                while let Some((key, value)) = access.next_entry::<String, Cell>()? {
                    properties.insert(key, value);
                }
                Ok(properties)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

/// A sub-category in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildNode {
    pub key: String,
    #[serde(default)]
    pub label: String,
    pub value: Cell,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measures: Option<Measures>,
}

/// A top-level timing category in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingNode {
    pub key: String,
    #[serde(default)]
    pub label: String,
    pub value: Cell,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measures: Option<Measures>,
    /// `None` in simple mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildNode>>,
}

impl TimingNode {
    pub fn child(&self, key: &str) -> Option<&ChildNode> {
        self.children
            .as_deref()
            .and_then(|children| children.iter().find(|child| child.key == key))
    }
}

/// Normalized, serializable view of one message file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub properties: Properties,
    #[serde(default)]
    pub timings: Vec<TimingNode>,
}

impl Report {
    pub fn from_record(record: &Record, options: &ReportOptions) -> Self {
        Self {
            properties: properties(record, options),
            timings: record
                .parents
                .iter()
                .map(|parent| TimingNode {
                    key: parent.path.clone(),
                    label: parent.name.clone(),
                    value: options.metric_cell(&parent.measures),
                    measures: Some(parent.measures),
                    children: (!options.simple).then(|| {
                        parent
                            .children
                            .iter()
                            .map(|child| ChildNode {
                                key: child.path.clone(),
                                label: child.name.clone(),
                                value: options.metric_cell(&child.measures),
                                measures: Some(child.measures),
                            })
                            .collect()
                    }),
                })
                .collect(),
        }
    }

    pub fn timing(&self, key: &str) -> Option<&TimingNode> {
        self.timings.iter().find(|node| node.key == key)
    }
}

/// Options controlling how records become reports.
///
/// # Examples
///
/// ```
/// use lsti::{DurationMode, ReportOptions, TargetMetric};
///
/// let options = ReportOptions::new()
///     .verbosity(2)
///     .target(TargetMetric::ClockSec)
///     .duration(DurationMode::Human);
/// assert_eq!(options.verbosity_level(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    verbosity: u8,
    target: TargetMetric,
    duration: DurationMode,
    simple: bool,
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the property tier, clamped to [`MAX_VERBOSITY`].
    pub fn verbosity(mut self, level: u8) -> Self {
        self.verbosity = level.min(MAX_VERBOSITY);
        self
    }

    pub fn target(mut self, target: TargetMetric) -> Self {
        self.target = target;
        self
    }

    pub fn duration(mut self, mode: DurationMode) -> Self {
        self.duration = mode;
        self
    }

    /// Leave out child categories entirely.
    pub fn simple(mut self, simple: bool) -> Self {
        self.simple = simple;
        self
    }

    pub fn verbosity_level(&self) -> u8 {
        self.verbosity
    }

    pub fn target_metric(&self) -> TargetMetric {
        self.target
    }

    pub fn duration_mode(&self) -> DurationMode {
        self.duration
    }

    pub fn is_simple(&self) -> bool {
        self.simple
    }

    fn metric_cell(&self, measures: &Measures) -> Cell {
        let value = measures.get(self.target);
        if self.target.is_seconds() && self.duration == DurationMode::Human {
            Cell::Text(format_hms(value.max(0.0).round() as u64))
        } else {
            Cell::Number(value)
        }
    }

    fn elapsed_cell(&self, record: &Record) -> Cell {
        match (record.elapsed_time, self.duration) {
            (None, _) => Cell::Null,
            (Some(elapsed), DurationMode::Seconds) => Cell::Integer(elapsed.as_secs() as i64),
            (Some(elapsed), DurationMode::Human) => Cell::Text(format_hms(elapsed.as_secs())),
        }
    }
}

/// Build one report per record.
pub fn build_reports(records: &[Record], options: &ReportOptions) -> Vec<Report> {
    records
        .iter()
        .map(|record| Report::from_record(record, options))
        .collect()
}

/// Format whole seconds as `H:MM:SS`.
///
/// ```
/// assert_eq!(lsti::report::format_hms(3661), "1:01:01");
/// ```
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

fn properties(record: &Record, options: &ReportOptions) -> Properties {
    let mut props = Properties::new();
    props.insert(property::FILE, record.file());

    if options.verbosity >= 1 {
        props.insert(property::ELAPSED_TIME, options.elapsed_cell(record));
        props.insert(property::VERSION, record.version.as_str());
        props.insert(property::SVN_VERSION, record.svn_version);
        props.insert(property::PLATFORM, record.platform.as_str());
        props.insert(property::COMPILER, record.compiler.as_str());
    }

    if options.verbosity >= 2 {
        props.insert(property::NUM_CPUS, record.num_cpus);
        props.insert(property::OS, record.os.as_str());
        props.insert(property::INPUT_FILE, record.input_file.as_str());
        props.insert(property::HOSTNAME, record.hostname.as_str());
    }

    if options.verbosity >= 3 {
        props.insert(property::REVISION, record.revision);
        props.insert(property::PRECISION, record.precision.as_str());
        props.insert(property::LICENSED_TO, record.licensed_to.as_str());
        props.insert(property::ISSUED_BY, record.issued_by.as_str());
        props.insert(property::NORMAL_TERMINATION, record.normal_termination);
        props.insert(property::BUILD_DATE, record.date.as_str());
        props.insert(property::BUILD_TIME, record.time.as_str());
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(3661), "1:01:01");
        assert_eq!(format_hms(59), "0:00:59");
        assert_eq!(format_hms(3600), "1:00:00");
        assert_eq!(format_hms(0), "0:00:00");
        assert_eq!(format_hms(36_000 * 3), "30:00:00");
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(1.5).to_string(), "1.5");
        assert_eq!(Cell::Number(10.0).to_string(), "10");
        assert_eq!(Cell::Integer(42).to_string(), "42");
        assert_eq!(Cell::Flag(true).to_string(), "true");
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_cell_json_shapes() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[null, true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Null,
                Cell::Flag(true),
                Cell::Integer(3),
                Cell::Number(2.5),
                Cell::Text("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let mut props = Properties::new();
        props.insert("b", 1i64);
        props.insert("a", 2i64);
        props.insert("b", 3i64);
        assert_eq!(props.keys().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(props.get("b"), Some(&Cell::Integer(3)));

        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json, r#"{"b":3,"a":2}"#);
        let back: Properties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }

    #[test]
    fn test_verbosity_is_clamped() {
        assert_eq!(ReportOptions::new().verbosity(9).verbosity_level(), MAX_VERBOSITY);
    }
}
