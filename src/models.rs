use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::schema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
    Html,
}

/// Measure used for every timing cell of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum TargetMetric {
    #[default]
    #[value(name = "cpusec")]
    #[serde(rename = "cpusec")]
    CpuSec,
    #[value(name = "pcpu")]
    #[serde(rename = "pcpu")]
    CpuPercent,
    #[value(name = "clocksec")]
    #[serde(rename = "clocksec")]
    ClockSec,
    #[value(name = "pclock")]
    #[serde(rename = "pclock")]
    ClockPercent,
}

impl TargetMetric {
    /// True for the measures expressed in seconds.
    pub fn is_seconds(self) -> bool {
        matches!(self, TargetMetric::CpuSec | TargetMetric::ClockSec)
    }

    pub fn name(self) -> &'static str {
        match self {
            TargetMetric::CpuSec => "cpusec",
            TargetMetric::CpuPercent => "pcpu",
            TargetMetric::ClockSec => "clocksec",
            TargetMetric::ClockPercent => "pclock",
        }
    }
}

impl fmt::Display for TargetMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How durations are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationMode {
    /// Plain number of seconds
    #[default]
    Seconds,
    /// `H:MM:SS`
    #[value(alias = "human-readable")]
    Human,
}

/// The four measures reported for each timing category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measures {
    pub cpu_sec: f64,
    pub cpu_percent: f64,
    pub clock_sec: f64,
    pub clock_percent: f64,
}

impl Measures {
    pub fn new(cpu_sec: f64, cpu_percent: f64, clock_sec: f64, clock_percent: f64) -> Self {
        Self {
            cpu_sec,
            cpu_percent,
            clock_sec,
            clock_percent,
        }
    }

    pub fn get(&self, target: TargetMetric) -> f64 {
        match target {
            TargetMetric::CpuSec => self.cpu_sec,
            TargetMetric::CpuPercent => self.cpu_percent,
            TargetMetric::ClockSec => self.clock_sec,
            TargetMetric::ClockPercent => self.clock_percent,
        }
    }
}

/// A sub-category of a timing category (e.g. `Solids`).
#[derive(Debug, Clone, PartialEq)]
pub struct ChildEntry {
    pub name: String,
    pub path: String,
    pub measures: Measures,
}

/// A top-level timing category (e.g. `Keyword Processing`).
#[derive(Debug, Clone, PartialEq)]
pub struct ParentEntry {
    pub name: String,
    pub path: String,
    pub measures: Measures,
    pub children: Vec<ChildEntry>,
}

impl ParentEntry {
    pub fn new(name: impl Into<String>, measures: Measures) -> Self {
        let name = name.into();
        Self {
            path: schema::normalize(&name),
            name,
            measures,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, name: impl Into<String>, measures: Measures) -> &ChildEntry {
        let name = name.into();
        let child = ChildEntry {
            path: schema::join(&self.path, &schema::normalize(&name)),
            name,
            measures,
        };
        self.children.push(child);
        &self.children[self.children.len() - 1]
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }
}

/// Everything parsed from one message file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    file: String,

    pub version: String,
    pub revision: i64,
    pub date: String,
    pub time: String,
    pub licensed_to: String,
    pub issued_by: String,
    pub platform: String,
    pub os: String,
    pub compiler: String,
    pub hostname: String,
    pub precision: String,
    pub svn_version: i64,
    pub num_cpus: i64,
    pub input_file: String,

    pub normal_termination: bool,
    pub elapsed_time: Option<Duration>,

    pub parents: Vec<ParentEntry>,
}

impl Record {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Path of the message file this record was parsed from.
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn add_parent(&mut self, name: impl Into<String>, measures: Measures) -> &mut ParentEntry {
        self.parents.push(ParentEntry::new(name, measures));
        let last = self.parents.len() - 1;
        &mut self.parents[last]
    }

    pub fn num_parents(&self) -> usize {
        self.parents.len()
    }

    pub fn num_children(&self) -> usize {
        self.parents.iter().map(ParentEntry::num_children).sum()
    }

    /// Number of parents plus number of children.
    pub fn num_entries(&self) -> usize {
        self.num_parents() + self.num_children()
    }
}
