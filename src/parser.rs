//! Line-driven parser for LS-DYNA message files.
//!
//! A message file is free-form text with a handful of labeled header lines, a
//! timing block announced by a spaced-out `T i m i n g   i n f o r m a t i o n`
//! banner, and a footer carrying the termination status and elapsed time. All
//! values are read from fixed character ranges, see [`crate::fields`].
//!
//! ```text
//!  T i m i n g   i n f o r m a t i o n
//!                         CPU(seconds)   %CPU  Clock(seconds) %Clock
//!   ----------------------------------------------------------------
//!   Keyword Processing ... 1.0000E-02    0.00     1.1200E-02    0.00
//!     KW read ............ 0.0000E+00    0.00     5.8269E-03    0.00
//!   ----------------------------------------------------------------
//!  N o r m a l    t e r m i n a t i o n
//! ```

use log::{debug, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::fields;
use crate::models::{Measures, Record};
use crate::schema::{self, SchemaBuilder};

const TIMING_MARKER: &str = "T i m i n g   i n f o r m a t i o n";
const NORMAL_TERMINATION_MARKER: &str = "N o r m a l    t e r m i n a t i o n";
const ELAPSED_MARKER: &str = "Elapsed time";
const CPU_COUNT_MARKER: &str = "MPP execution with";

/// Lines between the timing banner and the first timing row.
const TIMING_HEADER_LINES: u8 = 2;

/// Child rows are indented by at least this much.
const CHILD_INDENT: &str = "    ";

/// Shortest run of dashes that closes the timing block.
const SEPARATOR_MIN_DASHES: usize = 23;

const NAME_RANGE: (usize, usize) = (0, 25);
const CPU_SEC_RANGE: (usize, usize) = (25, 36);
const CPU_PERCENT_RANGE: (usize, usize) = (36, 44);
// Overlaps CLOCK_PERCENT_RANGE; both match the solver's layout.
const CLOCK_SEC_RANGE: (usize, usize) = (44, 59);
const CLOCK_PERCENT_RANGE: (usize, usize) = (56, 67);

const ELAPSED_HOURS_RANGE: (usize, usize) = (30, 33);
const ELAPSED_MINUTES_RANGE: (usize, usize) = (40, 43);
const ELAPSED_SECONDS_RANGE: (usize, usize) = (48, 52);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum HeaderField {
    Version,
    Revision,
    LicensedTo,
    IssuedBy,
    Platform,
    Os,
    Compiler,
    Hostname,
    Precision,
    SvnVersion,
    InputFile,
    NumCpus,
}

const HEADER_MARKERS: [(&str, HeaderField); 12] = [
    ("Version : ", HeaderField::Version),
    ("Revision: ", HeaderField::Revision),
    ("Licensed to: ", HeaderField::LicensedTo),
    ("Issued by  : ", HeaderField::IssuedBy),
    ("Platform   : ", HeaderField::Platform),
    ("OS Level   : ", HeaderField::Os),
    ("Compiler   : ", HeaderField::Compiler),
    ("Hostname   : ", HeaderField::Hostname),
    ("Precision  : ", HeaderField::Precision),
    ("SVN Version: ", HeaderField::SvnVersion),
    ("Input file: ", HeaderField::InputFile),
    (CPU_COUNT_MARKER, HeaderField::NumCpus),
];

/// Position of the parser within a message file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Looking for header fields and the timing banner
    SeekingTiming,
    /// Skipping the column headings under the banner
    TimingHeader { remaining: u8 },
    /// Reading parent and child timing rows
    TimingBody,
    /// After the timing block; looking for termination status
    Footer,
}

/// One row of the timing block.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRow {
    pub name: String,
    pub measures: Measures,
}

/// Classification of a line inside the timing block.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyLine {
    Blank,
    Separator,
    Parent(TimingRow),
    Child(TimingRow),
}

impl BodyLine {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return BodyLine::Blank;
        }
        if trimmed.len() >= SEPARATOR_MIN_DASHES && trimmed.bytes().all(|b| b == b'-') {
            return BodyLine::Separator;
        }

        let row = TimingRow {
            name: fields::name(line, NAME_RANGE.0, NAME_RANGE.1),
            measures: Measures {
                cpu_sec: fields::float_or_zero(line, CPU_SEC_RANGE.0, CPU_SEC_RANGE.1),
                cpu_percent: fields::float_or_zero(line, CPU_PERCENT_RANGE.0, CPU_PERCENT_RANGE.1),
                clock_sec: fields::float_or_zero(line, CLOCK_SEC_RANGE.0, CLOCK_SEC_RANGE.1),
                clock_percent: fields::float_or_zero(
                    line,
                    CLOCK_PERCENT_RANGE.0,
                    CLOCK_PERCENT_RANGE.1,
                ),
            },
        };

        if line.starts_with(CHILD_INDENT) {
            BodyLine::Child(row)
        } else {
            BodyLine::Parent(row)
        }
    }
}

/// Parser for a single message file.
///
/// Feed it lines in order with [`LogParser::feed_line`] and collect the
/// [`Record`] with [`LogParser::finish`]. Every timing category is also
/// registered with the batch's [`SchemaBuilder`] as soon as it is created.
///
/// # Examples
///
/// ```
/// use lsti::parser::LogParser;
/// use lsti::schema::SchemaBuilder;
///
/// let text = "\
///  T i m i n g   i n f o r m a t i o n
///                         CPU(seconds)   %CPU  Clock(seconds) %Clock
///   ----------------------------------------------------------------
///   Keyword Processing ... 1.0000E-02    0.00     1.1200E-02    0.00
///   ----------------------------------------------------------------
/// ";
/// let mut schema = SchemaBuilder::new();
/// let record = LogParser::parse_str("messag", text, &mut schema);
/// assert_eq!(record.parents[0].name, "Keyword Processing");
/// assert_eq!(schema.finish().keys(), ["KeywordProcessing"]);
/// ```
pub struct LogParser {
    record: Record,
    state: ParseState,
    seen: HashSet<HeaderField>,
    line_number: usize,
    orphans: usize,
}

impl LogParser {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            record: Record::new(file),
            state: ParseState::SeekingTiming,
            seen: HashSet::new(),
            line_number: 0,
            orphans: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Child rows skipped because no parent row preceded them.
    pub fn orphans(&self) -> usize {
        self.orphans
    }

    /// Process one line (without its line terminator).
    pub fn feed_line(&mut self, line: &str, schema: &mut SchemaBuilder) {
        self.line_number += 1;

        match self.state {
            ParseState::SeekingTiming => {
                if line.contains(TIMING_MARKER) {
                    debug!("{}:{}: timing block found", self.record.file(), self.line_number);
                    self.state = ParseState::TimingHeader {
                        remaining: TIMING_HEADER_LINES,
                    };
                } else {
                    self.scan_header(line);
                }
            }
            ParseState::TimingHeader { remaining } => {
                self.state = if remaining > 1 {
                    ParseState::TimingHeader {
                        remaining: remaining - 1,
                    }
                } else {
                    ParseState::TimingBody
                };
            }
            ParseState::TimingBody => self.scan_body(line, schema),
            ParseState::Footer => self.scan_footer(line),
        }
    }

    pub fn finish(self) -> Record {
        debug!(
            "{}: {} parents, {} children",
            self.record.file(),
            self.record.num_parents(),
            self.record.num_children()
        );
        self.record
    }

    /// Parse a whole message file held in memory.
    pub fn parse_str(file: impl Into<String>, text: &str, schema: &mut SchemaBuilder) -> Record {
        let mut parser = Self::new(file);
        for line in text.lines() {
            parser.feed_line(line, schema);
        }
        parser.finish()
    }

    /// Parse a message file from a buffered reader.
    ///
    /// Lines are decoded leniently: invalid UTF-8 is replaced rather than
    /// rejected, and a trailing `\r` is dropped.
    pub fn parse_reader<R: BufRead>(
        file: impl Into<String>,
        mut reader: R,
        schema: &mut SchemaBuilder,
    ) -> Result<Record> {
        let mut parser = Self::new(file);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            parser.feed_line(line.trim_end_matches(['\n', '\r']), schema);
        }
        Ok(parser.finish())
    }

    /// Open and parse a message file.
    pub fn parse_file<P: AsRef<Path>>(path: P, schema: &mut SchemaBuilder) -> Result<Record> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::File {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_reader(path.to_string_lossy(), BufReader::new(file), schema).map_err(|e| {
            match e {
                Error::Io(source) => Error::File {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            }
        })
    }

    fn scan_header(&mut self, line: &str) {
        let Some(&(marker, field)) = HEADER_MARKERS
            .iter()
            .find(|(marker, _)| line.contains(*marker))
        else {
            return;
        };
        if !self.seen.insert(field) {
            debug!(
                "{}:{}: repeated '{}' ignored",
                self.record.file(),
                self.line_number,
                marker.trim()
            );
            return;
        }

        let record = &mut self.record;
        match field {
            HeaderField::Version => {
                record.version = fields::text(line, 18, 34);
                record.date = fields::text(line, 34, 55);
            }
            HeaderField::Revision => {
                record.revision = fields::int(line, 18, 34).unwrap_or_default();
                record.time = fields::text(line, 34, 55);
            }
            HeaderField::LicensedTo => record.licensed_to = fields::text(line, 21, 55),
            HeaderField::IssuedBy => record.issued_by = fields::text(line, 21, 55),
            HeaderField::Platform => record.platform = fields::text(line, 21, 55),
            HeaderField::Os => record.os = fields::text(line, 21, 55),
            HeaderField::Compiler => record.compiler = fields::text(line, 21, 55),
            HeaderField::Hostname => record.hostname = fields::text(line, 21, 55),
            HeaderField::Precision => record.precision = fields::text(line, 21, 55),
            HeaderField::SvnVersion => {
                record.svn_version = fields::int(line, 21, 55).unwrap_or_default()
            }
            HeaderField::InputFile => record.input_file = fields::text(line, 13, 84),
            HeaderField::NumCpus => {
                record.num_cpus = line
                    .split_once(CPU_COUNT_MARKER)
                    .and_then(|(_, rest)| rest.split_whitespace().next())
                    .and_then(|token| token.parse().ok())
                    .unwrap_or_default()
            }
        }
    }

    fn scan_body(&mut self, line: &str, schema: &mut SchemaBuilder) {
        match BodyLine::classify(line) {
            BodyLine::Blank => {}
            BodyLine::Separator => {
                debug!("{}:{}: timing block ends", self.record.file(), self.line_number);
                self.state = ParseState::Footer;
            }
            BodyLine::Parent(row) => {
                let parent = self.record.add_parent(row.name, row.measures);
                schema.insert(&parent.path, &parent.name);
            }
            BodyLine::Child(row) => match self.record.parents.last_mut() {
                Some(parent) => {
                    let label = format!("{}{}{}", parent.name, schema::PATH_SEPARATOR, row.name);
                    let child = parent.add_child(row.name, row.measures);
                    schema.insert(&child.path, &label);
                }
                None => {
                    warn!(
                        "{}:{}: timing row '{}' has no parent category, skipped",
                        self.record.file(),
                        self.line_number,
                        row.name
                    );
                    self.orphans += 1;
                }
            },
        }
    }

    fn scan_footer(&mut self, line: &str) {
        if line.contains(NORMAL_TERMINATION_MARKER) {
            self.record.normal_termination = true;
        } else if line.trim_start().starts_with(ELAPSED_MARKER) && self.record.elapsed_time.is_none() {
            let hours = fields::int(line, ELAPSED_HOURS_RANGE.0, ELAPSED_HOURS_RANGE.1).unwrap_or(0);
            let minutes =
                fields::int(line, ELAPSED_MINUTES_RANGE.0, ELAPSED_MINUTES_RANGE.1).unwrap_or(0);
            let seconds =
                fields::int(line, ELAPSED_SECONDS_RANGE.0, ELAPSED_SECONDS_RANGE.1).unwrap_or(0);
            let total = hours * 3600 + minutes * 60 + seconds;
            self.record.elapsed_time = Some(Duration::from_secs(total.max(0) as u64));
        }
    }
}
