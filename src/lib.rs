//! # lsti
//!
//! A Rust library for extracting timing information from LS-DYNA message
//! files (`messag`, `mes0000`, ...) and rendering it as tables, CSV, TSV,
//! JSON or HTML.
//!
//! ## Features
//!
//! - **Fixed-column parsing**: header fields and timing rows are read from
//!   the solver's documented character offsets
//! - **Two-level timings**: parent categories (e.g. `Element Processing`)
//!   with their sub-categories (e.g. `Solids`)
//! - **Batch alignment**: runs with different categories share one header;
//!   absent cells are marked with a placeholder instead of a zero
//! - **Queries**: JMESPath expressions over the JSON form of a batch
//!
//! ## Quick Start
//!
//! ```no_run
//! use lsti::{build_reports, MessageReader, OutputFormat, ReportOptions, ReportWriter};
//!
//! // Parse every message file in a run directory
//! let paths = MessageReader::discover(["run"])?;
//! let batch = MessageReader::new().parse_files(&paths);
//!
//! println!("Parsed {} files", batch.len());
//!
//! // Render clock seconds as CSV
//! let options = ReportOptions::new().target(lsti::TargetMetric::ClockSec);
//! let reports = build_reports(&batch.records, &options);
//! print!("{}", ReportWriter::new(OutputFormat::Csv).render(&reports)?);
//! # Ok::<(), lsti::Error>(())
//! ```
//!
//! ## Report Contents
//!
//! Each report has a `properties` object and a `timings` array. The
//! verbosity tier selects the properties:
//!
//! - **0**: `file`
//! - **1**: adds `elapsed_time`, `version`, `svn_version`, `platform`, `compiler`
//! - **2**: adds `num_cpus`, `os`, `input_file`, `hostname`
//! - **3**: adds `revision`, `precision`, `licensed_to`, `issued_by`,
//!   `normal_termination`, `build_date`, `build_time`
//!
//! Every timing node carries the selected metric as `value`, and all four
//! measures under `measures`.
//!
//! ## Queries
//!
//! ```no_run
//! use lsti::{build_reports, MessageReader, OutputFormat, ReportOptions, ReportWriter};
//!
//! let batch = MessageReader::new().parse_files(&["messag"]);
//! let reports = build_reports(&batch.records, &ReportOptions::new());
//!
//! let json = ReportWriter::new(OutputFormat::Json)
//!     .query("[].timings[].key")
//!     .render(&reports)?;
//! # Ok::<(), lsti::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Unreadable files do not abort a batch; they are collected in
//! [`Batch::failures`]:
//!
//! ```no_run
//! use lsti::{Error, MessageReader};
//!
//! let batch = MessageReader::new().parse_files(&["missing/messag"]);
//! for failure in &batch.failures {
//!     match &failure.error {
//!         Error::File { path, source } => eprintln!("{}: {}", path.display(), source),
//!         err => eprintln!("Error: {}", err),
//!     }
//! }
//! ```

// Public API modules
pub mod error;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use formats::RenderOptions;
pub use header::Header;
pub use models::{DurationMode, OutputFormat, Record, TargetMetric};
pub use reader::{Batch, MessageReader};
pub use report::{build_reports, Report, ReportOptions};
pub use schema::Schema;
pub use writer::{ReportWriter, WriteStats};

// Internal modules (public but not part of the high-level API)
pub mod fields;
pub mod formats;
pub mod header;
pub mod models;
pub mod parser;
pub mod query;
pub mod report;
pub mod schema;
