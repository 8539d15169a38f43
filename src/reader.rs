//! High-level API for reading batches of message files.

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::Record;
use crate::parser::LogParser;
use crate::schema::{Schema, SchemaBuilder};

/// File name of the serial solver's message file.
pub const SERIAL_MESSAGE_FILE: &str = "messag";

/// A message file that could not be read.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Result of parsing a set of message files.
#[derive(Debug, Default)]
pub struct Batch {
    /// Timing columns seen across every parsed file
    pub schema: Schema,
    /// Parsed records, ordered by path
    pub records: Vec<Record>,
    /// Files that were skipped because they could not be read
    pub failures: Vec<FileFailure>,
}

impl Batch {
    /// True when no record was parsed, whether or not any file failed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Reader for batches of message files.
///
/// # Examples
///
/// ```no_run
/// use lsti::MessageReader;
///
/// let paths = MessageReader::discover(["run1", "run2/messag"])?;
/// let batch = MessageReader::new().parse_files(&paths);
///
/// println!("Parsed {} files, {} columns", batch.len(), batch.schema.len());
/// for failure in &batch.failures {
///     eprintln!("{}", failure.error);
/// }
/// # Ok::<(), lsti::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageReader {
    schema: SchemaBuilder,
}

impl MessageReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand directories into the message files they contain.
    ///
    /// A directory contributes every entry named `messag` or `mes` followed
    /// by four digits, in sorted order. Other paths are passed through
    /// unchanged, whether or not they exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be listed.
    pub fn discover<I, P>(paths: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut files = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if !path.is_dir() {
                files.push(path.to_path_buf());
                continue;
            }

            let mut found: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|p| p.is_file())
                .filter(|p| {
                    p.file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(is_message_file_name)
                })
                .collect();
            found.sort();
            debug!("{}: {} message file(s)", path.display(), found.len());
            files.extend(found);
        }
        Ok(files)
    }

    /// Parse every file in `paths`, sorted lexicographically.
    ///
    /// A file that cannot be read is recorded in [`Batch::failures`] and left
    /// out of [`Batch::records`]; the rest of the batch is still parsed.
    pub fn parse_files<P: AsRef<Path>>(mut self, paths: &[P]) -> Batch {
        let mut sorted: Vec<&Path> = paths.iter().map(AsRef::as_ref).collect();
        sorted.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));

        let mut records = Vec::with_capacity(sorted.len());
        let mut failures = Vec::new();
        for path in sorted {
            match LogParser::parse_file(path, &mut self.schema) {
                Ok(record) => records.push(record),
                Err(error) => {
                    debug!("skipping {}: {}", path.display(), error);
                    failures.push(FileFailure {
                        path: path.to_path_buf(),
                        error,
                    });
                }
            }
        }

        info!(
            "Parsed {} message file(s), {} failed, {} timing column(s)",
            records.len(),
            failures.len(),
            self.schema.len()
        );

        Batch {
            schema: self.schema.finish(),
            records,
            failures,
        }
    }
}

/// True for `messag` and `mesNNNN`.
pub fn is_message_file_name(name: &str) -> bool {
    if name == SERIAL_MESSAGE_FILE {
        return true;
    }
    name.len() == 7 && name.starts_with("mes") && name[3..].bytes().all(|b| b.is_ascii_digit())
}
