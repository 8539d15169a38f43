#![allow(dead_code)]

/// Test utilities for building message files
use std::fs;
use std::path::{Path, PathBuf};

/// Timing row measures: cpu seconds, cpu percent, clock seconds, clock percent
pub type Row = [f64; 4];

/// Builder for creating message file text in the solver's column layout
pub struct MessageFileBuilder {
    lines: Vec<String>,
}

impl MessageFileBuilder {
    /// Create an empty message file
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a raw line
    pub fn line(mut self, text: &str) -> Self {
        self.lines.push(text.to_string());
        self
    }

    /// Add the banner box lines carrying version (18..34) and build date (34..55)
    pub fn version(self, version: &str, date: &str) -> Self {
        let line = format!("{:<18}{:<16}{:<21}|", "     |  Version : ", version, date);
        self.line(&line)
    }

    /// Add the revision (18..34) and build time (34..55) line
    pub fn revision(self, revision: i64, time: &str) -> Self {
        let line = format!("{:<18}{:<16}{:<21}|", "     |  Revision: ", revision, time);
        self.line(&line)
    }

    /// Add a labeled banner field whose value starts at column 21.
    ///
    /// `marker` is one of the 13-character markers, e.g. `"Platform   : "`.
    pub fn field(self, marker: &str, value: &str) -> Self {
        assert_eq!(marker.len(), 13, "banner markers are 13 characters wide");
        let line = format!("     |  {}{:<34}|", marker, value);
        self.line(&line)
    }

    /// Add the input file line (value at 13..84)
    pub fn input_file(self, path: &str) -> Self {
        let line = format!(" Input file: {}", path);
        self.line(&line)
    }

    /// Add the MPP processor count line
    pub fn mpp_procs(self, procs: i64) -> Self {
        let line = format!(" MPP execution with {:>8} procs", procs);
        self.line(&line)
    }

    /// Add the timing banner and its two heading lines
    pub fn timing_start(self) -> Self {
        self.line("")
            .line(" T i m i n g   i n f o r m a t i o n")
            .line("                         CPU(seconds)   %CPU  Clock(seconds) %Clock")
            .line(&format!("  {}", "-".repeat(64)))
    }

    /// Add a parent timing row
    pub fn parent(self, name: &str, row: Row) -> Self {
        let line = timing_row("  ", name, row);
        self.line(&line)
    }

    /// Add a child timing row
    pub fn child(self, name: &str, row: Row) -> Self {
        let line = timing_row("    ", name, row);
        self.line(&line)
    }

    /// Add the dashed line closing the timing block
    pub fn timing_end(self) -> Self {
        self.line(&format!("  {}", "-".repeat(64)))
    }

    /// Add the normal termination banner
    pub fn normal_termination(self) -> Self {
        self.line(" N o r m a l    t e r m i n a t i o n")
    }

    /// Add the elapsed time line (hours 30..33, minutes 40..43, seconds 48..52)
    pub fn elapsed(self, hours: i64, minutes: i64, seconds: i64) -> Self {
        let line = format!(
            "{:<30}{:>3}{:<7}{:>3}{:<5}{:>4} sec.)",
            " Elapsed time     1234 seconds",
            hours,
            " hours ",
            minutes,
            " min ",
            seconds
        );
        self.line(&line)
    }

    /// Build and return the message file text
    pub fn build(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Write the message file into `dir` under `name`
    pub fn write_to(self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, self.build()).unwrap();
        path
    }
}

impl Default for MessageFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a timing row: name with dot leaders in 0..25, then the four
/// measures right-aligned so that each column parses on its own.
pub fn timing_row(indent: &str, name: &str, row: Row) -> String {
    let label = format!("{}{} ", indent, name);
    format!(
        "{:.<25}{:>11.4}{:>8.2}{:>12.4}{:>11.2}",
        label, row[0], row[1], row[2], row[3]
    )
}

/// A complete message file with a typical header, timing block and footer
pub fn sample_message_file() -> MessageFileBuilder {
    MessageFileBuilder::new()
        .line("     ________________________________________________________")
        .version("ls-dyna", "05/18/2021")
        .revision(129956, "12:34:56")
        .field("Licensed to: ", "ACME Engineering")
        .field("Issued by  : ", "LST")
        .field("Platform   : ", "LINUX X86_64")
        .field("OS Level   : ", "Linux CentOS 7.9")
        .field("Compiler   : ", "Intel Fortran XE 2019")
        .field("Hostname   : ", "node01")
        .field("Precision  : ", "Single precision (I4R4)")
        .field("SVN Version: ", "129956")
        .line("")
        .input_file("model/main.k")
        .mpp_procs(16)
        .line(" ... normal solver output ...")
        .timing_start()
        .parent("Keyword Processing", [1.5, 10.0, 2.0, 12.0])
        .child("KW read", [0.5, 3.0, 0.75, 4.5])
        .child("KW check", [1.0, 7.0, 1.25, 7.5])
        .parent("Element processing", [10.0, 60.0, 11.0, 65.0])
        .child("Solids", [6.0, 40.0, 6.5, 38.0])
        .child("Shells", [4.0, 20.0, 4.5, 27.0])
        .parent("Contact algorithm", [5.0, 30.0, 4.0, 23.0])
        .timing_end()
        .line(" T o t a l s            1.6500E+01  100.00     1.7000E+01  100.00")
        .line("")
        .normal_termination()
        .elapsed(1, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_row_columns() {
        let line = timing_row("  ", "Keyword Processing", [1.5, 10.0, 2.0, 12.0]);
        assert_eq!(&line[..25], "  Keyword Processing .....");
        assert_eq!(line[25..36].trim(), "1.5000");
        assert_eq!(line[36..44].trim(), "10.00");
        assert_eq!(line[44..59].trim(), "2.0000");
        assert_eq!(line[56..67].trim(), "12.00");
    }

    #[test]
    fn test_elapsed_columns() {
        let text = MessageFileBuilder::new().elapsed(2, 3, 4).build();
        let line = text.trim_end_matches('\n');
        assert_eq!(line[30..33].trim(), "2");
        assert_eq!(line[40..43].trim(), "3");
        assert_eq!(line[48..52].trim(), "4");
    }

    #[test]
    fn test_banner_columns() {
        let text = MessageFileBuilder::new()
            .version("ls-dyna", "05/18/2021")
            .field("Platform   : ", "LINUX")
            .build();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0][18..34].trim(), "ls-dyna");
        assert_eq!(lines[0][34..55].trim(), "05/18/2021");
        assert_eq!(lines[1][21..55].trim(), "LINUX");
    }
}
