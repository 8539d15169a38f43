//! Command-line interface for lsti.
//!
//! Parses LS-DYNA message files and prints their timing information.

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::{debug, error, info, LevelFilter};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use lsti::{
    build_reports, DurationMode, Error, MessageReader, OutputFormat, RenderOptions, ReportOptions,
    ReportWriter, TargetMetric,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Show timing information from LS-DYNA message files",
    long_about = "Extracts the timing information block and header fields from LS-DYNA message \
                  files (messag, mes0000, ...) and renders them as a table, CSV, TSV, JSON or \
                  HTML.\n\n\
                  Directories are searched for message files; files are processed in sorted order."
)]
struct Args {
    /// Message files or directories containing them
    #[arg(value_name = "PATHS", default_value = ".")]
    paths: Vec<PathBuf>,

    /// Output format [default: table for one file, csv for several]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Measure used for timing values
    #[arg(short, long, value_enum, default_value_t = TargetMetric::CpuSec)]
    target: TargetMetric,

    /// How durations are displayed
    #[arg(short, long, value_enum, default_value_t = DurationMode::Seconds)]
    duration: DurationMode,

    /// Include more header fields (repeat up to 3 times)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Omit child timing categories
    #[arg(short, long)]
    simple: bool,

    /// JMESPath expression applied to the JSON form
    #[arg(short, long, value_name = "EXPR")]
    query: Option<String>,

    /// Text for cells a file has no value for
    #[arg(long, value_name = "TEXT", default_value = lsti::formats::DEFAULT_MISSING)]
    missing: String,

    /// Show human-readable category labels in header rows
    #[arg(long)]
    labels: bool,

    /// Also write the output to FILE
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Do not print the output to stdout
    #[arg(long)]
    quiet: bool,
}

fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let paths = MessageReader::discover(&args.paths)?;
    if paths.is_empty() {
        return Err(Error::NoInput.into());
    }
    debug!("{} input file(s)", paths.len());

    let batch = MessageReader::new().parse_files(&paths);
    for failure in &batch.failures {
        error!("{}", failure.error);
    }
    if batch.is_empty() {
        anyhow::bail!("none of the {} input file(s) could be read", paths.len());
    }
    debug!("columns: {:?}", batch.schema.keys());

    let options = ReportOptions::new()
        .verbosity(args.verbose)
        .target(args.target)
        .duration(args.duration)
        .simple(args.simple);
    let reports = build_reports(&batch.records, &options);

    let format = args.format.unwrap_or(if batch.len() == 1 {
        OutputFormat::Table
    } else {
        OutputFormat::Csv
    });

    let render_options = RenderOptions::new()
        .missing(args.missing)
        .labels(args.labels);
    let mut writer = ReportWriter::new(format)
        .query(args.query.unwrap_or_default())
        .render_options(render_options);
    if let Some(path) = &args.output {
        writer = writer.output_file(path);
    }
    debug!("rendering {} report(s) as {:?}", reports.len(), writer.format());

    let stats = if args.quiet {
        writer.write_with_stats(&reports, &mut io::sink())?
    } else {
        writer.write_with_stats(&reports, &mut io::stdout().lock())?
    };

    info!("{} in {:.2?}", stats.summary(), start_time.elapsed());
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the rendered output
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    run(args)
}
