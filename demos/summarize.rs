//! Summarize the timing information of a run directory.
//!
//! Usage: `cargo run --example summarize -- <run-directory>`

use lsti::{build_reports, MessageReader, OutputFormat, ReportOptions, ReportWriter, TargetMetric};

fn main() -> Result<(), lsti::Error> {
    let dir = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());

    let paths = MessageReader::discover([&dir])?;
    let batch = MessageReader::new().parse_files(&paths);

    println!("═══════════════════════════════════════");
    println!("Timing summary for {}", dir);
    println!("═══════════════════════════════════════");
    println!();

    println!("📊 Statistics:");
    println!("  Message files: {}", batch.len());
    println!("  Unreadable: {}", batch.failures.len());
    println!("  Timing columns: {}", batch.schema.len());
    println!();

    println!("📝 Categories:");
    for (key, label) in batch.schema.iter().take(10) {
        println!("  {} ({})", key, label);
    }
    if batch.schema.len() > 10 {
        println!("  ... and {} more", batch.schema.len() - 10);
    }
    println!();

    // Slowest categories of the first file by clock time
    if let Some(record) = batch.records.first() {
        let mut parents: Vec<_> = record.parents.iter().collect();
        parents.sort_by(|a, b| b.measures.clock_sec.total_cmp(&a.measures.clock_sec));

        println!("⏱️  Slowest categories in {}:", record.file());
        for (i, parent) in parents.iter().take(5).enumerate() {
            println!(
                "  {}. {}: {:.2}s ({:.1}%)",
                i + 1,
                parent.name,
                parent.measures.clock_sec,
                parent.measures.clock_percent
            );
        }
        println!();
    }

    let options = ReportOptions::new()
        .verbosity(1)
        .target(TargetMetric::ClockPercent)
        .simple(true);
    let reports = build_reports(&batch.records, &options);
    print!("{}", ReportWriter::new(OutputFormat::Table).render(&reports)?);

    Ok(())
}
