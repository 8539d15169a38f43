mod common;

use common::{sample_message_file, MessageFileBuilder};
use lsti::reader::is_message_file_name;
use lsti::{Error, MessageReader};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn keyword_only() -> MessageFileBuilder {
    MessageFileBuilder::new()
        .field("Hostname   : ", "node01")
        .timing_start()
        .parent("Keyword Processing", [1.0, 5.0, 1.5, 6.0])
        .timing_end()
        .normal_termination()
}

fn contact_only() -> MessageFileBuilder {
    MessageFileBuilder::new()
        .field("Hostname   : ", "node02")
        .timing_start()
        .parent("Contact algorithm", [2.0, 5.0, 2.5, 6.0])
        .child("Sorting", [1.0, 2.0, 1.0, 2.0])
        .timing_end()
}

// ============================================================================
// DISCOVERY TESTS
// ============================================================================

#[test]
fn test_message_file_names() {
    assert!(is_message_file_name("messag"));
    assert!(is_message_file_name("mes0000"));
    assert!(is_message_file_name("mes0127"));
    assert!(!is_message_file_name("mes12"));
    assert!(!is_message_file_name("mes00000"));
    assert!(!is_message_file_name("mesabcd"));
    assert!(!is_message_file_name("messag.txt"));
    assert!(!is_message_file_name("d3hsp"));
}

#[test]
fn test_discover_directory() {
    let dir = TempDir::new().unwrap();
    for name in ["mes0001", "messag", "mes0000", "d3hsp", "notes.txt"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    fs::create_dir(dir.path().join("mes0002")).unwrap();

    let found = MessageReader::discover([dir.path()]).unwrap();
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["mes0000", "mes0001", "messag"]);
}

#[test]
fn test_discover_passes_files_through() {
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("run.log");
    fs::write(&explicit, "").unwrap();
    let absent = dir.path().join("absent");

    let found = MessageReader::discover([&explicit, &absent]).unwrap();
    assert_eq!(found, vec![explicit, absent]);
}

#[test]
fn test_discover_empty_directory() {
    let dir = TempDir::new().unwrap();
    let found = MessageReader::discover([dir.path()]).unwrap();
    assert!(found.is_empty());
}

// ============================================================================
// BATCH TESTS
// ============================================================================

#[test]
fn test_parse_files_in_sorted_order() {
    let dir = TempDir::new().unwrap();
    let b = contact_only().write_to(dir.path(), "b/messag");
    let a = keyword_only().write_to(dir.path(), "a/messag");

    let batch = MessageReader::new().parse_files(&[b.clone(), a.clone()]);
    assert_eq!(batch.len(), 2);
    assert!(batch.failures.is_empty());
    assert_eq!(batch.records[0].file(), a.to_string_lossy());
    assert_eq!(batch.records[1].file(), b.to_string_lossy());
    assert_eq!(batch.records[0].hostname, "node01");
    assert_eq!(batch.records[1].hostname, "node02");
}

#[test]
fn test_batch_schema_is_union() {
    let dir = TempDir::new().unwrap();
    let a = keyword_only().write_to(dir.path(), "a/messag");
    let b = contact_only().write_to(dir.path(), "b/messag");
    let c = sample_message_file().write_to(dir.path(), "c/messag");

    let batch = MessageReader::new().parse_files(&[c, b, a]);
    assert_eq!(
        batch.schema.keys(),
        [
            "KeywordProcessing",
            "ContactAlgorithm",
            "ContactAlgorithm/Sorting",
            "KeywordProcessing/KWRead",
            "KeywordProcessing/KWCheck",
            "ElementProcessing",
            "ElementProcessing/Solids",
            "ElementProcessing/Shells",
        ]
    );
    assert_eq!(batch.schema.label("ContactAlgorithm"), Some("Contact algorithm"));
}

#[test]
fn test_unreadable_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let good = keyword_only().write_to(dir.path(), "mes0000");
    let missing = dir.path().join("mes0001");

    let batch = MessageReader::new().parse_files(&[good, missing.clone()]);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].path, missing);
    assert!(matches!(batch.failures[0].error, Error::File { .. }));
    assert_eq!(batch.schema.keys(), ["KeywordProcessing"]);
}

#[test]
fn test_all_files_unreadable() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = ["mes0000", "mes0001"]
        .iter()
        .map(|name| dir.path().join(name))
        .collect();

    let batch = MessageReader::new().parse_files(&paths);
    assert!(batch.is_empty());
    assert_eq!(batch.failures.len(), 2);
    assert!(batch.schema.is_empty());
}

#[test]
fn test_empty_input() {
    let batch = MessageReader::new().parse_files::<PathBuf>(&[]);
    assert!(batch.is_empty());
    assert!(batch.failures.is_empty());
}

#[test]
fn test_discover_then_parse() {
    let dir = TempDir::new().unwrap();
    sample_message_file().write_to(dir.path(), "mes0001");
    keyword_only().write_to(dir.path(), "mes0000");

    let paths = MessageReader::discover([dir.path()]).unwrap();
    let batch = MessageReader::new().parse_files(&paths);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.records[0].num_parents(), 1);
    assert_eq!(batch.records[1].num_parents(), 3);
}
