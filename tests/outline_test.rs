//! Tests for outline record extraction from XML files

use std::path::PathBuf;

use tempfile::TempDir;

use varmap::errors::VarmapError;
use varmap::outline::{read_outline_file, OutlineRecord, DEFAULT_NAMESPACE};

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write input file");
    path
}

fn mindmap_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<Project xmlns="http://schemas.microsoft.com/project">
  <Tasks>
    <Task>
      <Name>Acme Corp</Name>
      <OutlineNumber>1</OutlineNumber>
      <OutlineLevel>1</OutlineLevel>
    </Task>
    <Task>
      <Name>Widget</Name>
      <OutlineNumber>1.1</OutlineNumber>
      <OutlineLevel>2</OutlineLevel>
    </Task>
  </Tasks>
</Project>"#
}

#[test]
fn given_valid_export_when_reading_then_extracts_records_in_order() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "mindmap.xml", mindmap_xml());

    // Act
    let records = read_outline_file(&path, DEFAULT_NAMESPACE).unwrap();

    // Assert
    assert_eq!(
        records,
        vec![
            OutlineRecord::new("Acme Corp", "1", 1),
            OutlineRecord::new("Widget", "1.1", 2),
        ]
    );
}

#[test]
fn given_wrong_extension_when_reading_then_rejects_before_parsing() {
    // A .txt file with content that would also fail parsing: the error must
    // be InvalidInput, proving the extension check comes first.
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "mindmap.txt", "not xml at all");

    let err = read_outline_file(&path, DEFAULT_NAMESPACE).unwrap_err();

    assert!(matches!(err, VarmapError::InvalidInput { .. }));
}

#[test]
fn given_missing_file_when_reading_then_invalid_input() {
    let err = read_outline_file(
        &PathBuf::from("/nonexistent/mindmap.xml"),
        DEFAULT_NAMESPACE,
    )
    .unwrap_err();

    assert!(matches!(err, VarmapError::InvalidInput { .. }));
}

#[test]
fn given_export_with_bom_when_reading_then_parses() {
    let temp = TempDir::new().unwrap();
    let content = format!("\u{feff}{}", mindmap_xml());
    let path = write_file(&temp, "mindmap.xml", &content);

    let records = read_outline_file(&path, DEFAULT_NAMESPACE).unwrap();

    assert_eq!(records.len(), 2);
}

#[test]
fn given_task_missing_name_when_reading_then_malformed() {
    let temp = TempDir::new().unwrap();
    let path = write_file(
        &temp,
        "mindmap.xml",
        r#"<Project xmlns="http://schemas.microsoft.com/project">
  <Tasks>
    <Task>
      <OutlineNumber>1</OutlineNumber>
      <OutlineLevel>1</OutlineLevel>
    </Task>
  </Tasks>
</Project>"#,
    );

    let err = read_outline_file(&path, DEFAULT_NAMESPACE).unwrap_err();

    assert!(matches!(err, VarmapError::MalformedDocument(_)));
}

#[test]
fn given_document_without_tasks_when_reading_then_malformed() {
    let temp = TempDir::new().unwrap();
    let path = write_file(
        &temp,
        "mindmap.xml",
        r#"<Project xmlns="http://schemas.microsoft.com/project"></Project>"#,
    );

    let err = read_outline_file(&path, DEFAULT_NAMESPACE).unwrap_err();

    assert!(matches!(err, VarmapError::MalformedDocument(_)));
}
