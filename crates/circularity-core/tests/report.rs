use std::fs;
use std::path::PathBuf;

use circularity_core::parser::{parse_table, ParserError};
use circularity_core::{
    export_report, read_table, write_report, AnalysisReport, CircularityEngine, CoreError,
    ProductSystem,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../circularity-parser/tests/data/complete_supply_chain.csv")
}

fn analysed() -> (ProductSystem, circularity_core::CircularityResult) {
    let table = read_table(&fixture_path(), ';').unwrap();
    let system = ProductSystem::new(table.data, 100, 100);
    let result = CircularityEngine::new(&system).compute();
    (system, result)
}

#[test]
fn exported_report_starts_with_processes_section() {
    let (system, result) = analysed();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");

    export_report(&path, &system, &result, ';').unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let first_line = content.lines().next().unwrap();
    assert!(first_line.contains(";;;Processes;;;"));
    assert!(content.contains(";;;Raw Material Extraction;Extraction;;"));
    assert!(content.contains("Product Life Time"));
    assert!(content.contains("Circularity Index"));
}

fn processes_section(content: &str) -> Vec<&str> {
    content
        .lines()
        .take_while(|line| !line.contains("Product System Info"))
        .collect()
}

#[test]
fn process_blocks_below_the_title_parse_back() {
    let (system, result) = analysed();
    let mut buffer = Vec::new();
    write_report(&mut buffer, &system, &result, ';').unwrap();
    let content = String::from_utf8(buffer).unwrap();

    let section = processes_section(&content);
    assert_eq!(section[0], ";;;Processes;;;");
    let reparsed = parse_table(&section[1..].join("\n"), ';').unwrap();

    assert_eq!(reparsed.len(), system.processes().len());
    for (left, right) in reparsed.processes().iter().zip(system.processes()) {
        assert_eq!(left.name, right.name);
        assert_eq!(left.category, right.category);
        assert_eq!(left.input_flows.len(), right.input_flows.len());
        assert_eq!(left.output_flows.len(), right.output_flows.len());
        for (a, b) in left.output_flows.iter().zip(&right.output_flows) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.unit, b.unit);
            assert!((a.value - b.value).abs() < 1e-9);
        }
    }
}

#[test]
fn section_title_row_is_not_a_process_header() {
    let (system, result) = analysed();
    let mut buffer = Vec::new();
    write_report(&mut buffer, &system, &result, ';').unwrap();
    let content = String::from_utf8(buffer).unwrap();

    // The title opens a block, so the real header and caption are skipped
    // and the column-caption row is read as a flow.
    let whole_section = processes_section(&content).join("\n");
    match parse_table(&whole_section, ';') {
        Err(ParserError::InvalidNumericField { line, value, .. }) => {
            assert_eq!(line, 4);
            assert_eq!(value, "quantity");
        }
        other => panic!("expected the caption row to be rejected, got {other:?}"),
    }
}

#[test]
fn report_uses_requested_delimiter() {
    let (system, result) = analysed();
    let mut buffer = Vec::new();
    write_report(&mut buffer, &system, &result, ',').unwrap();
    let content = String::from_utf8(buffer).unwrap();
    assert!(content.starts_with(",,,Processes,,,"));
}

#[test]
fn exporting_into_missing_directory_is_an_io_error() {
    let (system, result) = analysed();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.csv");

    match export_report(&path, &system, &result, ';') {
        Err(CoreError::Io { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn analysis_report_serializes_to_json() {
    let table = read_table(&fixture_path(), ';').unwrap();
    let system = ProductSystem::new(table.data.clone(), 100, 100);
    let report = AnalysisReport {
        source: table.path.clone(),
        hash: table.hash.clone(),
        selection: "all processes".to_string(),
        summary: system.summary(),
        result: CircularityEngine::new(&system).compute(),
    };

    let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["hash"].as_str().unwrap().len(), 64);
    assert_eq!(json["summary"]["process_count"], 3);
    assert!((json["result"]["x"].as_f64().unwrap() - 9.0).abs() < 1e-12);
}
