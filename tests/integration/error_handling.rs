use jobgraph::config::{DocumentFormat, load_and_validate, load_str};
use jobgraph::dag::{GraphModel, topo};
use jobgraph::errors::JobGraphError;

use crate::common::document_file;

#[test]
fn test_missing_jobs_is_malformed_schema() {
    let result = load_str("canvas:\n  width: 500\n", DocumentFormat::Yaml);

    match result {
        Err(JobGraphError::MalformedSchema(msg)) => assert!(msg.contains("jobs")),
        other => panic!("Expected MalformedSchema, got: {other:?}"),
    }
}

#[test]
fn test_non_list_jobs_is_malformed_schema() {
    let result = load_str(r#"{ "jobs": { "name": "A" } }"#, DocumentFormat::Json);

    match result {
        Err(JobGraphError::MalformedSchema(msg)) => assert!(msg.contains("a mapping")),
        other => panic!("Expected MalformedSchema, got: {other:?}"),
    }
}

#[test]
fn test_empty_yaml_is_malformed_schema() {
    assert!(matches!(
        load_str("   \n", DocumentFormat::Yaml),
        Err(JobGraphError::MalformedSchema(_))
    ));
}

#[test]
fn test_invalid_syntax_reports_parser_error() {
    assert!(matches!(
        load_str("jobs: [", DocumentFormat::Yaml),
        Err(JobGraphError::YamlError(_))
    ));
    assert!(matches!(
        load_str("{ jobs: ", DocumentFormat::Json),
        Err(JobGraphError::JsonError(_))
    ));
    assert!(matches!(
        load_str("jobs = [", DocumentFormat::Toml),
        Err(JobGraphError::TomlError(_))
    ));
}

#[test]
fn test_non_positive_canvas_is_config_error() {
    let result = load_str("canvas:\n  height: 0\njobs: []\n", DocumentFormat::Yaml);

    match result {
        Err(JobGraphError::ConfigError(msg)) => assert!(msg.contains("canvas.height")),
        other => panic!("Expected ConfigError, got: {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = load_and_validate(dir.path().join("absent.yaml"));

    assert!(matches!(result, Err(JobGraphError::IoError(_))));
}

#[test]
fn test_cycle_surfaces_only_when_ordering() {
    let file = document_file(
        "jobs:\n  - name: A\n    depend: B\n  - name: B\n    depend: A\n",
        ".yaml",
    );

    let doc = load_and_validate(file.path()).unwrap();
    let graph = GraphModel::from_document(&doc).unwrap();

    match topo::order(&graph) {
        Err(JobGraphError::CyclicGraph(cycles)) => {
            assert_eq!(cycles, vec![vec!["A".to_string(), "B".to_string()]]);
        }
        other => panic!("Expected CyclicGraph, got: {other:?}"),
    }
}

#[test]
fn test_self_dependency_in_document_aborts_graph_build() {
    let doc = load_str("jobs:\n  - name: A\n    depend: A\n", DocumentFormat::Yaml).unwrap();

    assert!(matches!(
        GraphModel::from_document(&doc),
        Err(JobGraphError::SelfDependency(ref id)) if id == "A"
    ));
}
