use jobgraph::config::{DocumentFormat, load_and_validate, load_str, normalize_depend};
use jobgraph::dag::{GraphModel, validate};
use jobgraph::editor::Editor;
use jobgraph::types::RoutingStyle;
use serde_json::json;

use crate::common::{document_file, ids, init_tracing};

const YAML_DOC: &str = r#"
canvas:
  width: 1000
  routing: orthogonal

jobs:
  - job: J1
    name: fetch
    value: pull sources
  - job: J2
    name: build
    depend: fetch
  - name: test
    value: 42
    depend: [build, fetch]
  - just a string
"#;

#[test]
fn test_yaml_document_loads_with_canvas_overrides() {
    init_tracing();
    let file = document_file(YAML_DOC, ".yaml");

    let doc = load_and_validate(file.path()).unwrap();

    assert_eq!(doc.jobs.len(), 3);
    assert_eq!(doc.canvas.width, 1000.0);
    assert_eq!(doc.canvas.height, 600.0);
    assert_eq!(doc.canvas.snap_radius, 20.0);
    assert_eq!(doc.canvas.routing, RoutingStyle::Orthogonal);

    assert_eq!(doc.jobs[0].job.as_deref(), Some("J1"));
    assert_eq!(doc.jobs[1].depend, ids(&["fetch"]));
    assert_eq!(doc.jobs[2].value.as_deref(), Some("42"));
    assert_eq!(doc.jobs[2].depend, ids(&["build", "fetch"]));
}

#[test]
fn test_json_document_by_extension() {
    let file = document_file(
        r#"{ "jobs": [ { "name": "A" }, { "name": "B", "depend": ["A"] } ] }"#,
        ".json",
    );

    let doc = load_and_validate(file.path()).unwrap();
    let graph = GraphModel::from_document(&doc).unwrap();

    assert_eq!(graph.edges().count(), 1);
}

#[test]
fn test_toml_document_by_extension() {
    let file = document_file(
        r#"
[canvas]
snap_radius = 12.5

[[jobs]]
name = "A"

[[jobs]]
name = "B"
depend = "A"
"#,
        ".toml",
    );

    let doc = load_and_validate(file.path()).unwrap();

    assert_eq!(doc.canvas.snap_radius, 12.5);
    assert_eq!(doc.jobs[1].depend, ids(&["A"]));
}

#[test]
fn test_unknown_extension_reads_as_yaml() {
    let file = document_file("jobs:\n  - name: only\n", ".jobs");

    let doc = load_and_validate(file.path()).unwrap();

    assert_eq!(doc.jobs.len(), 1);
}

#[test]
fn test_depend_normalization() {
    assert_eq!(normalize_depend(Some(&json!("X"))), ids(&["X"]));
    assert_eq!(normalize_depend(Some(&json!(5))), ids(&["5"]));
    assert_eq!(normalize_depend(Some(&json!(1.5))), ids(&["1.5"]));
    assert_eq!(normalize_depend(Some(&json!(["a", 7, "", null, {"k": 1}]))), ids(&["a", "7"]));
    assert!(normalize_depend(Some(&json!({"name": "X"}))).is_empty());
    assert!(normalize_depend(Some(&json!(true))).is_empty());
    assert!(normalize_depend(Some(&json!(""))).is_empty());
    assert!(normalize_depend(None).is_empty());
}

#[test]
fn test_mapping_depend_means_no_dependencies() {
    let doc = load_str(
        "jobs:\n  - name: A\n    depend: { name: B }\n",
        DocumentFormat::Yaml,
    )
    .unwrap();
    let graph = GraphModel::from_document(&doc).unwrap();

    assert_eq!(graph.dependency_pairs().count(), 0);
    assert!(validate(&graph).is_clean());
}

#[test]
fn test_full_pipeline_from_file_to_editor() {
    let file = document_file(YAML_DOC, ".yml");
    let doc = load_and_validate(file.path()).unwrap();

    let editor = Editor::from_document(&doc).unwrap();

    assert!(editor.report().is_clean());
    assert_eq!(editor.connections().len(), 3);
    assert_eq!(editor.levels()["test"], 2);

    let plan = editor.execution_plan().unwrap();
    let names: Vec<&str> = plan.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["fetch", "build", "test"]);
}

#[test]
fn test_numeric_depend_matches_numeric_name_in_both_forms() {
    let doc = load_str(
        "jobs:\n  - name: 5\n  - name: a\n    depend: 5\n  - name: b\n    depend: [5]\n",
        DocumentFormat::Yaml,
    )
    .unwrap();
    let graph = GraphModel::from_document(&doc).unwrap();

    assert_eq!(graph.dependencies_of("a"), vec!["5"]);
    assert_eq!(graph.dependencies_of("b"), vec!["5"]);
    assert!(validate(&graph).is_clean());
}
