use clap::Parser;
use jobgraph::cli::{CliArgs, LogLevel};
use jobgraph::errors::JobGraphError;
use jobgraph::logging::filter_for;

use crate::common::{document_file, init_tracing};

const DOC: &str = "jobs:\n  - name: A\n  - name: B\n    depend: A\n  - name: C\n    depend: [A, ghost]\n";

fn args(path: &str, extra: &[&str]) -> CliArgs {
    let mut argv = vec!["jobgraph", "--config", path];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).unwrap()
}

#[test]
fn test_cli_defaults() {
    let parsed = CliArgs::try_parse_from(["jobgraph"]).unwrap();

    assert_eq!(parsed.config, "jobs.yaml");
    assert!(!parsed.plan && !parsed.layout && !parsed.json);
    assert!(parsed.log_level.is_none());
}

#[test]
fn test_run_text_report_with_plan_and_layout() {
    init_tracing();
    let file = document_file(DOC, ".yaml");
    let path = file.path().to_str().unwrap();

    jobgraph::run(args(path, &["--plan", "--layout"])).unwrap();
}

#[test]
fn test_run_json_report() {
    let file = document_file(DOC, ".yaml");
    let path = file.path().to_str().unwrap();

    jobgraph::run(args(path, &["--json", "--layout", "--log-level", "debug"])).unwrap();
}

#[test]
fn test_run_plan_fails_on_cycle() {
    let file = document_file("jobs:\n  - name: A\n    depend: B\n  - name: B\n    depend: A\n", ".yaml");
    let path = file.path().to_str().unwrap();

    let err = jobgraph::run(args(path, &["--plan"])).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<JobGraphError>(),
        Some(JobGraphError::CyclicGraph(_))
    ));
}

#[test]
fn test_run_without_plan_tolerates_cycle() {
    let file = document_file("jobs:\n  - name: A\n    depend: B\n  - name: B\n    depend: A\n", ".yaml");
    let path = file.path().to_str().unwrap();

    jobgraph::run(args(path, &[])).unwrap();
}

#[test]
fn test_log_level_flag_becomes_filter_directive() {
    let parsed = CliArgs::try_parse_from(["jobgraph", "--log-level", "debug"]).unwrap();

    let filter = filter_for(parsed.log_level);

    assert_eq!(filter.to_string(), "debug");
    assert_eq!(LogLevel::Warn.directive(), "warn");
}
