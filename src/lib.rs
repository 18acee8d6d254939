// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod editor;
pub mod errors;
pub mod layout;
pub mod logging;
pub mod routing;
pub mod types;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::dag::{AnalysisSummary, PlanEntry};
use crate::editor::Editor;
use crate::layout::geometry::NodeBox;
use crate::routing::store::Connection;
use crate::types::JobId;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - document loading and validation
/// - graph construction, validation and layout (via [`Editor`])
/// - the requested report (analysis always, plan / layout on request)
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let doc = load_and_validate(&config_path)?;
    let editor = Editor::from_document(&doc)?;

    let plan = if args.plan {
        Some(editor.execution_plan()?)
    } else {
        None
    };

    let report = Report {
        source: config_path.display().to_string(),
        analysis: editor.analysis(),
        warnings: editor
            .report()
            .warnings()
            .iter()
            .map(ToString::to_string)
            .collect(),
        plan,
        layout: args.layout.then(|| LayoutReport::from_editor(&editor)),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    info!(path = %config_path.display(), "report complete");
    Ok(())
}

/// Everything `run` prints.
#[derive(Debug, Serialize)]
struct Report<'a> {
    source: String,
    analysis: AnalysisSummary,
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<Vec<PlanEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<LayoutReport<'a>>,
}

#[derive(Debug, Serialize)]
struct LayoutReport<'a> {
    levels: BTreeMap<JobId, usize>,
    nodes: BTreeMap<&'a str, NodeBox>,
    connections: Vec<&'a Connection>,
}

impl<'a> LayoutReport<'a> {
    fn from_editor(editor: &'a Editor) -> Self {
        Self {
            levels: editor.levels(),
            nodes: editor.nodes().iter().map(|(id, b)| (id, *b)).collect(),
            connections: editor.connections().iter().collect(),
        }
    }
}

fn print_text(report: &Report<'_>) {
    let analysis = &report.analysis;
    println!("jobgraph: {}", report.source);
    println!("  total jobs = {}", analysis.total_jobs);
    println!("  total dependencies = {}", analysis.total_dependencies);
    println!("  root jobs: {:?}", analysis.root_jobs);
    println!("  leaf jobs: {:?}", analysis.leaf_jobs);
    println!("  independent jobs: {:?}", analysis.independent_jobs);

    if !report.warnings.is_empty() {
        println!();
        println!("warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }

    if let Some(plan) = &report.plan {
        println!();
        println!("execution plan ({}):", plan.len());
        for (index, entry) in plan.iter().enumerate() {
            println!("  {}. {}", index + 1, entry.name);
            if let Some(ref task) = entry.job {
                println!("      job: {task}");
            }
            if let Some(ref value) = entry.value {
                println!("      value: {value}");
            }
            if !entry.depend.is_empty() {
                println!("      depend: {:?}", entry.depend);
            }
        }
    }

    if let Some(layout) = &report.layout {
        println!();
        println!("layout ({} nodes):", layout.nodes.len());
        for (id, node) in &layout.nodes {
            let level = layout.levels.get(*id).copied().unwrap_or_default();
            println!(
                "  - {id}: level {level} at ({:.1}, {:.1})",
                node.center.x, node.center.y
            );
        }
        println!("connections ({}):", layout.connections.len());
        for conn in &layout.connections {
            println!(
                "  {} {}.{} -> {}.{} [{:?}, {} points]",
                conn.id,
                conn.source.node,
                conn.source.anchor,
                conn.target.node,
                conn.target.anchor,
                conn.path.style,
                conn.path.points.len()
            );
        }
    }

    debug!("text report written");
}
