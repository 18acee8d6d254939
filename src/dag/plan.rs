// src/dag/plan.rs

//! Artifacts handed to external collaborators: the execution plan and the
//! dependency analysis summary.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::dag::graph::GraphModel;
use crate::dag::topo;
use crate::errors::Result;
use crate::types::{JobId, JobStatus};

/// One record of an execution plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    /// External task identifier (the `job` field), if any.
    pub job: Option<String>,
    pub name: String,
    pub value: Option<String>,
    pub depend: Vec<JobId>,
    pub status: JobStatus,
}

/// Build the execution plan: jobs in topological order, all `pending`.
///
/// Fails with `CyclicGraph` exactly when [`topo::order`] does.
pub fn execution_plan(graph: &GraphModel) -> Result<Vec<PlanEntry>> {
    let order = topo::order(graph)?;

    let plan: Vec<PlanEntry> = order
        .iter()
        .filter_map(|id| graph.job(id))
        .map(|job| PlanEntry {
            job: job.task.clone(),
            name: job.name.clone(),
            value: job.value.clone(),
            depend: job.depends.clone(),
            status: JobStatus::Pending,
        })
        .collect();

    info!(jobs = plan.len(), "execution plan built");
    Ok(plan)
}

/// Counts and classification of the jobs in a graph.
///
/// - `root_jobs`: jobs with no dependencies of their own
/// - `leaf_jobs`: jobs nothing depends on
/// - `independent_jobs`: both of the above
///
/// `total_dependencies` counts declared pairs, dangling ones included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub total_jobs: usize,
    pub total_dependencies: usize,
    pub independent_jobs: Vec<JobId>,
    pub root_jobs: Vec<JobId>,
    pub leaf_jobs: Vec<JobId>,
}

pub fn analyze(graph: &GraphModel) -> AnalysisSummary {
    let depended_on: BTreeSet<&str> = graph.dependency_pairs().map(|(from, _)| from).collect();

    let mut summary = AnalysisSummary {
        total_jobs: graph.len(),
        total_dependencies: graph.dependency_pairs().count(),
        ..AnalysisSummary::default()
    };

    for job in graph.jobs() {
        let is_root = job.depends.is_empty();
        let is_leaf = !depended_on.contains(job.id.as_str());

        if is_root {
            summary.root_jobs.push(job.id.clone());
        }
        if is_leaf {
            summary.leaf_jobs.push(job.id.clone());
        }
        if is_root && is_leaf {
            summary.independent_jobs.push(job.id.clone());
        }
    }

    info!(
        total_jobs = summary.total_jobs,
        total_dependencies = summary.total_dependencies,
        independent = summary.independent_jobs.len(),
        roots = summary.root_jobs.len(),
        leaves = summary.leaf_jobs.len(),
        "dependency analysis"
    );
    summary
}
