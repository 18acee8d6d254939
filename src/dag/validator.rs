// src/dag/validator.rs

//! Structural checks over a [`GraphModel`] snapshot.
//!
//! Nothing here fails: findings are returned as data so the caller can show
//! them next to a graph that is still usable for layout and editing.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::dag::graph::GraphModel;
use crate::errors::format_cycles;
use crate::types::JobId;

/// A non-fatal finding about a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphWarning {
    /// `job` lists `missing` in its `depend` field but no such job exists.
    DanglingReference { job: JobId, missing: JobId },
    /// A dependency cycle, as an ordered list of job ids.
    Cycle(Vec<JobId>),
}

impl fmt::Display for GraphWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphWarning::DanglingReference { job, missing } => {
                write!(f, "job '{job}' depends on unknown job '{missing}'")
            }
            GraphWarning::Cycle(cycle) => {
                write!(f, "dependency cycle: {}", format_cycles(std::slice::from_ref(cycle)))
            }
        }
    }
}

/// Everything the validator found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Identifiers referenced in some `depend` list that are not jobs.
    pub dangling: BTreeSet<JobId>,
    /// `(job, missing)` pairs behind `dangling`, in graph order.
    pub dangling_refs: Vec<(JobId, JobId)>,
    /// All simple cycles.
    pub cycles: Vec<Vec<JobId>>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.cycles.is_empty()
    }

    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Findings flattened into a display list.
    pub fn warnings(&self) -> Vec<GraphWarning> {
        let dangling = self
            .dangling_refs
            .iter()
            .map(|(job, missing)| GraphWarning::DanglingReference {
                job: job.clone(),
                missing: missing.clone(),
            });
        let cycles = self.cycles.iter().cloned().map(GraphWarning::Cycle);
        dangling.chain(cycles).collect()
    }
}

/// Run every check and log the findings.
pub fn validate(graph: &GraphModel) -> ValidationReport {
    let dangling_refs: Vec<(JobId, JobId)> = graph
        .dependency_pairs()
        .filter(|(from, _)| !graph.contains(from))
        .map(|(from, to)| (to.to_string(), from.to_string()))
        .collect();
    let dangling = dangling_refs.iter().map(|(_, m)| m.clone()).collect();
    let cycles = find_cycles(graph);

    let report = ValidationReport {
        dangling,
        dangling_refs,
        cycles,
    };

    for warning in report.warnings() {
        warn!(%warning, "graph validation");
    }
    debug!(
        dangling = report.dangling.len(),
        cycles = report.cycles.len(),
        "graph validation finished"
    );

    report
}

/// Identifiers used in some `depend` list but not present as a job.
pub fn find_dangling_references(graph: &GraphModel) -> BTreeSet<JobId> {
    graph
        .dependency_pairs()
        .filter(|(from, _)| !graph.contains(from))
        .map(|(from, _)| from.to_string())
        .collect()
}

/// All simple cycles over the resolved edges.
///
/// Each cycle starts at its smallest id and follows edge direction
/// (prerequisite -> dependent); the list is sorted. An empty result means
/// the graph is a DAG.
///
/// Cycles can only live inside a strongly connected component, so the
/// graph is split with Tarjan's algorithm. For each component the smallest
/// member is used as a root: every cycle through it is enumerated, then the
/// root is dropped and what remains of the component is split again. Every
/// cycle is therefore reported once, from its minimum.
pub fn find_cycles(graph: &GraphModel) -> Vec<Vec<JobId>> {
    let dg = graph.to_digraph();
    let mut cycles: Vec<Vec<JobId>> = Vec::new();
    let mut pending: Vec<Vec<&str>> = tarjan_scc(&dg);

    while let Some(component) = pending.pop() {
        // Self-loops are rejected by GraphModel, so singletons are acyclic.
        if component.len() < 2 {
            continue;
        }
        let mut members: HashSet<&str> = component.iter().copied().collect();
        let Some(root) = component.iter().copied().min() else {
            continue;
        };

        cycles_through(&dg, root, &members, &mut cycles);

        members.remove(root);
        pending.extend(tarjan_scc(&induced(&dg, &members)));
    }

    cycles.sort();
    cycles
}

/// Every simple cycle through `root` that stays inside `members`.
///
/// Depth-first backtracking with an explicit frame stack, so cycle length
/// is bounded by memory rather than by the call stack.
fn cycles_through<'g>(
    dg: &DiGraphMap<&'g str, ()>,
    root: &'g str,
    members: &HashSet<&'g str>,
    found: &mut Vec<Vec<JobId>>,
) {
    let successors = |node: &'g str| -> std::vec::IntoIter<&'g str> {
        let mut next: Vec<&'g str> = dg
            .neighbors_directed(node, Direction::Outgoing)
            .filter(|n| members.contains(n))
            .collect();
        next.sort_unstable();
        next.into_iter()
    };

    let mut path: Vec<&'g str> = vec![root];
    let mut on_path: HashSet<&'g str> = HashSet::from([root]);
    let mut frames = vec![successors(root)];

    while let Some(frame) = frames.last_mut() {
        match frame.next() {
            Some(n) if n == root => {
                found.push(path.iter().map(|s| s.to_string()).collect());
            }
            Some(n) => {
                if on_path.insert(n) {
                    path.push(n);
                    frames.push(successors(n));
                }
            }
            None => {
                frames.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(done);
                }
            }
        }
    }
}

/// Subgraph of `dg` restricted to `members`.
fn induced<'g>(
    dg: &DiGraphMap<&'g str, ()>,
    members: &HashSet<&'g str>,
) -> DiGraphMap<&'g str, ()> {
    let mut sub: DiGraphMap<&'g str, ()> = DiGraphMap::new();
    for &node in members {
        sub.add_node(node);
    }
    for &node in members {
        for next in dg.neighbors_directed(node, Direction::Outgoing) {
            if members.contains(next) {
                sub.add_edge(node, next, ());
            }
        }
    }
    sub
}
