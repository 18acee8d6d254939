// src/dag/topo.rs

//! Deterministic topological ordering.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use petgraph::Direction;
use tracing::{debug, warn};

use crate::dag::graph::GraphModel;
use crate::dag::validator::find_cycles;
use crate::errors::{JobGraphError, Result};
use crate::types::JobId;

/// Return a total order of job ids in which every prerequisite precedes
/// its dependents.
///
/// Kahn's algorithm over a min-heap: whenever several jobs are ready, the
/// smallest id goes first, so an unchanged graph always yields the same
/// order. Dangling declarations are ignored. Adjacency is taken from one
/// petgraph snapshot, so each edge is visited once.
///
/// Fails with `CyclicGraph`, carrying every simple cycle, if the graph is
/// not acyclic.
pub fn order(graph: &GraphModel) -> Result<Vec<JobId>> {
    let dg = graph.to_digraph();
    let mut in_degree: BTreeMap<&str, usize> = dg
        .nodes()
        .map(|id| (id, dg.neighbors_directed(id, Direction::Incoming).count()))
        .collect();

    let mut ready: BinaryHeap<Reverse<&str>> = in_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(id, _)| Reverse(*id))
        .collect();

    let mut ordered: Vec<JobId> = Vec::with_capacity(graph.len());

    while let Some(Reverse(id)) = ready.pop() {
        ordered.push(id.to_string());
        for dependent in dg.neighbors_directed(id, Direction::Outgoing) {
            if let Some(d) = in_degree.get_mut(dependent) {
                *d -= 1;
                if *d == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }
    }

    if ordered.len() != graph.len() {
        let cycles = find_cycles(graph);
        warn!(
            ordered = ordered.len(),
            total = graph.len(),
            cycles = cycles.len(),
            "cannot order jobs: graph has cycles"
        );
        return Err(JobGraphError::CyclicGraph(cycles));
    }

    debug!(order = ?ordered, "computed execution order");
    Ok(ordered)
}
