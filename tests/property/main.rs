mod layout;
mod topo_order;

use std::collections::BTreeSet;

use jobgraph::dag::GraphModel;
use jobgraph_test_utils::builders::graph_from_pairs;
use proptest::prelude::*;

// Strategy to generate an acyclic graph as (job count, edge list).
// Acyclicity holds because job N only depends on jobs 0..N-1.
pub fn dag_strategy(max_jobs: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1..=max_jobs).prop_flat_map(|num_jobs| {
        let deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..4),
            num_jobs,
        );
        deps.prop_map(move |raw| {
            let mut edges = BTreeSet::new();
            for (i, candidates) in raw.into_iter().enumerate() {
                if i == 0 {
                    continue;
                }
                for c in candidates {
                    edges.insert((c % i, i));
                }
            }
            (num_jobs, edges.into_iter().collect())
        })
    })
}

pub fn job_name(i: usize) -> String {
    format!("job_{i:02}")
}

pub fn build_graph(num_jobs: usize, edges: &[(usize, usize)]) -> GraphModel {
    let names: Vec<String> = (0..num_jobs).map(job_name).collect();
    let pairs: Vec<(&str, &str)> = edges
        .iter()
        .map(|(from, to)| (names[*from].as_str(), names[*to].as_str()))
        .collect();
    let mut graph = graph_from_pairs(&pairs);
    for name in &names {
        if !graph.contains(name) {
            graph
                .add_job(jobgraph::dag::Job::named(name.clone()))
                .unwrap();
        }
    }
    graph
}
