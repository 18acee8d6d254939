use std::collections::HashMap;

use jobgraph::dag::{find_cycles, topo};
use jobgraph::errors::JobGraphError;
use proptest::prelude::*;

use crate::{build_graph, dag_strategy, job_name};

proptest! {
    #[test]
    fn test_order_respects_every_edge((num_jobs, edges) in dag_strategy(12)) {
        let graph = build_graph(num_jobs, &edges);

        let order = topo::order(&graph).unwrap();
        prop_assert_eq!(order.len(), num_jobs);

        let position: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        for (from, to) in graph.edges() {
            prop_assert!(position[from] < position[to], "{} must precede {}", from, to);
        }

        prop_assert_eq!(topo::order(&graph).unwrap(), order);
        prop_assert!(find_cycles(&graph).is_empty());
    }

    #[test]
    fn test_back_edge_always_reports_cycle(
        (num_jobs, edges) in dag_strategy(10).prop_filter("needs an edge", |(_, e)| !e.is_empty()),
        pick in any::<usize>(),
    ) {
        let mut graph = build_graph(num_jobs, &edges);
        let (from, to) = edges[pick % edges.len()];

        graph.add_dependency(&job_name(to), &job_name(from)).unwrap();

        match topo::order(&graph) {
            Err(JobGraphError::CyclicGraph(cycles)) => {
                prop_assert!(!cycles.is_empty());
                for cycle in &cycles {
                    let smallest = cycle.iter().min().unwrap();
                    prop_assert_eq!(&cycle[0], smallest);
                }
            }
            other => prop_assert!(false, "expected CyclicGraph, got {:?}", other),
        }
    }
}
