use jobgraph::layout::{LayeredLayout, NodeTable, Size, assign_levels};
use jobgraph::routing::{Anchor, AnchorRef, ConnectionStore};
use jobgraph::types::RoutingStyle;
use proptest::prelude::*;

use crate::{build_graph, dag_strategy};

proptest! {
    #[test]
    fn test_levels_increase_along_edges((num_jobs, edges) in dag_strategy(12)) {
        let graph = build_graph(num_jobs, &edges);
        let levels = assign_levels(&graph);

        prop_assert_eq!(levels.len(), num_jobs);
        for (from, to) in graph.edges() {
            prop_assert!(levels[from] < levels[to]);
        }
        for id in graph.ids() {
            if graph.dependencies_of(id).is_empty() {
                prop_assert_eq!(levels[id], 0);
            }
        }
    }

    #[test]
    fn test_positions_stay_inside_canvas(
        (num_jobs, edges) in dag_strategy(12),
        width in 100.0f64..2000.0,
        height in 100.0f64..2000.0,
    ) {
        let graph = build_graph(num_jobs, &edges);
        let layout = LayeredLayout::new(width, height);
        let positions = layout.positions(&graph);
        let levels = layout.levels(&graph);

        prop_assert_eq!(positions.len(), num_jobs);
        for (id, p) in &positions {
            prop_assert!(p.x > 0.0 && p.x < width);
            prop_assert!(p.y > 0.0 && p.y < height);
            for (other, q) in &positions {
                if levels[id] < levels[other] {
                    prop_assert!(p.x < q.x);
                }
            }
        }
    }

    #[test]
    fn test_recompute_is_stable(
        (num_jobs, edges) in dag_strategy(8),
        orthogonal in any::<bool>(),
    ) {
        let graph = build_graph(num_jobs, &edges);
        let positions = LayeredLayout::new(800.0, 600.0).positions(&graph);
        let nodes = NodeTable::from_positions(&positions, Size::new(100.0, 40.0));
        let style = if orthogonal { RoutingStyle::Orthogonal } else { RoutingStyle::Bezier };

        let mut store = ConnectionStore::new(style);
        for (from, to) in graph.edges() {
            store
                .connect(AnchorRef::new(from, Anchor::Right), AnchorRef::new(to, Anchor::Left), &nodes)
                .unwrap();
        }
        let before: Vec<_> = store.iter().map(|c| c.path.clone()).collect();

        store.recompute_all(&nodes);
        store.recompute_all(&nodes);
        let after: Vec<_> = store.iter().map(|c| c.path.clone()).collect();

        prop_assert_eq!(store.len(), graph.edges().count());
        prop_assert_eq!(before, after);
    }
}
