//! Property tests over randomly generated graphs.
//!
//! Graphs are generated with a vertex range slightly larger than the
//! registered set, so a share of the candidate edges targets unregistered
//! ids and must be dropped by `add_edge`.

use std::collections::{BTreeSet, HashSet};

use petgraph::algo::kosaraju_scc;
use proptest::prelude::*;
use sociogram_core::graph::{
    GraphStore, VertexId, component_sets, egonet, greedy_cover,
    strongly_connected_components,
};

// ---------------------------------------------------------------------------
// Generators and reference implementations
// ---------------------------------------------------------------------------

fn arb_graph() -> impl Strategy<Value = GraphStore> {
    (0u64..40)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n + 4, 0..n + 4), 0..160),
            )
        })
        .prop_map(|(n, edges)| {
            let mut graph = GraphStore::new();
            for v in 0..n {
                graph.add_vertex(v);
            }
            for (from, to) in edges {
                graph.add_edge(from, to);
            }
            graph
        })
}

/// Raw adjacency maps whose neighbor sets may name unregistered ids.
fn arb_dangling_graph() -> impl Strategy<Value = GraphStore> {
    prop::collection::btree_map(0u64..30, prop::collection::btree_set(0u64..45, 0..6), 0..30)
        .prop_map(GraphStore::from_adjacency)
}

/// Direct rescan of the uncovered set on every step, lowest id first.
fn naive_cover(graph: &GraphStore) -> Vec<VertexId> {
    let mut uncovered: BTreeSet<VertexId> = graph.vertices().collect();
    let mut cover = Vec::new();
    while !uncovered.is_empty() {
        let mut best: Option<(VertexId, usize)> = None;
        for &v in &uncovered {
            let gain = graph.neighbors(v).intersection(&uncovered).count();
            if best.is_none_or(|(_, top)| gain > top) {
                best = Some((v, gain));
            }
        }
        let Some((chosen, _)) = best else { break };
        uncovered.remove(&chosen);
        for n in graph.neighbors(chosen) {
            uncovered.remove(n);
        }
        cover.push(chosen);
    }
    cover
}

fn petgraph_sccs(graph: &GraphStore) -> Vec<Vec<VertexId>> {
    let (digraph, _) = graph.to_digraph();
    let mut sets: Vec<Vec<VertexId>> = kosaraju_scc(&digraph)
        .into_iter()
        .map(|component| {
            let mut ids: Vec<VertexId> = component.into_iter().map(|idx| digraph[idx]).collect();
            ids.sort_unstable();
            ids
        })
        .collect();
    sets.sort_unstable();
    sets
}

fn assert_partition(graph: &GraphStore, sets: &[BTreeSet<VertexId>]) -> Result<(), TestCaseError> {
    let mut seen: HashSet<VertexId> = HashSet::new();
    for set in sets {
        prop_assert!(!set.is_empty(), "empty component");
        for &v in set {
            prop_assert!(seen.insert(v), "vertex {} in two components", v);
            prop_assert!(graph.contains_vertex(v), "unregistered vertex {} in component", v);
        }
    }
    prop_assert_eq!(seen.len(), graph.vertex_count());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    // Strongly connected components

    #[test]
    fn scc_is_a_partition(graph in arb_graph()) {
        assert_partition(&graph, &component_sets(&graph))?;
    }

    #[test]
    fn scc_partition_holds_with_dangling_neighbors(graph in arb_dangling_graph()) {
        assert_partition(&graph, &component_sets(&graph))?;
    }

    #[test]
    fn scc_matches_petgraph(graph in arb_graph()) {
        let mut ours: Vec<Vec<VertexId>> = component_sets(&graph)
            .into_iter()
            .map(|set| set.into_iter().collect())
            .collect();
        ours.sort_unstable();
        prop_assert_eq!(ours, petgraph_sccs(&graph));
    }

    #[test]
    fn scc_components_keep_exactly_internal_edges(graph in arb_graph()) {
        for component in strongly_connected_components(&graph) {
            let members: BTreeSet<VertexId> = component.vertices().collect();
            let expected: BTreeSet<(VertexId, VertexId)> = graph
                .edges()
                .filter(|(u, w)| members.contains(u) && members.contains(w))
                .collect();
            prop_assert_eq!(component.edges().collect::<BTreeSet<_>>(), expected);
        }
    }

    // Greedy cover

    #[test]
    fn cover_dominates_every_vertex(graph in arb_graph()) {
        let cover = greedy_cover(&graph);
        for v in graph.vertices() {
            let dominated = cover.contains(&v) || cover.iter().any(|&c| graph.contains_edge(c, v));
            prop_assert!(dominated, "vertex {} not dominated", v);
        }
    }

    #[test]
    fn cover_is_bounded_and_unique(graph in arb_graph()) {
        let cover = greedy_cover(&graph);
        let unique: BTreeSet<VertexId> = cover.iter().copied().collect();
        prop_assert!(cover.len() <= graph.vertex_count());
        prop_assert_eq!(unique.len(), cover.len());
    }

    #[test]
    fn cover_matches_naive_rescan(graph in arb_graph()) {
        prop_assert_eq!(greedy_cover(&graph), naive_cover(&graph));
    }

    #[test]
    fn cover_matches_naive_rescan_with_dangling_neighbors(graph in arb_dangling_graph()) {
        prop_assert_eq!(greedy_cover(&graph), naive_cover(&graph));
    }

    // Egonet

    #[test]
    fn egonet_is_symmetric_and_mutual(graph in arb_graph(), center in 0u64..44) {
        let ego = egonet(&graph, center);
        if !graph.contains_vertex(center) {
            prop_assert!(ego.is_empty());
        }
        for (u, w) in ego.edges() {
            prop_assert!(ego.contains_edge(w, u), "missing reverse of {} -> {}", u, w);
            prop_assert!(graph.is_mutual(u, w), "{} -> {} not mutual in source", u, w);
        }
        for v in ego.vertices() {
            prop_assert!(v == center || graph.is_mutual(center, v));
        }
    }

    // GraphStore

    #[test]
    fn edge_to_unregistered_vertex_is_noop(graph in arb_graph(), from in 0u64..44) {
        let mut graph = graph;
        let missing = 1_000;
        let before = graph.neighbors(from).clone();

        prop_assert!(!graph.add_edge(from, missing));
        prop_assert_eq!(graph.neighbors(from), &before);
        prop_assert!(!graph.contains_vertex(missing));
    }
}
