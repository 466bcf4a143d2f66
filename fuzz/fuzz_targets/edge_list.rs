//! Fuzz the edge-list loader and every analysis over what it builds.
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run edge_list
//! ```

#![no_main]

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;
use sociogram_core::graph::{component_sets, egonet, greedy_cover};
use sociogram_core::{LoadOptions, parse_edge_list};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok((graph, report)) = parse_edge_list(text, &LoadOptions::default()) else {
        return;
    };
    assert_eq!(report.vertices, graph.vertex_count());

    let mut seen = BTreeSet::new();
    for component in component_sets(&graph) {
        for vertex in component {
            assert!(seen.insert(vertex), "vertex {vertex} in two components");
        }
    }
    assert_eq!(seen.len(), graph.vertex_count());

    let cover = greedy_cover(&graph);
    for vertex in graph.vertices() {
        assert!(cover.contains(&vertex) || cover.iter().any(|&c| graph.contains_edge(c, vertex)));
    }

    if let Some(center) = graph.vertices().next() {
        let ego = egonet(&graph, center);
        for (u, w) in ego.edges() {
            assert!(ego.contains_edge(w, u));
        }
    }
});
