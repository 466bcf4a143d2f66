//! Summary statistics for a [`GraphStore`].
//!
//! # Statistics Provided
//!
//! - **vertex_count** / **edge_count**: size of the stored graph.
//! - **mutual_pair_count**: unordered pairs `{u, w}` with both `u → w` and
//!   `w → u` stored ("mutual acquaintances").
//! - **density**: `edge_count / (vertex_count * (vertex_count - 1))`; zero
//!   for graphs with fewer than two vertices.
//! - **scc_count**, **nontrivial_scc_count**, **largest_scc_size**: from the
//!   Kosaraju decomposition. A non-trivial component has more than one
//!   vertex.
//! - **weakly_connected_component_count**: components when edge direction is
//!   ignored.
//! - **isolated_vertex_count**: vertices with no in- or out-edges.
//! - **max_in_degree** / **max_out_degree**.
//! - **cover_size**: length of the greedy cover sequence.
//! - **content_hash**: [`GraphStore::content_hash`].

use std::collections::BTreeSet;

use petgraph::algo::connected_components;
use serde::Serialize;
use tracing::instrument;

use crate::graph::cover::greedy_cover;
use crate::graph::scc::component_sets;
use crate::graph::store::GraphStore;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub mutual_pair_count: usize,
    pub density: f64,
    pub scc_count: usize,
    pub nontrivial_scc_count: usize,
    pub largest_scc_size: usize,
    pub weakly_connected_component_count: usize,
    pub isolated_vertex_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub cover_size: usize,
    pub content_hash: String,
}

impl GraphStats {
    /// Compute statistics for `graph`, running the SCC decomposition and the
    /// greedy cover once each.
    #[must_use]
    #[instrument(skip(graph))]
    pub fn compute(graph: &GraphStore) -> Self {
        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();

        let mutual_pair_count = graph
            .edges()
            .filter(|&(from, to)| from < to && graph.contains_edge(to, from))
            .count();

        let components = component_sets(graph);
        let nontrivial_scc_count = components.iter().filter(|c| c.len() > 1).count();
        let largest_scc_size = components.iter().map(BTreeSet::len).max().unwrap_or(0);

        let (digraph, _) = graph.to_digraph();
        let weakly_connected_component_count = connected_components(&digraph);

        let in_degrees = graph.in_degrees();
        let isolated_vertex_count = graph
            .vertices()
            .filter(|v| {
                graph.neighbors(*v).is_empty() && in_degrees.get(v).copied().unwrap_or(0) == 0
            })
            .count();
        let max_in_degree = in_degrees.values().copied().max().unwrap_or(0);
        let max_out_degree = graph
            .adjacency()
            .values()
            .map(BTreeSet::len)
            .max()
            .unwrap_or(0);

        Self {
            vertex_count,
            edge_count,
            mutual_pair_count,
            density: compute_density(vertex_count, edge_count),
            scc_count: components.len(),
            nontrivial_scc_count,
            largest_scc_size,
            weakly_connected_component_count,
            isolated_vertex_count,
            max_in_degree,
            max_out_degree,
            cover_size: greedy_cover(graph).len(),
            content_hash: graph.content_hash(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(vertex_count: usize, edge_count: usize) -> f64 {
    if vertex_count < 2 {
        return 0.0;
    }
    let max_edges = vertex_count * (vertex_count - 1);
    edge_count as f64 / max_edges as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::store::VertexId;

    fn graph(edges: &[(VertexId, VertexId)]) -> GraphStore {
        edges.iter().copied().collect()
    }

    #[test]
    fn empty_graph_stats() {
        let stats = GraphStats::compute(&GraphStore::new());

        assert_eq!(stats.vertex_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert!(stats.density.abs() < f64::EPSILON);
        assert_eq!(stats.scc_count, 0);
        assert_eq!(stats.largest_scc_size, 0);
        assert_eq!(stats.weakly_connected_component_count, 0);
        assert_eq!(stats.cover_size, 0);
    }

    #[test]
    fn mixed_graph_stats() {
        // 1 ⇄ 2 → 3 → 1 (one SCC of three), 4 → 5, 6 isolated.
        let mut g = graph(&[(1, 2), (2, 1), (2, 3), (3, 1), (4, 5)]);
        g.add_vertex(6);

        let stats = GraphStats::compute(&g);

        assert_eq!(stats.vertex_count, 6);
        assert_eq!(stats.edge_count, 5);
        assert_eq!(stats.mutual_pair_count, 1);
        assert_eq!(stats.scc_count, 4, "{{1,2,3}}, {{4}}, {{5}}, {{6}}");
        assert_eq!(stats.nontrivial_scc_count, 1);
        assert_eq!(stats.largest_scc_size, 3);
        assert_eq!(stats.weakly_connected_component_count, 3);
        assert_eq!(stats.isolated_vertex_count, 1);
        assert_eq!(stats.max_in_degree, 2, "vertex 1 has in-edges from 2 and 3");
        assert_eq!(stats.max_out_degree, 2);
        assert_eq!(stats.cover_size, greedy_cover(&g).len());
        assert_eq!(stats.content_hash, g.content_hash());
    }

    #[test]
    fn density_of_complete_digraph_is_one() {
        let g = graph(&[(1, 2), (2, 1), (1, 3), (3, 1), (2, 3), (3, 2)]);
        let stats = GraphStats::compute(&g);
        assert!((stats.density - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.mutual_pair_count, 3);
    }
}
