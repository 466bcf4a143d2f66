//! Mutual-neighborhood ("egonet") extraction.
//!
//! The egonet of `center` is the subgraph induced on `center` and every
//! neighbor that is connected to it in *both* directions, keeping only edges
//! that are themselves mutual in the source graph. A neighbor reached by a
//! one-way edge is left out entirely, and so is a one-way edge between two
//! members. The result is therefore symmetric: `u → w` is present iff
//! `w → u` is.

use tracing::{debug, instrument};

use crate::graph::store::{GraphStore, VertexId};

/// Build the egonet of `center` as a new, independent [`GraphStore`].
///
/// Returns an empty graph when `center` is not registered.
#[must_use]
#[instrument(skip(graph))]
pub fn egonet(graph: &GraphStore, center: VertexId) -> GraphStore {
    let mut ego = GraphStore::new();
    if !graph.contains_vertex(center) {
        debug!("center not registered, egonet is empty");
        return ego;
    }

    ego.add_vertex(center);

    // Step 1: mutual neighbors of the center.
    let members: Vec<VertexId> = graph
        .neighbors(center)
        .iter()
        .copied()
        .filter(|&neighbor| neighbor != center && graph.contains_edge(neighbor, center))
        .collect();

    for &member in &members {
        ego.add_vertex(member);
        ego.add_edge(center, member);
        ego.add_edge(member, center);
    }

    // Step 2: mutual edges between members. Each unordered pair is checked
    // once; members are sorted, so `w > u` visits every pair exactly once.
    for (i, &u) in members.iter().enumerate() {
        for &w in &members[i + 1..] {
            if graph.is_mutual(u, w) {
                ego.add_edge(u, w);
                ego.add_edge(w, u);
            }
        }
    }

    debug!(
        members = members.len(),
        edges = ego.edge_count(),
        "egonet extracted"
    );
    ego
}
