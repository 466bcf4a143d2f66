//! Strongly connected components via Kosaraju's two-pass search.
//!
//! # Algorithm
//!
//! 1. Depth-first search over the graph from every unvisited vertex
//!    (ascending id order), recording vertices in post-order on a finish
//!    stack.
//! 2. Build the transpose.
//! 3. Pop the finish stack; every still-unvisited vertex starts a
//!    depth-first search on the transpose, and the vertices reached form one
//!    component.
//! 4. Rebuild each component's edges from the original graph.
//!
//! Both searches run on an explicit stack of frames (vertex + neighbor
//! cursor), so path length is bounded by heap, not by the call stack.
//!
//! Neighbors that are not registered vertices are skipped. The result is a
//! partition of the registered vertex set.

use std::collections::btree_set;
use std::collections::{BTreeSet, HashSet};

use tracing::{debug, instrument, trace};

use crate::graph::store::{GraphStore, VertexId};

/// One suspended vertex in an iterative depth-first search.
struct Frame<'a> {
    vertex: VertexId,
    cursor: btree_set::Iter<'a, VertexId>,
}

impl<'a> Frame<'a> {
    fn new(graph: &'a GraphStore, vertex: VertexId) -> Self {
        Self {
            vertex,
            cursor: graph.neighbors(vertex).iter(),
        }
    }
}

/// Depth-first search from `start` over `graph`, appending every newly
/// reached vertex to `finished` in post-order.
///
/// Only vertices registered in `members` are entered. A vertex with no
/// adjacency entry in `graph` has no neighbors.
fn visit_post_order(
    graph: &GraphStore,
    members: &GraphStore,
    start: VertexId,
    visited: &mut HashSet<VertexId>,
    finished: &mut Vec<VertexId>,
) {
    if !visited.insert(start) {
        return;
    }

    let mut stack: Vec<Frame<'_>> = vec![Frame::new(graph, start)];
    while let Some(frame) = stack.last_mut() {
        if let Some(&next) = frame.cursor.next() {
            if members.contains_vertex(next) && visited.insert(next) {
                stack.push(Frame::new(graph, next));
            }
        } else {
            finished.push(frame.vertex);
            stack.pop();
        }
    }
}

/// Compute the vertex sets of all strongly connected components.
///
/// Components are listed in the order Kosaraju's second pass discovers them
/// (a topological order of the condensation, sources first).
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn component_sets(graph: &GraphStore) -> Vec<BTreeSet<VertexId>> {
    if graph.is_empty() {
        return Vec::new();
    }

    // Pass 1: finish order on the original graph.
    let mut visited: HashSet<VertexId> = HashSet::with_capacity(graph.vertex_count());
    let mut finish_stack: Vec<VertexId> = Vec::with_capacity(graph.vertex_count());
    for vertex in graph.vertices() {
        visit_post_order(graph, graph, vertex, &mut visited, &mut finish_stack);
    }

    let transposed = graph.transpose();

    // Pass 2: each search on the transpose yields exactly one component.
    visited.clear();
    let mut components: Vec<BTreeSet<VertexId>> = Vec::new();
    let mut reached: Vec<VertexId> = Vec::new();
    while let Some(vertex) = finish_stack.pop() {
        if visited.contains(&vertex) {
            continue;
        }
        visit_post_order(&transposed, graph, vertex, &mut visited, &mut reached);
        trace!(root = vertex, size = reached.len(), "component found");
        components.push(reached.drain(..).collect());
    }

    debug!(components = components.len(), "strongly connected components computed");
    components
}

/// Decompose `graph` into its strongly connected components.
///
/// Each component is returned as an independent [`GraphStore`] holding its
/// vertices and every original edge whose endpoints both lie inside it.
/// Singleton components are included. An empty graph yields an empty list.
#[must_use]
pub fn strongly_connected_components(graph: &GraphStore) -> Vec<GraphStore> {
    component_sets(graph)
        .into_iter()
        .map(|members| rebuild_component(graph, &members))
        .collect()
}

/// Copy the edges of `graph` that stay inside `members`.
///
/// For every kept edge `u → w` the reverse `w → u` is added as well when the
/// original graph has it.
fn rebuild_component(graph: &GraphStore, members: &BTreeSet<VertexId>) -> GraphStore {
    let mut component = GraphStore::new();
    for &vertex in members {
        component.add_vertex(vertex);
    }

    for &u in members {
        for &w in graph.neighbors(u) {
            if !members.contains(&w) {
                continue;
            }
            component.add_edge(u, w);
            if graph.contains_edge(w, u) {
                component.add_edge(w, u);
            }
        }
    }

    component
}
