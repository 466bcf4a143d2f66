//! Greedy dominating-set approximation ("cover").
//!
//! Repeatedly selects the uncovered vertex whose out-neighbors include the
//! most still-uncovered vertices, then marks that vertex and all of its
//! out-neighbors as covered. Ties go to the lowest vertex id. When the loop
//! ends every vertex is either selected or an out-neighbor of a selected
//! vertex.
//!
//! This is a heuristic for minimum dominating set / maximum coverage; no
//! optimality bound is enforced.
//!
//! # Selection
//!
//! A vertex's gain can only shrink as the uncovered set shrinks, so gains
//! are kept in a max-heap and recomputed lazily: an entry whose stored gain
//! is still exact when it reaches the top is the true maximum. Heap keys are
//! `(gain, Reverse(id))`, which encodes the lowest-id tie-break.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::graph::store::{GraphStore, VertexId};

/// One selection made by the greedy cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverStep {
    /// The selected vertex.
    pub vertex: VertexId,
    /// Out-neighbors of `vertex` that were still uncovered when it was chosen.
    pub gain: usize,
    /// Every vertex covered by this step, ascending. Includes `vertex`.
    pub covered: Vec<VertexId>,
}

fn uncovered_gain(graph: &GraphStore, vertex: VertexId, uncovered: &BTreeSet<VertexId>) -> usize {
    graph
        .neighbors(vertex)
        .iter()
        .filter(|neighbor| uncovered.contains(neighbor))
        .count()
}

/// Run the greedy cover and report each selection with what it covered.
///
/// The source graph is only read; the uncovered set is a private copy of
/// the vertex ids. An empty graph yields no steps.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn greedy_cover_steps(graph: &GraphStore) -> Vec<CoverStep> {
    let mut uncovered: BTreeSet<VertexId> = graph.vertices().collect();
    let mut heap: BinaryHeap<(usize, Reverse<VertexId>)> = uncovered
        .iter()
        .map(|&vertex| (uncovered_gain(graph, vertex, &uncovered), Reverse(vertex)))
        .collect();
    let mut steps: Vec<CoverStep> = Vec::new();

    while !uncovered.is_empty() {
        let Some((stored_gain, Reverse(vertex))) = heap.pop() else {
            break;
        };
        if !uncovered.contains(&vertex) {
            continue;
        }

        let gain = uncovered_gain(graph, vertex, &uncovered);
        if gain < stored_gain {
            heap.push((gain, Reverse(vertex)));
            continue;
        }

        uncovered.remove(&vertex);
        let mut covered: Vec<VertexId> = vec![vertex];
        for &neighbor in graph.neighbors(vertex) {
            if uncovered.remove(&neighbor) {
                covered.push(neighbor);
            }
        }
        covered.sort_unstable();

        trace!(vertex, gain, remaining = uncovered.len(), "cover step");
        steps.push(CoverStep {
            vertex,
            gain,
            covered,
        });
    }

    debug!(selected = steps.len(), "greedy cover computed");
    steps
}

/// Return the ordered greedy cover sequence for `graph`.
///
/// Each vertex appears at most once and the length never exceeds the
/// vertex count.
#[must_use]
pub fn greedy_cover(graph: &GraphStore) -> Vec<VertexId> {
    greedy_cover_steps(graph)
        .into_iter()
        .map(|step| step.vertex)
        .collect()
}
