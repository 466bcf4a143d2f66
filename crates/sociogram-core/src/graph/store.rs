//! Adjacency-set storage for directed graphs.
//!
//! # Registration Rules
//!
//! A vertex exists once it has been passed to [`GraphStore::add_vertex`].
//! An edge `from → to` is only accepted when both endpoints already exist;
//! otherwise [`GraphStore::add_edge`] silently drops it. Ingestion code is
//! expected to register both endpoints first (see [`crate::load`]).
//!
//! ## Dangling Neighbors
//!
//! [`GraphStore::from_adjacency`] accepts a raw map as-is, so a neighbor id
//! may appear that is not itself a key. Such ids are tolerated, never
//! repaired: [`GraphStore::neighbors`] reports an empty set for them and the
//! analyses skip them when traversing.
//!
//! ## Read Interface
//!
//! [`GraphStore::adjacency`] lends an immutable view of the live map. Use
//! [`GraphStore::to_adjacency`] when an independent copy is needed.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::trace;

use crate::error::GraphError;

/// Opaque vertex identifier.
pub type VertexId = u64;

/// Vertex → out-neighbor set, ordered by id.
pub type Adjacency = BTreeMap<VertexId, BTreeSet<VertexId>>;

static NO_NEIGHBORS: BTreeSet<VertexId> = BTreeSet::new();

// ---------------------------------------------------------------------------
// GraphStore
// ---------------------------------------------------------------------------

/// A directed graph stored as vertex → out-neighbor sets.
///
/// Duplicate edges collapse (neighbors are a set). Both vertex and neighbor
/// enumeration are in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GraphStore {
    adjacency: Adjacency,
}

impl GraphStore {
    /// Create an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    /// Wrap an existing adjacency map without validation.
    ///
    /// Neighbors that are not keys are kept; see the module docs.
    #[must_use]
    pub const fn from_adjacency(adjacency: Adjacency) -> Self {
        Self { adjacency }
    }

    /// Register `vertex` with no out-neighbors. Idempotent.
    pub fn add_vertex(&mut self, vertex: VertexId) {
        self.adjacency.entry(vertex).or_default();
    }

    /// Add the directed edge `from → to`.
    ///
    /// Returns `true` when a new edge was stored. Returns `false` when the
    /// edge already existed or either endpoint is unregistered, in which case
    /// the graph is left untouched.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        if !self.adjacency.contains_key(&to) {
            trace!(from, to, "dropping edge to unregistered vertex");
            return false;
        }
        let Some(neighbors) = self.adjacency.get_mut(&from) else {
            trace!(from, to, "dropping edge from unregistered vertex");
            return false;
        };
        neighbors.insert(to)
    }

    /// Borrow the live adjacency map.
    #[must_use]
    pub const fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Return an independent copy of the adjacency map.
    #[must_use]
    pub fn to_adjacency(&self) -> Adjacency {
        self.adjacency.clone()
    }

    /// Consume the store and return its adjacency map.
    #[must_use]
    pub fn into_adjacency(self) -> Adjacency {
        self.adjacency
    }

    /// Return `true` if `vertex` has been registered.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    /// Check that `vertex` is registered.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if it is not.
    pub fn require_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(vertex))
        }
    }

    /// Return `true` if the directed edge `from → to` is stored.
    #[must_use]
    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Return `true` if both `a → b` and `b → a` are stored.
    #[must_use]
    pub fn is_mutual(&self, a: VertexId, b: VertexId) -> bool {
        self.contains_edge(a, b) && self.contains_edge(b, a)
    }

    /// Out-neighbors of `vertex`; empty when the vertex has no entry.
    #[must_use]
    pub fn neighbors(&self, vertex: VertexId) -> &BTreeSet<VertexId> {
        self.adjacency.get(&vertex).unwrap_or(&NO_NEIGHBORS)
    }

    /// Registered vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// All stored edges as `(from, to)` in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&from, neighbors)| neighbors.iter().map(move |&to| (from, to)))
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// In-degree of every registered vertex (zero included).
    ///
    /// Edges into dangling neighbors are not counted.
    #[must_use]
    pub fn in_degrees(&self) -> BTreeMap<VertexId, usize> {
        let mut degrees: BTreeMap<VertexId, usize> =
            self.adjacency.keys().map(|&v| (v, 0)).collect();
        for (_, to) in self.edges() {
            if let Some(count) = degrees.get_mut(&to) {
                *count += 1;
            }
        }
        degrees
    }

    /// Build the transpose: same vertices, every edge reversed.
    ///
    /// Dangling neighbor ids become registered vertices of the transpose so
    /// that every reversed edge can be stored.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut transposed = Self::new();
        for (&vertex, neighbors) in &self.adjacency {
            transposed.add_vertex(vertex);
            for &neighbor in neighbors {
                transposed.add_vertex(neighbor);
            }
        }
        for (from, to) in self.edges() {
            transposed.add_edge(to, from);
        }
        transposed
    }

    /// BLAKE3 hash over the vertex set and the sorted edge list.
    ///
    /// Two stores with the same vertices and edges always hash equally.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for vertex in self.vertices() {
            hasher.update(b"v");
            hasher.update(&vertex.to_le_bytes());
        }
        for (from, to) in self.edges() {
            hasher.update(b"e");
            hasher.update(&from.to_le_bytes());
            hasher.update(&to.to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize())
    }

    /// Convert to a petgraph [`DiGraph`] whose node weights are vertex ids.
    ///
    /// Nodes are added in ascending id order. Edges into dangling neighbors
    /// are omitted.
    #[must_use]
    pub fn to_digraph(&self) -> (DiGraph<VertexId, ()>, HashMap<VertexId, NodeIndex>) {
        let mut graph = DiGraph::<VertexId, ()>::with_capacity(self.vertex_count(), self.edge_count());
        let mut node_map: HashMap<VertexId, NodeIndex> = HashMap::with_capacity(self.vertex_count());

        for vertex in self.vertices() {
            node_map.insert(vertex, graph.add_node(vertex));
        }
        for (from, to) in self.edges() {
            if let (Some(&a), Some(&b)) = (node_map.get(&from), node_map.get(&to)) {
                graph.add_edge(a, b, ());
            }
        }

        (graph, node_map)
    }
}

/// Collect `(from, to)` pairs, registering both endpoints of each edge first.
impl FromIterator<(VertexId, VertexId)> for GraphStore {
    fn from_iter<I: IntoIterator<Item = (VertexId, VertexId)>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<(VertexId, VertexId)> for GraphStore {
    fn extend<I: IntoIterator<Item = (VertexId, VertexId)>>(&mut self, iter: I) {
        for (from, to) in iter {
            self.add_vertex(from);
            self.add_vertex(to);
            self.add_edge(from, to);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
