//! Graph store and the analyses that run over it.
//!
//! # Overview
//!
//! [`GraphStore`] is the only mutable type. Every analysis borrows a store
//! through its read interface ([`GraphStore::adjacency`] and helpers) and
//! returns freshly built, independent values:
//!
//! ```text
//! edge list / add_vertex + add_edge
//!        ↓
//! GraphStore ──┬─ egonet::egonet()                         → GraphStore
//!              ├─ scc::strongly_connected_components()     → Vec<GraphStore>
//!              ├─ cover::greedy_cover()                    → Vec<VertexId>
//!              └─ stats::GraphStats::compute()             → GraphStats
//! ```
//!
//! ## Mutual edges
//!
//! The store is directed, but the egonet and SCC edge reconstruction treat a
//! pair of opposite directed edges as one "mutual acquaintance". A one-way
//! edge never makes a neighbor part of an egonet.
//!
//! ## Snapshots
//!
//! Results own their data and are `Send + Sync`, so they can be handed to a
//! presentation thread once computed. Nothing here locks or shares state.

pub mod cover;
pub mod egonet;
pub mod scc;
pub mod stats;
pub mod store;

// Re-export primary types at module level for convenience.
pub use cover::{CoverStep, greedy_cover, greedy_cover_steps};
pub use egonet::egonet;
pub use scc::{component_sets, strongly_connected_components};
pub use stats::GraphStats;
pub use store::{Adjacency, GraphStore, VertexId};
