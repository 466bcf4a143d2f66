#![forbid(unsafe_code)]
//! sociogram-core library.
//!
//! An adjacency-set directed graph plus the three analyses the `sg` CLI
//! presents: Kosaraju strongly connected components, mutual egonets and a
//! greedy dominating-set ("cover") approximation.
//!
//! # Conventions
//!
//! - **Errors**: Only ingestion is fallible; it returns [`GraphError`]
//!   (`thiserror`). Graph algorithms never fail and degrade to empty results.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`, `warn!`). The
//!   library never installs a subscriber.
//! - **Determinism**: Vertices and neighbors are stored in ordered sets, so
//!   every traversal and every result is in ascending vertex-id order.
//!
//! ```rust
//! use sociogram_core::graph::{GraphStore, egonet, greedy_cover, strongly_connected_components};
//!
//! let graph: GraphStore = [(1, 2), (2, 1), (2, 3), (3, 2)].into_iter().collect();
//!
//! assert_eq!(egonet(&graph, 2).vertex_count(), 3);
//! assert_eq!(strongly_connected_components(&graph).len(), 1);
//! assert_eq!(greedy_cover(&graph), vec![2]);
//! ```

pub mod error;
pub mod graph;
pub mod load;

pub use error::GraphError;
pub use graph::{Adjacency, CoverStep, GraphStats, GraphStore, VertexId};
pub use load::{LoadOptions, LoadReport, parse_edge_list};
