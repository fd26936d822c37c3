//! Graph store: the authoritative node/edge model and its invariants.
//!
//! The graph is intentionally bipartite and acyclic by construction: edges
//! run from [`NodeVariant::Source`](crate::types::NodeVariant::Source) nodes
//! to [`NodeVariant::Processor`](crate::types::NodeVariant::Processor) nodes
//! and nowhere else, at most one edge per (source, target) pair, and deleting
//! a node removes its incident edges in the same operation — no dangling edge
//! is ever observable.
//!
//! # Core Types
//!
//! - [`GraphStore`]: owns nodes and edges; every mutation is one of its
//!   methods
//! - [`Node`] / [`Edge`]: read-only views of graph entities
//! - [`HitTarget`]: what a graph-space point resolves to (ports, handle,
//!   body, canvas)
//! - [`EdgeRejected`]: expected-flow refusals for invalid connection attempts
//! - [`GraphError`]: faults for operations against absent or wrong-variant
//!   nodes
//!
//! # Quick Start
//!
//! ```
//! use flowcanvas::geometry::Point;
//! use flowcanvas::graph::GraphStore;
//! use flowcanvas::types::NodeVariant;
//!
//! let mut store = GraphStore::new();
//! let source = store.add_node(NodeVariant::Source, Point::new(100.0, 100.0));
//! let processor = store.add_node(NodeVariant::Processor, Point::new(500.0, 100.0));
//!
//! let edge = store.add_edge(source, processor).expect("valid connection");
//! assert_eq!(store.edge_count(), 1);
//!
//! // Reverse connections are refused, not thrown.
//! assert!(store.add_edge(processor, source).is_err());
//!
//! // Deleting a node cascades to its edges atomically.
//! store.remove_node(processor);
//! assert_eq!(store.edge_count(), 0);
//! assert!(store.edge(edge).is_none());
//! ```

mod edge;
mod node;
mod store;

#[cfg(test)]
mod tests;

pub use edge::{Edge, EdgeRejected};
pub use node::{Node, PORT_HIT_RADIUS, PORT_OFFSET_Y, RESIZE_HANDLE_SIZE};
pub use store::{GraphError, GraphStore, HitTarget};
