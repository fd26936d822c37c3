//! The authoritative node/edge container and its invariant-preserving
//! mutation operations.
//!
//! Every mutation of graph data — interactive or resolved from an async
//! completion — goes through a [`GraphStore`] method. Each method is a total
//! function over the current graph: it either applies fully or refuses with a
//! typed value, and the store is structurally valid on every return path
//! (no dangling edges, no duplicate connections, no partial updates).

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::geometry::{Point, Size};
use crate::message::{Message, MessageKey};
use crate::types::{EdgeId, MessageId, NodeId, NodeVariant};

use super::edge::{Edge, EdgeRejected};
use super::node::{Node, PORT_HIT_RADIUS};

/// Faults for operations aimed at a node that is absent or of the wrong
/// variant. Unlike [`EdgeRejected`], these indicate a caller bug rather than
/// an ordinary user action, so they carry diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GraphError {
    #[error("node not found: {id}")]
    #[diagnostic(code(flowcanvas::graph::node_not_found))]
    NodeNotFound { id: NodeId },

    #[error("node {id} is not a source")]
    #[diagnostic(
        code(flowcanvas::graph::not_a_source),
        help("Drafts only exist on source nodes.")
    )]
    NotASource { id: NodeId },

    #[error("node {id} is not a processor")]
    #[diagnostic(
        code(flowcanvas::graph::not_a_processor),
        help("Message logs and completion flags only exist on processor nodes.")
    )]
    NotAProcessor { id: NodeId },
}

/// What a graph-space point lands on, in hit priority order.
///
/// Ports win over the resize handle, which wins over the node body; among
/// overlapping nodes the topmost (most recently added) wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// A source node's output port (arming point for a new connection).
    OutputPort(NodeId),
    /// A processor node's input port (release target for a connection).
    InputPort(NodeId),
    /// The resize handle in a node's bottom-right corner.
    ResizeHandle(NodeId),
    /// The node body anywhere else inside its bounds.
    Body(NodeId),
    /// Empty canvas.
    Canvas,
}

/// The authoritative set of nodes and edges.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: FxHashMap<NodeId, Node>,
    edges: FxHashMap<EdgeId, Edge>,
    /// Insertion order; doubles as z-order (later entries draw on top).
    node_order: Vec<NodeId>,
    edge_order: Vec<EdgeId>,
}

impl GraphStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- nodes -------------------------------------------------------------

    /// Adds a node of the given variant at `position` with the variant's
    /// default size.
    pub fn add_node(&mut self, variant: NodeVariant, position: Point) -> NodeId {
        self.insert_node(Node::new(variant, position))
    }

    /// Adds a node with an explicit size (clamped to the variant minimum).
    pub fn add_node_sized(&mut self, variant: NodeVariant, position: Point, size: Size) -> NodeId {
        self.insert_node(Node::with_size(variant, position, size))
    }

    fn insert_node(&mut self, node: Node) -> NodeId {
        let id = node.id();
        debug!(node = %id, variant = %node.variant(), "node added");
        self.nodes.insert(id, node);
        self.node_order.push(id);
        id
    }

    /// Removes a node and every incident edge atomically.
    ///
    /// Returns whether the node existed. Removing an absent node is a no-op,
    /// never a fault.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if self.nodes.remove(&id).is_none() {
            return false;
        }
        self.node_order.retain(|n| *n != id);
        self.edge_order
            .retain(|e| !self.edges.get(e).is_some_and(|edge| edge.touches(id)));
        self.edges.retain(|_, edge| !edge.touches(id));
        debug!(node = %id, "node removed with incident edges");
        true
    }

    /// Moves a node to a new position. Positions are unconstrained.
    pub fn move_node(&mut self, id: NodeId, position: Point) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound { id })?;
        node.set_position(position);
        Ok(())
    }

    /// Resizes a node, clamping to the variant's minimum size.
    pub fn resize_node(&mut self, id: NodeId, size: Size) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound { id })?;
        node.set_size(size);
        Ok(())
    }

    // --- edges -------------------------------------------------------------

    /// Attempts to connect `source` → `target`.
    ///
    /// Refusals are silent from the user's point of view: a duplicate attempt
    /// is idempotent and no variant of [`EdgeRejected`] leaves any trace in
    /// the store.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId, EdgeRejected> {
        if source == target {
            return Err(EdgeRejected::SelfLoop);
        }
        let source_node = self
            .nodes
            .get(&source)
            .ok_or(EdgeRejected::SourceMissing { id: source })?;
        let target_node = self
            .nodes
            .get(&target)
            .ok_or(EdgeRejected::TargetMissing { id: target })?;
        if !source_node.variant().is_source() {
            return Err(EdgeRejected::InvalidSource { id: source });
        }
        if !target_node.variant().is_processor() {
            return Err(EdgeRejected::InvalidTarget { id: target });
        }
        if self.edge_between(source, target).is_some() {
            return Err(EdgeRejected::Duplicate { source_id: source, target });
        }

        let edge = Edge::new(source, target);
        let id = edge.id();
        debug!(edge = %id, %source, %target, "edge added");
        self.edges.insert(id, edge);
        self.edge_order.push(id);
        Ok(id)
    }

    /// Removes an edge. Returns whether it existed.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        if self.edges.remove(&id).is_none() {
            return false;
        }
        self.edge_order.retain(|e| *e != id);
        debug!(edge = %id, "edge removed");
        true
    }

    // --- drafts & message logs ---------------------------------------------

    /// Replaces a source node's draft text.
    pub fn update_draft(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound { id })?;
        if !node.set_draft(text.into()) {
            return Err(GraphError::NotASource { id });
        }
        Ok(())
    }

    /// Takes a source node's draft, leaving it empty.
    pub fn take_draft(&mut self, id: NodeId) -> Result<String, GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound { id })?;
        node.take_draft().ok_or(GraphError::NotASource { id })
    }

    /// Appends a message to a processor node's log, preserving arrival order.
    pub fn append_message(&mut self, id: NodeId, message: Message) -> Result<MessageId, GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound { id })?;
        let message_id = message.id;
        if !node.push_message(message) {
            return Err(GraphError::NotAProcessor { id });
        }
        Ok(message_id)
    }

    /// Marks a processor as having an in-flight completion request and
    /// records `key` in its dedup ledger.
    pub fn begin_completion(&mut self, id: NodeId, key: MessageKey) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound { id })?;
        if !node.mark_pending(key) {
            return Err(GraphError::NotAProcessor { id });
        }
        Ok(())
    }

    /// Clears a processor's in-flight flag. The dedup ledger is untouched:
    /// an answered (or failed) key never re-issues.
    pub fn finish_completion(&mut self, id: NodeId) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound { id })?;
        if !node.clear_pending() {
            return Err(GraphError::NotAProcessor { id });
        }
        Ok(())
    }

    // --- queries -----------------------------------------------------------

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Nodes in z-order (bottom first).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_order.iter().filter_map(|id| self.edges.get(id))
    }

    /// Edges leaving the given node.
    pub fn edges_from(&self, source: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges().filter(move |e| e.source() == source)
    }

    /// Edges arriving at the given node.
    pub fn edges_into(&self, target: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges().filter(move |e| e.target() == target)
    }

    #[must_use]
    pub fn edge_between(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.edges()
            .find(|e| e.source() == source && e.target() == target)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Resolves what a graph-space point lands on.
    ///
    /// Scans nodes top-down so overlapping nodes resolve to the one drawn
    /// last; within a node, port anchors win over the resize handle, which
    /// wins over the body.
    #[must_use]
    pub fn hit_test(&self, at: Point) -> HitTarget {
        for id in self.node_order.iter().rev() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if let Some(port) = node.output_port()
                && at.distance(port) <= PORT_HIT_RADIUS
            {
                return HitTarget::OutputPort(*id);
            }
            if let Some(port) = node.input_port()
                && at.distance(port) <= PORT_HIT_RADIUS
            {
                return HitTarget::InputPort(*id);
            }
            if node.resize_handle().contains(at) {
                return HitTarget::ResizeHandle(*id);
            }
            if node.bounds().contains(at) {
                return HitTarget::Body(*id);
            }
        }
        HitTarget::Canvas
    }
}
