//! Directed edges and the refusal values returned when a connection attempt
//! violates the graph's structural invariants.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{EdgeId, NodeId};

/// A directed, validated connection from a source node to a processor node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
}

impl Edge {
    pub(crate) fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            target,
        }
    }

    #[must_use]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    #[must_use]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Whether this edge touches the given node at either end.
    #[must_use]
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Why a connection attempt was refused.
///
/// These are expected-flow outcomes of ordinary user actions (re-clicking a
/// port, dropping a wire on the wrong node), not faults: callers discard them
/// silently and the store is untouched on every variant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EdgeRejected {
    /// The two endpoints are the same node.
    #[error("a node cannot connect to itself")]
    #[diagnostic(code(flowcanvas::graph::self_loop))]
    SelfLoop,

    /// The source endpoint is not in the store.
    #[error("connection source {id} does not exist")]
    #[diagnostic(code(flowcanvas::graph::source_missing))]
    SourceMissing { id: NodeId },

    /// The target endpoint is not in the store.
    #[error("connection target {id} does not exist")]
    #[diagnostic(code(flowcanvas::graph::target_missing))]
    TargetMissing { id: NodeId },

    /// The source endpoint is not a source-variant node.
    #[error("connections must start at a source node")]
    #[diagnostic(code(flowcanvas::graph::invalid_source))]
    InvalidSource { id: NodeId },

    /// The target endpoint is not a processor-variant node.
    #[error("connections must end at a processor node")]
    #[diagnostic(code(flowcanvas::graph::invalid_target))]
    InvalidTarget { id: NodeId },

    /// An edge between this (source, target) pair already exists.
    #[error("these nodes are already connected")]
    #[diagnostic(code(flowcanvas::graph::duplicate_edge))]
    Duplicate { source_id: NodeId, target: NodeId },
}
