//! Core identifier and variant types for the flowcanvas graph model.
//!
//! This module defines the fundamental types used throughout the crate for
//! identifying graph entities and distinguishing node variants. These are the
//! domain concepts that define what an editor graph *is*; the geometry and
//! behavior attached to them live in [`crate::graph`].
//!
//! # Key Types
//!
//! - [`NodeId`] / [`EdgeId`] / [`MessageId`]: opaque unique identifiers
//! - [`NodeVariant`]: distinguishes draft-authoring Source nodes from
//!   completion-sink Processor nodes
//!
//! # Examples
//!
//! ```rust
//! use flowcanvas::types::NodeVariant;
//!
//! let source = NodeVariant::Source;
//! assert!(source.is_source());
//! assert_eq!(source.encode(), "Source");
//! assert_eq!(NodeVariant::decode("Processor"), Some(NodeVariant::Processor));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::geometry::Size;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh, globally unique identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifies a node in the graph store.
    NodeId
);
uuid_id!(
    /// Identifies a directed edge between two nodes.
    EdgeId
);
uuid_id!(
    /// Identifies one entry in a processor node's message log.
    ///
    /// Distinct from [`MessageKey`](crate::message::MessageKey): the id is
    /// unique per entry, while the key is derived from content and used only
    /// for deduplication.
    MessageId
);

/// The variant of a graph node.
///
/// The graph is bipartite by construction: edges run from [`Source`] nodes
/// (which own an editable draft) to [`Processor`] nodes (which own an ordered
/// message log and talk to the completion boundary). Any other pairing is
/// rejected by [`GraphStore::add_edge`](crate::graph::GraphStore::add_edge).
///
/// [`Source`]: NodeVariant::Source
/// [`Processor`]: NodeVariant::Processor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeVariant {
    /// A node that authors draft text and fans it out along its edges.
    Source,
    /// A node that accumulates messages and requests completions for them.
    Processor,
}

impl NodeVariant {
    /// Encode the variant into its persisted string form.
    #[must_use]
    pub fn encode(&self) -> &'static str {
        match self {
            NodeVariant::Source => "Source",
            NodeVariant::Processor => "Processor",
        }
    }

    /// Decode a persisted string form back into a variant.
    #[must_use]
    pub fn decode(s: &str) -> Option<Self> {
        match s {
            "Source" => Some(NodeVariant::Source),
            "Processor" => Some(NodeVariant::Processor),
            _ => None,
        }
    }

    /// Returns `true` for [`NodeVariant::Source`].
    #[must_use]
    pub fn is_source(&self) -> bool {
        matches!(self, NodeVariant::Source)
    }

    /// Returns `true` for [`NodeVariant::Processor`].
    #[must_use]
    pub fn is_processor(&self) -> bool {
        matches!(self, NodeVariant::Processor)
    }

    /// The size a freshly spawned node of this variant gets.
    #[must_use]
    pub fn default_size(&self) -> Size {
        match self {
            NodeVariant::Source => Size::new(300.0, 120.0),
            NodeVariant::Processor => Size::new(350.0, 250.0),
        }
    }

    /// The smallest size a node of this variant may be resized to.
    #[must_use]
    pub fn min_size(&self) -> Size {
        match self {
            NodeVariant::Source => Size::new(180.0, 80.0),
            NodeVariant::Processor => Size::new(220.0, 140.0),
        }
    }
}

impl fmt::Display for NodeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeVariant::Source => write!(f, "source"),
            NodeVariant::Processor => write!(f, "processor"),
        }
    }
}
