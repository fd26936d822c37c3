//! Node data for the graph store: geometry, variant payloads, and the port
//! and handle anchors hit testing relies on.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};
use crate::message::{Message, MessageKey};
use crate::types::{NodeId, NodeVariant};

/// Vertical offset from a node's top edge to its port anchors, graph units.
pub const PORT_OFFSET_Y: f64 = 50.0;

/// Hit radius around a port anchor, in graph units (world-space, so it
/// scales with zoom like the nodes themselves).
pub const PORT_HIT_RADIUS: f64 = 12.0;

/// Side length of the square resize handle in a node's bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f64 = 16.0;

/// A graph vertex: either a draft-authoring source or a message-logging
/// processor.
///
/// All mutation goes through [`GraphStore`](crate::graph::GraphStore); the
/// public surface here is read-only so that render layers and tests cannot
/// bypass the store's invariant checks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    position: Point,
    size: Size,
    payload: Payload,
}

/// Variant-specific node state.
#[derive(Clone, Debug, Serialize, Deserialize)]
enum Payload {
    Source {
        draft: String,
    },
    Processor {
        messages: Vec<Message>,
        /// A completion request is outstanding. Transient, never serialized.
        #[serde(skip)]
        pending: bool,
        /// Dedup ledger of already-processed message keys. Transient.
        #[serde(skip)]
        processed: FxHashSet<MessageKey>,
    },
}

impl Node {
    pub(crate) fn new(variant: NodeVariant, position: Point) -> Self {
        Self::with_size(variant, position, variant.default_size())
    }

    pub(crate) fn with_size(variant: NodeVariant, position: Point, size: Size) -> Self {
        let payload = match variant {
            NodeVariant::Source => Payload::Source {
                draft: String::new(),
            },
            NodeVariant::Processor => Payload::Processor {
                messages: Vec::new(),
                pending: false,
                processed: FxHashSet::default(),
            },
        };
        Self {
            id: NodeId::new(),
            position,
            size: size.max(variant.min_size()),
            payload,
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn variant(&self) -> NodeVariant {
        match self.payload {
            Payload::Source { .. } => NodeVariant::Source,
            Payload::Processor { .. } => NodeVariant::Processor,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The current draft text. `None` for processor nodes.
    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        match &self.payload {
            Payload::Source { draft } => Some(draft),
            Payload::Processor { .. } => None,
        }
    }

    /// The ordered message log. `None` for source nodes.
    #[must_use]
    pub fn messages(&self) -> Option<&[Message]> {
        match &self.payload {
            Payload::Processor { messages, .. } => Some(messages),
            Payload::Source { .. } => None,
        }
    }

    /// Whether a completion request is outstanding for this node.
    #[must_use]
    pub fn pending(&self) -> bool {
        matches!(self.payload, Payload::Processor { pending: true, .. })
    }

    /// Whether the dedup ledger already holds this key.
    #[must_use]
    pub fn is_processed(&self, key: MessageKey) -> bool {
        match &self.payload {
            Payload::Processor { processed, .. } => processed.contains(&key),
            Payload::Source { .. } => false,
        }
    }

    /// Bounding rectangle in graph coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Output port anchor on the right edge; source nodes only.
    #[must_use]
    pub fn output_port(&self) -> Option<Point> {
        self.variant().is_source().then(|| {
            Point::new(
                self.position.x + self.size.width,
                self.position.y + PORT_OFFSET_Y,
            )
        })
    }

    /// Input port anchor on the left edge; processor nodes only.
    #[must_use]
    pub fn input_port(&self) -> Option<Point> {
        self.variant()
            .is_processor()
            .then(|| Point::new(self.position.x, self.position.y + PORT_OFFSET_Y))
    }

    /// The square resize handle in the bottom-right corner.
    #[must_use]
    pub fn resize_handle(&self) -> Rect {
        Rect::new(
            Point::new(
                self.position.x + self.size.width - RESIZE_HANDLE_SIZE,
                self.position.y + self.size.height - RESIZE_HANDLE_SIZE,
            ),
            Size::new(RESIZE_HANDLE_SIZE, RESIZE_HANDLE_SIZE),
        )
    }

    // --- store-internal mutation -------------------------------------------

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size.max(self.variant().min_size());
    }

    pub(crate) fn set_draft(&mut self, text: String) -> bool {
        match &mut self.payload {
            Payload::Source { draft } => {
                *draft = text;
                true
            }
            Payload::Processor { .. } => false,
        }
    }

    pub(crate) fn take_draft(&mut self) -> Option<String> {
        match &mut self.payload {
            Payload::Source { draft } => Some(std::mem::take(draft)),
            Payload::Processor { .. } => None,
        }
    }

    pub(crate) fn push_message(&mut self, message: Message) -> bool {
        match &mut self.payload {
            Payload::Processor { messages, .. } => {
                messages.push(message);
                true
            }
            Payload::Source { .. } => false,
        }
    }

    pub(crate) fn mark_pending(&mut self, key: MessageKey) -> bool {
        match &mut self.payload {
            Payload::Processor {
                pending, processed, ..
            } => {
                *pending = true;
                processed.insert(key);
                true
            }
            Payload::Source { .. } => false,
        }
    }

    pub(crate) fn clear_pending(&mut self) -> bool {
        match &mut self.payload {
            Payload::Processor { pending, .. } => {
                *pending = false;
                true
            }
            Payload::Source { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports_follow_variant() {
        let source = Node::new(NodeVariant::Source, Point::new(10.0, 20.0));
        assert_eq!(source.output_port(), Some(Point::new(310.0, 70.0)));
        assert_eq!(source.input_port(), None);

        let processor = Node::new(NodeVariant::Processor, Point::new(0.0, 0.0));
        assert_eq!(processor.input_port(), Some(Point::new(0.0, 50.0)));
        assert_eq!(processor.output_port(), None);
    }

    #[test]
    fn test_resize_handle_sits_in_corner() {
        let node = Node::new(NodeVariant::Source, Point::new(0.0, 0.0));
        let handle = node.resize_handle();
        assert!(handle.contains(Point::new(299.0, 119.0)));
        assert!(!handle.contains(Point::new(250.0, 60.0)));
    }

    #[test]
    fn test_set_size_clamps_to_minimum() {
        let mut node = Node::new(NodeVariant::Processor, Point::ORIGIN);
        node.set_size(Size::new(1.0, 1.0));
        assert_eq!(node.size(), NodeVariant::Processor.min_size());
    }

    #[test]
    fn test_payload_accessors_respect_variant() {
        let mut source = Node::new(NodeVariant::Source, Point::ORIGIN);
        assert!(source.set_draft("hello".into()));
        assert_eq!(source.draft(), Some("hello"));
        assert!(source.messages().is_none());
        assert!(!source.push_message(Message::user("nope")));

        let mut processor = Node::new(NodeVariant::Processor, Point::ORIGIN);
        assert!(processor.draft().is_none());
        assert!(processor.push_message(Message::user("hi")));
        assert_eq!(processor.messages().map(<[Message]>::len), Some(1));
    }
}
