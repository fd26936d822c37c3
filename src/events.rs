//! Change notifications for render layers and other observers.
//!
//! Every committed mutation — and only committed mutations; refusals emit
//! nothing — produces one [`EditorEvent`]. Observers subscribe through the
//! session and receive events over their own unbounded channel, so a slow
//! consumer never blocks the editor and a dropped receiver is pruned on the
//! next emit.

use flume::{Receiver, Sender};
use tracing::trace;

use crate::types::{EdgeId, MessageId, NodeId, NodeVariant};

/// A committed state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    NodeAdded { node: NodeId, variant: NodeVariant },
    NodeRemoved { node: NodeId },
    NodeMoved { node: NodeId },
    NodeResized { node: NodeId },
    EdgeAdded { edge: EdgeId },
    EdgeRemoved { edge: EdgeId },
    DraftChanged { node: NodeId },
    MessageAppended { node: NodeId, message: MessageId },
    /// A completion request was issued for the node.
    CompletionStarted { node: NodeId },
    /// A completion resolved (successfully or not) into the node's log.
    CompletionResolved { node: NodeId, ok: bool },
    ViewportChanged,
}

/// Fan-out hub for [`EditorEvent`]s.
#[derive(Debug, Default)]
pub struct EventHub {
    subscribers: Vec<Sender<EditorEvent>>,
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new subscription. Each subscriber gets its own channel and
    /// sees every event emitted after this call.
    pub fn subscribe(&mut self) -> Receiver<EditorEvent> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Broadcasts an event to all live subscribers, pruning closed ones.
    pub fn emit(&mut self, event: EditorEvent) {
        trace!(?event, "editor event");
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
