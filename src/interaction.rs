//! The pointer-driven interaction state machine.
//!
//! Dragging a node, panning the canvas, drawing a pending connection, and
//! resizing a node are mutually exclusive modes. Instead of independent
//! booleans that can drift out of sync, the controller holds exactly one
//! [`InteractionState`] at a time and every transition happens synchronously
//! inside a pointer handler — two modes can never be simultaneously active,
//! so a pan delta can never contaminate a drag and vice versa.
//!
//! Pointer events arrive in screen space; the controller maps them through
//! the [`Viewport`](crate::viewport::Viewport) where graph coordinates are
//! needed and mutates the [`GraphStore`](crate::graph::GraphStore) through
//! its validated entry points only.
//!
//! # State Machine
//!
//! ```text
//!                down on output port ──────► Connecting ── up on input port ──► add_edge
//!                down on resize handle ────► Resizing
//! Idle ──┤       down on node body ────────► DraggingNode
//!                down on empty canvas ─────► Panning
//!
//! any non-idle state ── up / cancel / endpoint deleted ──► Idle
//! ```

use tracing::{debug, trace};

use crate::geometry::{Point, Size, Vector};
use crate::graph::{GraphStore, HitTarget};
use crate::types::{EdgeId, NodeId};
use crate::viewport::Viewport;

/// Which pointer button an event carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// The main button; the only one that arms interactions.
    Primary,
    Secondary,
    Auxiliary,
}

/// The single active interaction mode.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum InteractionState {
    /// No interaction in progress.
    #[default]
    Idle,
    /// A node follows the pointer; `grab` is the graph-space offset from the
    /// node's origin to where it was picked up.
    DraggingNode { node: NodeId, grab: Vector },
    /// The canvas follows the pointer; `anchor` is re-captured on every move
    /// so long drags accumulate no rounding drift.
    Panning { anchor: Point },
    /// A connection is being drawn from `source`; `cursor` is the live
    /// rubber-band endpoint in graph coordinates.
    Connecting { source: NodeId, cursor: Point },
    /// A node is being resized from `initial`; `anchor` is the screen-space
    /// point where the handle was grabbed.
    Resizing {
        node: NodeId,
        anchor: Point,
        initial: Size,
    },
}

impl InteractionState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// Whether this state references the given node as drag subject,
    /// connection source, or resize subject.
    #[must_use]
    pub fn involves(&self, id: NodeId) -> bool {
        match self {
            InteractionState::Idle | InteractionState::Panning { .. } => false,
            InteractionState::DraggingNode { node, .. }
            | InteractionState::Resizing { node, .. } => *node == id,
            InteractionState::Connecting { source, .. } => *source == id,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::DraggingNode { .. } => "dragging",
            InteractionState::Panning { .. } => "panning",
            InteractionState::Connecting { .. } => "connecting",
            InteractionState::Resizing { .. } => "resizing",
        }
    }
}

/// What a pointer-move actually changed, so the caller can notify observers
/// without re-diffing the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEffect {
    /// Nothing changed (idle move, or a move with no delta to apply).
    None,
    /// A node was dragged to a new position.
    NodeMoved(NodeId),
    /// The viewport pan offset changed.
    Panned,
    /// The pending connection's rubber-band endpoint moved.
    CursorMoved,
    /// A node was resized.
    NodeResized(NodeId),
}

/// Finite-state machine over pointer events.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Handles a pointer-down at a screen-space point.
    ///
    /// Only the primary button arms a transition, and only from `Idle`: a
    /// down that arrives mid-interaction (a missed up, a second button) is
    /// ignored rather than allowed to corrupt the active mode.
    pub fn pointer_down(
        &mut self,
        store: &GraphStore,
        viewport: &Viewport,
        at: Point,
        button: PointerButton,
    ) {
        if button != PointerButton::Primary {
            return;
        }
        if !self.state.is_idle() {
            trace!(state = self.state.name(), "pointer down ignored mid-interaction");
            return;
        }

        let graph_point = viewport.screen_to_graph(at);
        self.state = match store.hit_test(graph_point) {
            HitTarget::OutputPort(source) => InteractionState::Connecting {
                source,
                cursor: graph_point,
            },
            HitTarget::ResizeHandle(node) => {
                let initial = store
                    .node(node)
                    .map(|n| n.size())
                    .unwrap_or_default();
                InteractionState::Resizing {
                    node,
                    anchor: at,
                    initial,
                }
            }
            HitTarget::Body(node) | HitTarget::InputPort(node) => {
                let origin = store
                    .node(node)
                    .map(|n| n.position())
                    .unwrap_or(Point::ORIGIN);
                InteractionState::DraggingNode {
                    node,
                    grab: graph_point - origin,
                }
            }
            HitTarget::Canvas => InteractionState::Panning { anchor: at },
        };
        trace!(state = self.state.name(), "pointer down");
    }

    /// Handles a pointer-move at a screen-space point.
    pub fn pointer_move(
        &mut self,
        store: &mut GraphStore,
        viewport: &mut Viewport,
        at: Point,
    ) -> PointerEffect {
        match self.state {
            InteractionState::Idle => PointerEffect::None,
            InteractionState::DraggingNode { node, grab } => {
                let position = viewport.screen_to_graph(at) - grab;
                if store.move_node(node, position).is_err() {
                    // The subject vanished without a node_removed call.
                    debug!(%node, "drag subject disappeared; resetting to idle");
                    self.state = InteractionState::Idle;
                    return PointerEffect::None;
                }
                PointerEffect::NodeMoved(node)
            }
            InteractionState::Panning { anchor } => {
                viewport.pan_by(at - anchor);
                self.state = InteractionState::Panning { anchor: at };
                PointerEffect::Panned
            }
            InteractionState::Connecting { source, .. } => {
                self.state = InteractionState::Connecting {
                    source,
                    cursor: viewport.screen_to_graph(at),
                };
                PointerEffect::CursorMoved
            }
            InteractionState::Resizing {
                node,
                anchor,
                initial,
            } => {
                if store.resize_node(node, initial + (at - anchor)).is_err() {
                    debug!(%node, "resize subject disappeared; resetting to idle");
                    self.state = InteractionState::Idle;
                    return PointerEffect::None;
                }
                PointerEffect::NodeResized(node)
            }
        }
    }

    /// Handles a pointer-up at a screen-space point.
    ///
    /// Every mode returns to `Idle` unconditionally. A release while
    /// connecting additionally attempts the edge when it lands on a
    /// processor's input port; refusals are discarded silently.
    pub fn pointer_up(
        &mut self,
        store: &mut GraphStore,
        viewport: &Viewport,
        at: Point,
    ) -> Option<EdgeId> {
        let finished = std::mem::replace(&mut self.state, InteractionState::Idle);
        let InteractionState::Connecting { source, .. } = finished else {
            return None;
        };

        let graph_point = viewport.screen_to_graph(at);
        let HitTarget::InputPort(target) = store.hit_test(graph_point) else {
            trace!(%source, "connection released over empty space; discarded");
            return None;
        };
        match store.add_edge(source, target) {
            Ok(edge) => Some(edge),
            Err(rejected) => {
                debug!(%source, %target, %rejected, "connection refused");
                None
            }
        }
    }

    /// Abandons whatever interaction is in progress.
    pub fn cancel(&mut self) {
        if !self.state.is_idle() {
            trace!(state = self.state.name(), "interaction cancelled");
            self.state = InteractionState::Idle;
        }
    }

    /// Forced reset when a node underlying the active interaction is
    /// deleted.
    pub fn node_removed(&mut self, id: NodeId) {
        if self.state.involves(id) {
            debug!(node = %id, state = self.state.name(), "interaction subject deleted; forced reset");
            self.state = InteractionState::Idle;
        }
    }
}
