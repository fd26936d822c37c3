//! The editor session: one canvas, one mutation entry point.
//!
//! `EditorSession` owns the graph store, the viewport, the interaction state
//! machine, and the propagation engine, and serializes every mutation —
//! interactive commands and resolved completions alike — through `&mut self`
//! methods. Nothing mutates graph state concurrently: the spawned completion
//! tasks only ever send outcomes back over a channel, and the session applies
//! them between commands via [`pump`](EditorSession::pump) or
//! [`run_until_settled`](EditorSession::run_until_settled).

use std::sync::Arc;

use tracing::debug;

use crate::completion::CompletionClient;
use crate::events::{EditorEvent, EventHub};
use crate::graph::{Edge, GraphStore, Node};
use crate::interaction::{InteractionController, InteractionState, PointerButton, PointerEffect};
use crate::geometry::Point;
use crate::propagation::{AppliedCompletion, CompletionOutcome, PropagationEngine};
use crate::types::{EdgeId, NodeId, NodeVariant};
use crate::viewport::{Viewport, ZOOM_STEP_IN, ZOOM_STEP_OUT};

use super::command::Command;

/// Read-only view of the whole editor state for one render pass.
#[derive(Clone, Debug)]
pub struct EditorSnapshot {
    /// Nodes in z-order (bottom first).
    pub nodes: Vec<Node>,
    /// Edges in creation order.
    pub edges: Vec<Edge>,
    pub viewport: Viewport,
    pub interaction: InteractionState,
}

/// An interactive node-graph editing session.
pub struct EditorSession {
    store: GraphStore,
    viewport: Viewport,
    controller: InteractionController,
    engine: PropagationEngine,
    hub: EventHub,
    /// Counts spawned nodes to stagger their initial positions.
    spawned: u32,
}

impl EditorSession {
    /// Creates a session talking to the given completion boundary.
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            store: GraphStore::new(),
            viewport: Viewport::new(),
            controller: InteractionController::new(),
            engine: PropagationEngine::new(client),
            hub: EventHub::new(),
            spawned: 0,
        }
    }

    // --- observation -------------------------------------------------------

    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.controller.state()
    }

    /// Completion requests currently outstanding.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.engine.in_flight()
    }

    /// Opens a change-notification subscription for a render layer.
    pub fn subscribe(&mut self) -> flume::Receiver<EditorEvent> {
        self.hub.subscribe()
    }

    /// Clones the full editor state for one render pass.
    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            nodes: self.store.nodes().cloned().collect(),
            edges: self.store.edges().cloned().collect(),
            viewport: self.viewport,
            interaction: self.controller.state(),
        }
    }

    // --- the single mutation entry point -----------------------------------

    /// Applies one user input command.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::AddNode { variant } => {
                self.add_node(variant);
            }
            Command::DeleteNode { node } => {
                self.delete_node(node);
            }
            Command::DeleteEdge { edge } => {
                self.delete_edge(edge);
            }
            Command::UpdateDraft { node, text } => self.update_draft(node, text),
            Command::SubmitDraft { node } => self.submit_draft(node),
            Command::PointerDown { at, button } => self.pointer_down(at, button),
            Command::PointerMove { at } => self.pointer_move(at),
            Command::PointerUp { at } => {
                self.pointer_up(at);
            }
            Command::CancelInteraction => self.cancel_interaction(),
            Command::ZoomIn => self.zoom_by(ZOOM_STEP_IN),
            Command::ZoomOut => self.zoom_by(ZOOM_STEP_OUT),
            Command::WheelZoom {
                delta_y,
                zoom_modifier,
            } => self.wheel_zoom(delta_y, zoom_modifier),
            Command::ResetView => self.reset_view(),
        }
    }

    /// Spawns a node at the next staggered position.
    pub fn add_node(&mut self, variant: NodeVariant) -> NodeId {
        let position = Point::new(100.0, 100.0 + f64::from(self.spawned % 10 * 30));
        self.spawned = self.spawned.wrapping_add(1);
        let node = self.store.add_node(variant, position);
        self.hub.emit(EditorEvent::NodeAdded { node, variant });
        node
    }

    /// Deletes a node, its incident edges, and — when the node underlies the
    /// active interaction — force-resets the state machine to idle.
    pub fn delete_node(&mut self, node: NodeId) -> bool {
        if !self.store.remove_node(node) {
            return false;
        }
        self.controller.node_removed(node);
        self.hub.emit(EditorEvent::NodeRemoved { node });
        true
    }

    pub fn delete_edge(&mut self, edge: EdgeId) -> bool {
        if !self.store.remove_edge(edge) {
            return false;
        }
        self.hub.emit(EditorEvent::EdgeRemoved { edge });
        true
    }

    /// Replaces a source node's draft text.
    pub fn update_draft(&mut self, node: NodeId, text: impl Into<String>) {
        match self.store.update_draft(node, text) {
            Ok(()) => self.hub.emit(EditorEvent::DraftChanged { node }),
            Err(err) => debug!(%node, %err, "draft update ignored"),
        }
    }

    /// Submits a source node's draft into every connected processor and runs
    /// the per-processor reconciliation passes.
    pub fn submit_draft(&mut self, node: NodeId) {
        match self.engine.submit(&mut self.store, node) {
            Ok(report) => {
                if report.is_noop() {
                    return;
                }
                self.hub.emit(EditorEvent::DraftChanged { node });
                for (processor, message) in &report.appended {
                    self.hub.emit(EditorEvent::MessageAppended {
                        node: *processor,
                        message: *message,
                    });
                }
                for processor in &report.requested {
                    self.hub
                        .emit(EditorEvent::CompletionStarted { node: *processor });
                }
            }
            Err(err) => debug!(%node, %err, "submission ignored"),
        }
    }

    pub fn pointer_down(&mut self, at: Point, button: PointerButton) {
        self.controller
            .pointer_down(&self.store, &self.viewport, at, button);
    }

    pub fn pointer_move(&mut self, at: Point) {
        let effect = self
            .controller
            .pointer_move(&mut self.store, &mut self.viewport, at);
        match effect {
            PointerEffect::NodeMoved(node) => self.hub.emit(EditorEvent::NodeMoved { node }),
            PointerEffect::NodeResized(node) => self.hub.emit(EditorEvent::NodeResized { node }),
            PointerEffect::Panned => self.hub.emit(EditorEvent::ViewportChanged),
            PointerEffect::CursorMoved | PointerEffect::None => {}
        }
    }

    /// Releases the pointer; a completed connection reports the new edge.
    pub fn pointer_up(&mut self, at: Point) -> Option<EdgeId> {
        let edge = self.controller.pointer_up(&mut self.store, &self.viewport, at);
        if let Some(edge) = edge {
            self.hub.emit(EditorEvent::EdgeAdded { edge });
        }
        edge
    }

    pub fn cancel_interaction(&mut self) {
        self.controller.cancel();
    }

    fn zoom_by(&mut self, factor: f64) {
        let before = self.viewport;
        self.viewport.zoom_by(factor);
        if self.viewport != before {
            self.hub.emit(EditorEvent::ViewportChanged);
        }
    }

    /// Ctrl/cmd + wheel zoom: scrolling down zooms out, up zooms in. Without
    /// the modifier the wheel belongs to the host (scrolling), so the command
    /// is inert.
    pub fn wheel_zoom(&mut self, delta_y: f64, zoom_modifier: bool) {
        if !zoom_modifier || delta_y == 0.0 {
            return;
        }
        self.zoom_by(if delta_y > 0.0 {
            ZOOM_STEP_OUT
        } else {
            ZOOM_STEP_IN
        });
    }

    pub fn reset_view(&mut self) {
        let before = self.viewport;
        self.viewport.reset();
        if self.viewport != before {
            self.hub.emit(EditorEvent::ViewportChanged);
        }
    }

    // --- completion resolution ---------------------------------------------

    /// Applies every already-resolved completion without blocking. Returns
    /// how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(outcome) = self.engine.try_next_outcome() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Awaits and applies completions until none are outstanding, including
    /// follow-up requests triggered by implicitly queued submissions.
    /// Returns how many resolutions were applied.
    pub async fn run_until_settled(&mut self) -> usize {
        let mut applied = 0;
        loop {
            while let Some(outcome) = self.engine.try_next_outcome() {
                self.apply(outcome);
                applied += 1;
            }
            if self.engine.in_flight() == 0 {
                break;
            }
            let outcome = self.engine.next_outcome().await;
            match outcome {
                Some(outcome) => {
                    self.apply(outcome);
                    applied += 1;
                }
                None => break,
            }
        }
        applied
    }

    fn apply(&mut self, outcome: CompletionOutcome) {
        match self.engine.apply_outcome(&mut self.store, outcome) {
            AppliedCompletion::Discarded { .. } => {}
            AppliedCompletion::Resolved {
                node,
                ok,
                appended,
                followup,
            } => {
                for message in appended {
                    self.hub.emit(EditorEvent::MessageAppended { node, message });
                }
                self.hub.emit(EditorEvent::CompletionResolved { node, ok });
                if followup {
                    self.hub.emit(EditorEvent::CompletionStarted { node });
                }
            }
        }
    }
}
