//! User input commands accepted by the editor session.

use crate::geometry::Point;
use crate::interaction::PointerButton;
use crate::types::{EdgeId, NodeId, NodeVariant};

/// One user input event, as delivered by the host shell.
///
/// The host owns raw input decoding: it maps Enter-without-modifier on a
/// focused source node to [`SubmitDraft`](Command::SubmitDraft), mouse events
/// to the pointer commands, and ctrl/cmd+wheel to
/// [`WheelZoom`](Command::WheelZoom) with `zoom_modifier` set. Every command
/// routes through [`EditorSession::dispatch`](crate::editor::EditorSession::dispatch),
/// which is the session's single mutation entry point.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Spawn a node of the given variant at the next staggered position.
    AddNode { variant: NodeVariant },
    /// Delete a node and its incident edges.
    DeleteNode { node: NodeId },
    /// Delete a single edge.
    DeleteEdge { edge: EdgeId },
    /// Replace a source node's draft text.
    UpdateDraft { node: NodeId, text: String },
    /// Submit a source node's draft into its connected processors.
    SubmitDraft { node: NodeId },
    /// Pointer pressed at a screen-space point.
    PointerDown { at: Point, button: PointerButton },
    /// Pointer moved to a screen-space point.
    PointerMove { at: Point },
    /// Pointer released at a screen-space point.
    PointerUp { at: Point },
    /// Abandon the in-progress interaction (e.g. Escape).
    CancelInteraction,
    /// One discrete zoom-in step.
    ZoomIn,
    /// One discrete zoom-out step.
    ZoomOut,
    /// Continuous wheel zoom; inert unless the zoom modifier is held.
    WheelZoom { delta_y: f64, zoom_modifier: bool },
    /// Restore zoom 1 and zero pan.
    ResetView,
}
