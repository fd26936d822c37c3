use std::sync::Arc;

use flowcanvas::completion::CompletionClient;
use flowcanvas::editor::EditorSession;
use flowcanvas::geometry::Point;
use flowcanvas::interaction::PointerButton;
use flowcanvas::types::{EdgeId, NodeId, NodeVariant};

/// Drives a full drag gesture through the pointer entry points.
#[allow(dead_code)]
pub fn drag(session: &mut EditorSession, from: Point, to: Point) {
    session.pointer_down(from, PointerButton::Primary);
    session.pointer_move(to);
    session.pointer_up(to);
}

/// Draws a connection from `source`'s output port to `processor`'s input
/// port, returning the created edge (if the store accepted it).
#[allow(dead_code)]
pub fn connect(
    session: &mut EditorSession,
    source: NodeId,
    processor: NodeId,
) -> Option<EdgeId> {
    let output = session
        .store()
        .node(source)
        .expect("source node")
        .output_port()
        .expect("output port");
    let input = session
        .store()
        .node(processor)
        .expect("processor node")
        .input_port()
        .expect("input port");
    session.pointer_down(output, PointerButton::Primary);
    session.pointer_move(input);
    session.pointer_up(input)
}

/// A session with one source wired to one processor, laid out far enough
/// apart that their ports do not overlap.
#[allow(dead_code)]
pub fn wired_session(client: Arc<dyn CompletionClient>) -> (EditorSession, NodeId, NodeId) {
    let mut session = EditorSession::new(client);
    let source = session.add_node(NodeVariant::Source);
    let processor = session.add_node(NodeVariant::Processor);

    // Spawn positions stagger but overlap; pull the processor clear first.
    drag(&mut session, Point::new(300.0, 300.0), Point::new(900.0, 300.0));
    assert_eq!(
        session.store().node(processor).expect("node").position(),
        Point::new(700.0, 130.0)
    );

    connect(&mut session, source, processor).expect("connection accepted");
    (session, source, processor)
}
