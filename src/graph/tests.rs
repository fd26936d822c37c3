use crate::geometry::{Point, Size};
use crate::message::Message;
use crate::types::NodeVariant;

use super::edge::EdgeRejected;
use super::store::{GraphStore, HitTarget};

fn store_with_pair() -> (GraphStore, crate::types::NodeId, crate::types::NodeId) {
    let mut store = GraphStore::new();
    let source = store.add_node(NodeVariant::Source, Point::new(100.0, 100.0));
    let processor = store.add_node(NodeVariant::Processor, Point::new(600.0, 100.0));
    (store, source, processor)
}

#[test]
/// Edges only run Source → Processor; every other pairing is refused and
/// leaves the edge count untouched.
fn test_edge_direction_is_enforced() {
    let (mut store, source, processor) = store_with_pair();
    let other_source = store.add_node(NodeVariant::Source, Point::new(100.0, 400.0));
    let other_processor = store.add_node(NodeVariant::Processor, Point::new(600.0, 400.0));

    assert!(store.add_edge(source, processor).is_ok());
    assert_eq!(
        store.add_edge(processor, source),
        Err(EdgeRejected::InvalidSource { id: processor })
    );
    assert_eq!(
        store.add_edge(source, other_source),
        Err(EdgeRejected::InvalidTarget { id: other_source })
    );
    assert_eq!(
        store.add_edge(processor, other_processor),
        Err(EdgeRejected::InvalidSource { id: processor })
    );
    assert_eq!(store.add_edge(source, source), Err(EdgeRejected::SelfLoop));
    assert_eq!(store.edge_count(), 1);
}

#[test]
/// A second connection attempt for the same pair is refused as a duplicate;
/// the store keeps exactly one edge.
fn test_duplicate_edge_is_idempotent() {
    let (mut store, source, processor) = store_with_pair();
    store.add_edge(source, processor).expect("first connection");
    assert_eq!(
        store.add_edge(source, processor),
        Err(EdgeRejected::Duplicate {
            source_id: source,
            target: processor
        })
    );
    assert_eq!(store.edge_count(), 1);
}

#[test]
fn test_edge_to_missing_node_is_refused() {
    let (mut store, source, processor) = store_with_pair();
    store.remove_node(processor);
    assert_eq!(
        store.add_edge(source, processor),
        Err(EdgeRejected::TargetMissing { id: processor })
    );
}

#[test]
/// Deleting a node removes every incident edge in the same operation.
fn test_remove_node_cascades_edges() {
    let (mut store, source, processor) = store_with_pair();
    let second_source = store.add_node(NodeVariant::Source, Point::new(100.0, 400.0));
    store.add_edge(source, processor).expect("edge one");
    store.add_edge(second_source, processor).expect("edge two");
    assert_eq!(store.edge_count(), 2);

    assert!(store.remove_node(processor));
    assert_eq!(store.edge_count(), 0);
    assert!(store.edges().all(|e| !e.touches(processor)));

    // Removing it again is a silent no-op.
    assert!(!store.remove_node(processor));
}

#[test]
fn test_resize_clamps_to_variant_minimum() {
    let (mut store, source, _) = store_with_pair();
    store
        .resize_node(source, Size::new(10.0, 10.0))
        .expect("resize");
    let node = store.node(source).expect("node");
    assert_eq!(node.size(), NodeVariant::Source.min_size());

    store
        .resize_node(source, Size::new(640.0, 200.0))
        .expect("resize");
    assert_eq!(store.node(source).expect("node").size(), Size::new(640.0, 200.0));
}

#[test]
fn test_move_is_unconstrained() {
    let (mut store, source, _) = store_with_pair();
    store
        .move_node(source, Point::new(-4000.0, -2500.0))
        .expect("move");
    assert_eq!(
        store.node(source).expect("node").position(),
        Point::new(-4000.0, -2500.0)
    );
}

#[test]
fn test_draft_operations_respect_variant() {
    let (mut store, source, processor) = store_with_pair();
    store.update_draft(source, "hello").expect("update");
    assert_eq!(store.node(source).expect("node").draft(), Some("hello"));

    assert_eq!(store.take_draft(source).expect("take"), "hello");
    assert_eq!(store.node(source).expect("node").draft(), Some(""));

    assert!(store.update_draft(processor, "nope").is_err());
    assert!(store.take_draft(processor).is_err());
}

#[test]
fn test_append_message_preserves_order() {
    let (mut store, _, processor) = store_with_pair();
    store
        .append_message(processor, Message::user("first"))
        .expect("append");
    store
        .append_message(processor, Message::assistant("second"))
        .expect("append");
    let log = store.node(processor).expect("node").messages().expect("log");
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].content, "first");
    assert_eq!(log[1].content, "second");
}

#[test]
fn test_completion_flags_roundtrip() {
    let (mut store, source, processor) = store_with_pair();
    let key = Message::user("hello").key();

    store.begin_completion(processor, key).expect("begin");
    let node = store.node(processor).expect("node");
    assert!(node.pending());
    assert!(node.is_processed(key));

    store.finish_completion(processor).expect("finish");
    let node = store.node(processor).expect("node");
    assert!(!node.pending());
    // The ledger outlives the request.
    assert!(node.is_processed(key));

    assert!(store.begin_completion(source, key).is_err());
}

#[test]
/// Ports beat the resize handle, the handle beats the body, and the topmost
/// of two overlapping nodes wins.
fn test_hit_test_priorities() {
    let mut store = GraphStore::new();
    let source = store.add_node(NodeVariant::Source, Point::new(0.0, 0.0));
    let node = store.node(source).expect("node");
    let output = node.output_port().expect("port");
    let handle_center = Point::new(
        node.position().x + node.size().width - 8.0,
        node.position().y + node.size().height - 8.0,
    );

    assert_eq!(store.hit_test(output), HitTarget::OutputPort(source));
    assert_eq!(store.hit_test(handle_center), HitTarget::ResizeHandle(source));
    assert_eq!(
        store.hit_test(Point::new(150.0, 100.0)),
        HitTarget::Body(source)
    );
    assert_eq!(store.hit_test(Point::new(5000.0, 5000.0)), HitTarget::Canvas);

    // A processor stacked over the source claims the shared region.
    let processor = store.add_node(NodeVariant::Processor, Point::new(50.0, 10.0));
    assert_eq!(
        store.hit_test(Point::new(150.0, 100.0)),
        HitTarget::Body(processor)
    );
    let input = store
        .node(processor)
        .expect("node")
        .input_port()
        .expect("port");
    assert_eq!(store.hit_test(input), HitTarget::InputPort(processor));
}

#[test]
fn test_edges_from_and_into() {
    let (mut store, source, processor) = store_with_pair();
    let second_source = store.add_node(NodeVariant::Source, Point::new(100.0, 400.0));
    store.add_edge(source, processor).expect("edge");
    store.add_edge(second_source, processor).expect("edge");

    assert_eq!(store.edges_from(source).count(), 1);
    assert_eq!(store.edges_into(processor).count(), 2);
    assert!(store.edge_between(source, processor).is_some());
    assert!(store.edge_between(second_source, source).is_none());
}
