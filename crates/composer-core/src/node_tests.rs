use serde_json::json;

use crate::node::{Exec, LiteralNode, Node};

#[test]
fn empty_sequence_has_no_children() {
    match Node::empty_sequence() {
        Node::Sequence(seq) => assert!(seq.children.is_empty()),
        other => panic!("expected Sequence, got {other:?}"),
    }
}

#[test]
fn exec_new_defaults_to_nodejs_kind() {
    let exec = Exec::new("() => 1");
    assert_eq!(exec.kind, Exec::DEFAULT_KIND);
    assert_eq!(exec.code, "() => 1");
}

#[test]
fn node_round_trips_through_json() {
    let node = Node::Literal(LiteralNode { value: json!({"x": 1}) });
    let encoded = serde_json::to_value(&node).expect("encode");
    let decoded: Node = serde_json::from_value(encoded).expect("decode");
    assert_eq!(node, decoded);
}
