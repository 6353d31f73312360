use composer_fsm::Frame;
use indexmap::IndexMap;
use serde_json::json;

use crate::environment::Environment;

fn let_frame(pairs: &[(&str, serde_json::Value)]) -> Frame {
    let mut bindings = IndexMap::new();
    for (name, value) in pairs {
        bindings.insert(name.to_string(), value.clone());
    }
    Frame::Let { bindings }
}

#[test]
fn shallower_frame_overrides_deeper_on_name_collision() {
    let stack = vec![
        let_frame(&[("count", json!(1))]),
        let_frame(&[("count", json!(99))]),
    ];
    let env = Environment::from_stack(&stack);
    assert_eq!(env.get("count"), Some(&json!(1)));
}

#[test]
fn merges_bindings_from_multiple_frames() {
    let stack = vec![
        let_frame(&[("b", json!(2))]),
        let_frame(&[("a", json!(1))]),
    ];
    let env = Environment::from_stack(&stack);
    assert_eq!(env.get("a"), Some(&json!(1)));
    assert_eq!(env.get("b"), Some(&json!(2)));
}

#[test]
fn ignores_non_let_frames() {
    let stack = vec![
        Frame::Catch { catch: 0 },
        Frame::Push { params: json!({}) },
        let_frame(&[("x", json!(1))]),
    ];
    let env = Environment::from_stack(&stack);
    assert_eq!(env.get("x"), Some(&json!(1)));
    assert_eq!(env.names().count(), 1);
}

#[test]
fn set_on_undeclared_name_is_dropped() {
    let stack = vec![let_frame(&[("x", json!(1))])];
    let mut env = Environment::from_stack(&stack);
    env.set("y", json!(2));
    assert_eq!(env.get("y"), None);
}

#[test]
fn write_back_updates_only_the_topmost_declaring_frame() {
    let mut stack = vec![
        let_frame(&[("count", json!(1))]),
        let_frame(&[("count", json!(99))]),
    ];
    let mut env = Environment::from_stack(&stack);
    env.set("count", json!(2));
    env.write_back(&mut stack);

    match &stack[0] {
        Frame::Let { bindings } => assert_eq!(bindings.get("count"), Some(&json!(2))),
        other => panic!("expected Let frame, got {other:?}"),
    }
    match &stack[1] {
        Frame::Let { bindings } => assert_eq!(bindings.get("count"), Some(&json!(99))),
        other => panic!("expected Let frame, got {other:?}"),
    }
}
