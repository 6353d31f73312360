use crate::builder;
use crate::node::Node;

#[test]
fn repeat_desugars_to_let_wrapping_while() {
    let c = builder::repeat(3, ["do-something"]).unwrap();
    match c.node {
        Node::Let(l) => {
            assert_eq!(l.declarations.get("count").and_then(|v| v.as_i64()), Some(3));
            match *l.body {
                Node::While(w) => match *w.test {
                    Node::Function(f) => assert!(f.exec.code.contains("count")),
                    other => panic!("expected Function test, got {other:?}"),
                },
                other => panic!("expected While body, got {other:?}"),
            }
        }
        other => panic!("expected Let, got {other:?}"),
    }
}

#[test]
fn retry_desugars_to_let_wrapping_retain_then_while_then_projection() {
    let c = builder::retry(2, ["flaky-action"]).unwrap();
    match c.node {
        Node::Let(l) => {
            assert_eq!(l.declarations.get("count").and_then(|v| v.as_i64()), Some(2));
            match *l.body {
                Node::Sequence(seq) => {
                    assert_eq!(seq.children.len(), 3);
                    assert!(matches!(seq.children[0], Node::Retain(_)));
                    assert!(matches!(seq.children[1], Node::While(_)));
                    assert!(matches!(seq.children[2], Node::Function(_)));
                }
                other => panic!("expected Sequence body, got {other:?}"),
            }
        }
        other => panic!("expected Let, got {other:?}"),
    }
}

#[test]
fn retain_catch_desugars_to_retain_of_finally_then_field_projection() {
    let c = builder::retain(
        "an-action",
        crate::options::RetainOptions {
            catch: true,
            ..Default::default()
        },
    )
    .unwrap();
    match c.node {
        // The outer `retain` is the plain, `collect: true` shape (§3.1's
        // "retained `finally`"); its body is `finally` (wraps success or
        // `{error}` in `{result}`) followed by a `collect: false` `retain`
        // that projects `result` back out without ever running it through
        // a `function`/`literal`/`pass` step — see `desugar::project_field`.
        Node::Retain(outer) => {
            assert!(outer.collect);
            match *outer.body {
                Node::Sequence(seq) => {
                    assert_eq!(seq.children.len(), 2);
                    assert!(matches!(seq.children[0], Node::Finally(_)));
                    match &seq.children[1] {
                        Node::Retain(unwrap) => {
                            assert!(!unwrap.collect);
                            assert_eq!(unwrap.field.as_deref(), Some("result"));
                        }
                        other => panic!("expected Retain projection, got {other:?}"),
                    }
                }
                other => panic!("expected Sequence body, got {other:?}"),
            }
        }
        other => panic!("expected Retain, got {other:?}"),
    }
}

#[test]
fn retain_filter_desugars_to_sequence_of_capture_then_retain() {
    let c = builder::retain(
        "an-action",
        crate::options::RetainOptions {
            filter: Some("p => p.id".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    match c.node {
        Node::Sequence(seq) => {
            assert_eq!(seq.children.len(), 2);
            assert!(matches!(seq.children[0], Node::Function(_)));
            assert!(matches!(seq.children[1], Node::Retain(_)));
        }
        other => panic!("expected Sequence, got {other:?}"),
    }
}
