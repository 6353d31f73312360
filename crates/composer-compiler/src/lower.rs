//! Lowers a composition AST to a flat sequence of FSM states (§4.2).
//!
//! Every `compile_*` helper returns a self-contained, relocatable
//! `Vec<State>`: all of its internal jumps are already correct relative
//! offsets, so splicing it into a parent block never needs to touch
//! anything but the *boundary* between blocks (typically just the last
//! state's `next`, via [`patch_tail`]). Because every sub-tree is fully
//! compiled before its parent, every jump length needed by §4.2's rules
//! (`|cons'|`, `|body|`, …) is already known by the time it's used, so
//! this compiler never needs a deferred-label patch pass. Each emitted
//! block's final structural soundness is still checked independently, by
//! [`crate::verify`].

use composer_core::node::Node;
use composer_fsm::state::State;

pub fn lower(ast: &Node) -> Vec<State> {
    match ast {
        Node::Action(a) => vec![State::Action { name: a.name.clone(), next: None }],
        Node::Function(f) => vec![State::Function { exec: f.exec.clone(), next: None }],
        Node::Literal(l) => vec![State::Literal { value: l.value.clone(), next: None }],
        Node::Sequence(seq) => lower_sequence(&seq.children),
        Node::If(i) => lower_if(&i.test, &i.consequent, &i.alternate, i.nosave),
        Node::While(w) => lower_while(&w.test, &w.body, w.nosave),
        Node::Try(t) => lower_try(&t.body, &t.handler),
        Node::Finally(f) => lower_finally(&f.body, &f.finalizer),
        Node::Let(l) => lower_let(&l.declarations, &l.body),
        Node::Retain(r) => lower_retain(&r.body, r.field.clone(), r.collect),
    }
}

/// Patches the last state of a just-compiled block to jump `offset`
/// states away. Every block this compiler ever produces ends in a state
/// that carries a `next` field (never a bare `Choice`), so this never
/// hits `State::set_next`'s `unreachable!()` branch.
fn patch_tail(block: &mut [State], offset: i32) {
    block
        .last_mut()
        .expect("a compiled block always has at least one state")
        .set_next(offset);
}

fn lower_sequence(children: &[Node]) -> Vec<State> {
    if children.is_empty() {
        return vec![State::Pass { next: None }];
    }
    let mut blocks: Vec<Vec<State>> = children.iter().map(lower).collect();
    let last = blocks.len() - 1;
    for block in blocks.iter_mut().take(last) {
        patch_tail(block, 1);
    }
    blocks.into_iter().flatten().collect()
}

fn lower_if(test: &Node, consequent: &Node, alternate: &Node, nosave: bool) -> Vec<State> {
    let mut out = Vec::new();
    if !nosave {
        out.push(State::Push { field: None, next: Some(1) });
    }

    let mut test_block = lower(test);
    patch_tail(&mut test_block, 1);
    out.extend(test_block);

    let mut cons_block = lower(consequent);
    if !nosave {
        cons_block.insert(0, State::Pop { collect: false, next: Some(1) });
    }
    let mut alt_block = lower(alternate);
    if !nosave {
        alt_block.insert(0, State::Pop { collect: false, next: Some(1) });
    }

    let cons_len = cons_block.len() as i32;
    let alt_len = alt_block.len() as i32;

    out.push(State::Choice { then: 1, else_: cons_len + 1 });

    patch_tail(&mut cons_block, alt_len + 1);
    out.extend(cons_block);

    patch_tail(&mut alt_block, 1);
    out.extend(alt_block);

    out.push(State::Pass { next: None });
    out
}

fn lower_while(test: &Node, body: &Node, nosave: bool) -> Vec<State> {
    let mut out = Vec::new();
    if !nosave {
        out.push(State::Push { field: None, next: Some(1) });
    }

    let test_start = out.len();
    let mut test_block = lower(test);
    patch_tail(&mut test_block, 1);
    out.extend(test_block);

    let mut body_block = lower(body);
    let body_len = body_block.len() as i32;
    out.push(State::Choice { then: 1, else_: body_len + 1 });

    let body_start = out.len();
    let body_last = body_start + body_block.len() - 1;
    let back_to_top = test_start as i32 - body_last as i32;
    patch_tail(&mut body_block, back_to_top);
    out.extend(body_block);

    if !nosave {
        out.push(State::Pop { collect: false, next: Some(1) });
    }
    out.push(State::Pass { next: None });
    out
}

fn lower_try(body: &Node, handler: &Node) -> Vec<State> {
    let mut out = Vec::new();
    let mut body_block = lower(body);
    let body_len = body_block.len() as i32;
    out.push(State::Try { catch: 1 + body_len, next: Some(1) });

    let mut handler_block = lower(handler);
    let handler_len = handler_block.len() as i32;
    patch_tail(&mut body_block, handler_len + 1);
    out.extend(body_block);

    patch_tail(&mut handler_block, 1);
    out.extend(handler_block);

    out.push(State::Pass { next: None });
    out
}

fn lower_finally(body: &Node, finalizer: &Node) -> Vec<State> {
    let mut out = Vec::new();
    let mut body_block = lower(body);
    let body_len = body_block.len() as i32;
    out.push(State::Try { catch: 1 + body_len + 1, next: Some(1) });

    patch_tail(&mut body_block, 1);
    out.extend(body_block);

    out.push(State::Exit { next: Some(1) });

    out.extend(lower(finalizer));
    out
}

fn lower_let(declarations: &indexmap::IndexMap<String, serde_json::Value>, body: &Node) -> Vec<State> {
    let mut out = vec![State::Let { bindings: declarations.clone(), next: Some(1) }];
    let mut body_block = lower(body);
    patch_tail(&mut body_block, 1);
    out.extend(body_block);
    out.push(State::Exit { next: None });
    out
}

fn lower_retain(body: &Node, field: Option<String>, collect: bool) -> Vec<State> {
    let mut out = vec![State::Push { field, next: Some(1) }];
    let mut body_block = lower(body);
    patch_tail(&mut body_block, 1);
    out.extend(body_block);
    out.push(State::Pop { collect, next: None });
    out
}
