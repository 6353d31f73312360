//! Integration tests for [`Conductor::run`], grounded in §8's concrete
//! scenarios. Each test builds a composition with `composer-core`,
//! compiles it with `composer-compiler`, and runs it against a small
//! table-driven [`MockEvaluator`] rather than `BoaEvaluator` — the
//! toolchain can't be exercised to confirm `boa_engine`'s own behavior,
//! but every function source used here is plain enough that its result
//! is exactly what a real engine would report.

use std::cell::RefCell;
use std::collections::HashMap;

use composer_compiler as compiler;
use composer_core::builder::{self, Task};
use composer_core::options::{IfOptions, RetainOptions};
use composer_core::Exec;
use serde_json::{json, Value};

use crate::output::ConductorOutput;
use crate::Conductor;
use composer_script::{EvalOutcome, Environment, Evaluator, ScriptError};

/// Reports a fixed (or, via [`MockEvaluator::on_sequence`], a per-call)
/// [`EvalOutcome`] per exact source string, and counts how many times
/// each source was invoked.
#[derive(Default)]
struct MockEvaluator {
    responses: HashMap<&'static str, Vec<EvalOutcome>>,
    calls: RefCell<HashMap<String, u32>>,
}

impl MockEvaluator {
    fn new() -> Self {
        Self::default()
    }

    fn on(self, source: &'static str, outcome: EvalOutcome) -> Self {
        self.on_sequence(source, vec![outcome])
    }

    /// Registers one outcome per call: the Nth call to `source` gets
    /// `outcomes[N]`, and every call past the end repeats the last entry.
    /// Needed for loop tests (e.g. `retry`) where the test function's
    /// result must change across iterations.
    fn on_sequence(mut self, source: &'static str, outcomes: Vec<EvalOutcome>) -> Self {
        self.responses.insert(source, outcomes);
        self
    }

    fn calls(&self, source: &str) -> u32 {
        self.calls.borrow().get(source).copied().unwrap_or(0)
    }
}

impl Evaluator for MockEvaluator {
    fn call(&self, exec: &Exec, _env: &mut Environment, params: &Value) -> Result<EvalOutcome, ScriptError> {
        let index = {
            let mut calls = self.calls.borrow_mut();
            let count = calls.entry(exec.code.clone()).or_insert(0);
            let index = *count as usize;
            *count += 1;
            index
        };
        let outcomes = self
            .responses
            .get(exec.code.as_str())
            .ok_or_else(|| ScriptError::Evaluation(format!("no mock response for: {}", exec.code)))?;
        outcomes
            .get(index)
            .or_else(|| outcomes.last())
            .cloned()
            .ok_or_else(|| ScriptError::Evaluation(format!("no mock response for: {}", exec.code)))
    }
}

fn incrementer() -> MockEvaluator {
    MockEvaluator::new().on("p=>({x:p.x+1})", EvalOutcome::Value(json!({ "x": 2 })))
}

#[test]
fn sequence_of_literal_and_function_runs_to_terminal_success() {
    let ast = builder::sequence([
        Task::Node(builder::literal(json!({"x": 1})).unwrap()),
        Task::Node(builder::function("p=>({x:p.x+1})").unwrap()),
    ])
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let out = conductor.run(&incrementer(), json!({})).unwrap();
    assert_eq!(out, ConductorOutput::Success { params: json!({ "x": 2 }) });
}

#[test]
fn if_true_branch_wraps_the_consequent_value() {
    let ast = builder::if_(
        Task::Node(builder::literal(json!({"value": true})).unwrap()),
        Task::Node(builder::literal(json!("yes")).unwrap()),
        Task::Node(builder::literal(json!("no")).unwrap()),
        IfOptions::default(),
    )
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let out = conductor.run(&MockEvaluator::new(), json!({})).unwrap();
    assert_eq!(out, ConductorOutput::Success { params: json!({ "value": "yes" }) });
}

#[test]
fn if_false_branch_is_taken_on_strict_value_check() {
    // params.value is the string "true", not the boolean — choice must
    // not treat it as truthy.
    let ast = builder::if_(
        Task::Node(builder::literal(json!({"value": "true"})).unwrap()),
        Task::Node(builder::literal(json!("yes")).unwrap()),
        Task::Node(builder::literal(json!("no")).unwrap()),
        IfOptions::default(),
    )
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let out = conductor.run(&MockEvaluator::new(), json!({})).unwrap();
    assert_eq!(out, ConductorOutput::Success { params: json!({ "value": "no" }) });
}

#[test]
fn try_handler_runs_after_body_throws() {
    let ast = builder::try_(
        Task::Node(builder::function("()=>{throw 0}").unwrap()),
        Task::Node(builder::function("e=>({ok:true})").unwrap()),
    )
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let evaluator = MockEvaluator::new()
        .on("()=>{throw 0}", EvalOutcome::Threw("0".to_string()))
        .on("e=>({ok:true})", EvalOutcome::Value(json!({ "ok": true })));

    let out = conductor.run(&evaluator, json!({})).unwrap();
    assert_eq!(out, ConductorOutput::Success { params: json!({ "ok": true }) });
}

#[test]
fn try_falls_through_the_handler_when_body_succeeds() {
    let ast = builder::try_(
        Task::Node(builder::literal(json!({"ok": true})).unwrap()),
        Task::Node(builder::literal(json!({"ok": false})).unwrap()),
    )
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let out = conductor.run(&MockEvaluator::new(), json!({})).unwrap();
    assert_eq!(out, ConductorOutput::Success { params: json!({ "ok": true }) });
}

#[test]
fn repeat_runs_the_body_exactly_n_times_and_restores_outer_params() {
    // Initial params and the body's per-iteration output are deliberately
    // different values, so a pass that mixes them up (e.g. the loop's
    // `pop` leaking the last iteration's value instead of the pre-loop
    // snapshot) shows up as a wrong final result rather than being
    // masked by both sides happening to be `{}`.
    let ast = builder::repeat(3, [builder::script("() => ({y:2})")]).unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let evaluator = MockEvaluator::new().on("() => ({y:2})", EvalOutcome::Value(json!({ "y": 2 })));
    let out = conductor.run(&evaluator, json!({ "x": 1 })).unwrap();

    assert_eq!(out, ConductorOutput::Success { params: json!({ "x": 1 }) });
    assert_eq!(evaluator.calls("() => ({y:2})"), 3);
}

#[test]
fn plain_retain_pairs_the_pre_body_snapshot_with_the_body_result() {
    let ast = builder::retain(
        Task::Node(builder::literal(json!({"y": 2})).unwrap()),
        RetainOptions::default(),
    )
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let out = conductor.run(&MockEvaluator::new(), json!({"x": 1})).unwrap();
    assert_eq!(
        out,
        ConductorOutput::Success {
            params: json!({ "params": {"x": 1}, "result": {"y": 2} })
        }
    );
}

#[test]
fn retain_with_field_captures_only_the_named_field() {
    let ast = builder::retain(
        Task::Node(builder::literal(json!("done")).unwrap()),
        RetainOptions { field: Some("id".to_string()), ..Default::default() },
    )
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let out = conductor.run(&MockEvaluator::new(), json!({"id": "abc", "other": 1})).unwrap();
    assert_eq!(
        out,
        ConductorOutput::Success {
            params: json!({ "params": "abc", "result": {"value": "done"} })
        }
    );
}

/// The source every `retry`-internal `finally` finalizer runs, wrapping
/// whatever the attempt produced (success value or bare `{error}`) in
/// `{result: …}` so it can safely carry an `error` field without
/// re-triggering `inspect`'s unwind.
const RETRY_WRAP_FINALIZER: &str = "(p) => ({ result: p })";

#[test]
fn retry_skips_the_loop_entirely_when_the_first_attempt_succeeds() {
    let ast = builder::retry(2, [builder::script("(p)=>({ok:true})")]).unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let evaluator = MockEvaluator::new()
        .on("(p)=>({ok:true})", EvalOutcome::Value(json!({ "ok": true })))
        .on(RETRY_WRAP_FINALIZER, EvalOutcome::Value(json!({ "result": {"ok": true} })))
        .on(
            "(p) => ({ value: !!(p.result && p.result.error) && count-- > 0, params: p.params, result: p.result })",
            EvalOutcome::Value(json!({ "value": false, "params": {}, "result": {"ok": true} })),
        )
        .on("(p) => p.result", EvalOutcome::Value(json!({ "ok": true })));
    let out = conductor.run(&evaluator, json!({})).unwrap();

    assert_eq!(out, ConductorOutput::Success { params: json!({ "ok": true }) });
    assert_eq!(evaluator.calls("(p)=>({ok:true})"), 1);
}

#[test]
fn retry_runs_the_body_n_plus_one_times_then_surfaces_the_final_error() {
    // §8 scenario 6: a body that always fails must still run exactly
    // `n+1` times (one initial attempt plus `n` retries) before the
    // retained `{error}` is allowed to surface as the terminal outcome.
    const TEST: &str =
        "(p) => ({ value: !!(p.result && p.result.error) && count-- > 0, params: p.params, result: p.result })";

    let ast = builder::retry(2, [builder::script("()=>({error:'e'})")]).unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let evaluator = MockEvaluator::new()
        .on("()=>({error:'e'})", EvalOutcome::Value(json!({ "error": "e" })))
        .on(RETRY_WRAP_FINALIZER, EvalOutcome::Value(json!({ "result": {"error": "e"} })))
        .on("(p) => p.params", EvalOutcome::Value(json!({})))
        .on_sequence(
            TEST,
            vec![
                // count: 2 -> true (retry), 1 -> true (retry), 0 -> false (give up)
                EvalOutcome::Value(json!({ "value": true, "params": {}, "result": {"error": "e"} })),
                EvalOutcome::Value(json!({ "value": true, "params": {}, "result": {"error": "e"} })),
                EvalOutcome::Value(json!({ "value": false, "params": {}, "result": {"error": "e"} })),
            ],
        )
        .on("(p) => p.result", EvalOutcome::Value(json!({ "error": "e" })));
    let out = conductor.run(&evaluator, json!({})).unwrap();

    assert_eq!(out, ConductorOutput::Error { error: "e".to_string(), code: 500 });
    assert_eq!(evaluator.calls("()=>({error:'e'})"), 3);
    assert_eq!(evaluator.calls(TEST), 3);
    assert_eq!(evaluator.calls("(p) => p.params"), 2);
}

#[test]
fn action_state_suspends_with_an_invoke_and_embedded_resume() {
    let ast = builder::sequence([
        Task::Node(builder::action("do-something", Default::default()).unwrap()),
        Task::Node(builder::literal(json!("done")).unwrap()),
    ])
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let out = conductor.run(&MockEvaluator::new(), json!({"in": 1})).unwrap();
    match out {
        ConductorOutput::Invoke { action, params, state, stack } => {
            assert_eq!(action, "do-something");
            assert_eq!(params, json!({"in": 1}));
            assert_eq!(state, Some(1));
            assert!(stack.is_empty());
        }
        other => panic!("expected an Invoke suspension, got {other:?}"),
    }
}

#[test]
fn resuming_an_invoke_continues_to_the_next_state() {
    let ast = builder::sequence([
        Task::Node(builder::action("do-something", Default::default()).unwrap()),
        Task::Node(builder::function("p=>({x:p.x+1})").unwrap()),
    ])
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let first = conductor.run(&incrementer(), json!({"x": 1})).unwrap();
    let ConductorOutput::Invoke { state, stack, .. } = first else {
        panic!("expected a suspension");
    };

    let resumed_params = json!({
        "x": 41,
        "$resume": { "state": state, "stack": stack },
    });
    let out = conductor.run(&incrementer(), resumed_params).unwrap();
    assert_eq!(out, ConductorOutput::Success { params: json!({ "x": 2 }) });
}

#[test]
fn an_error_returned_by_the_just_run_action_is_routed_on_resume() {
    let ast = builder::try_(
        Task::Node(builder::action("flaky", Default::default()).unwrap()),
        Task::Node(builder::function("e=>({handled:true})").unwrap()),
    )
    .unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let evaluator =
        MockEvaluator::new().on("e=>({handled:true})", EvalOutcome::Value(json!({ "handled": true })));

    let first = conductor.run(&evaluator, json!({})).unwrap();
    let ConductorOutput::Invoke { state, stack, .. } = first else {
        panic!("expected a suspension");
    };

    let resumed_params = json!({
        "error": "remote failure",
        "$resume": { "state": state, "stack": stack },
    });
    let out = conductor.run(&evaluator, resumed_params).unwrap();
    assert_eq!(out, ConductorOutput::Success { params: json!({ "handled": true }) });
}

#[test]
fn a_malformed_resume_is_reported_as_a_bad_request() {
    let ast = builder::literal(json!("x")).unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let err = conductor
        .run(&MockEvaluator::new(), json!({"$resume": "not an object"}))
        .unwrap_err();
    assert_eq!(err.code(), 400);
}

#[test]
fn an_uncaught_error_terminates_with_a_terminal_error() {
    let ast = builder::function("()=>{throw 0}").unwrap();
    let program = compiler::compile(&ast.node).unwrap();
    let conductor = Conductor::new(&program);

    let evaluator = MockEvaluator::new().on("()=>{throw 0}", EvalOutcome::Threw("0".to_string()));
    let out = conductor.run(&evaluator, json!({})).unwrap();
    assert_eq!(
        out,
        ConductorOutput::Error {
            error: "An exception was caught at state 0".to_string(),
            code: 500,
        }
    );
}

#[test]
fn resume_state_of_none_terminates_after_inspecting() {
    let program = composer_fsm::Program::new(vec![composer_fsm::State::Action {
        name: "last".to_string(),
        next: None,
    }]);
    let conductor = Conductor::new(&program);

    let out = conductor.run(&MockEvaluator::new(), json!({"in": 1})).unwrap();
    let ConductorOutput::Invoke { state, stack, .. } = out else {
        panic!("expected a suspension");
    };
    assert_eq!(state, None);

    let resumed = json!({ "x": 1, "$resume": { "state": state, "stack": stack } });
    let out = conductor.run(&MockEvaluator::new(), resumed).unwrap();
    assert_eq!(out, ConductorOutput::Success { params: json!({ "x": 1 }) });
}
