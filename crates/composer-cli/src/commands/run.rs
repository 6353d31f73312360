//! Drives `composer-conductor::Conductor` to completion for local
//! testing (§6.2's wire contract, run entirely in-process). A real
//! platform invokes one action and delivers its result back across a
//! network hop; `--actions` stands in for that hop with a static lookup
//! table, so a multi-step composition can be exercised end to end
//! without deploying anything.

use std::collections::HashMap;

use composer_conductor::{Conductor, ConductorOutput, NoopTracer, PrintTracer};
use composer_fsm::Program;
use composer_script::BoaEvaluator;
use serde_json::{json, Value};

use crate::cli::RunArgs;
use crate::util::{fail, parse_json, read_input};

pub fn run(args: RunArgs) {
    let source = read_input(Some(&args.program));
    let program: Program = parse_json(&source, "compiled program");

    let actions: HashMap<String, Value> = match &args.actions {
        Some(path) => parse_json(&read_input(Some(path)), "action table"),
        None => HashMap::new(),
    };

    let mut params: Value = serde_json::from_str(&args.params)
        .unwrap_or_else(|e| fail(format!("--params is not valid JSON: {e}")));

    let conductor = Conductor::new(&program);
    let evaluator = BoaEvaluator::default();

    for step in 0..args.max_steps {
        let outcome = if args.trace {
            conductor.run_with(&evaluator, params, &mut PrintTracer).unwrap_or_else(|e| fail(e))
        } else {
            conductor.run_with(&evaluator, params, &mut NoopTracer).unwrap_or_else(|e| fail(e))
        };

        let ConductorOutput::Invoke { action, state, stack, .. } = &outcome else {
            println!("{}", serde_json::to_string_pretty(&outcome.to_json()).expect("json values always serialize"));
            return;
        };

        let Some(result) = actions.get(action) else {
            println!("suspended at step {step}: {}", serde_json::to_string_pretty(&outcome.to_json()).expect("json values always serialize"));
            return;
        };

        params = merge_resume(result.clone(), *state, stack.clone());
    }

    fail::<()>(format!("exceeded --max-steps ({}) without reaching a terminal state", args.max_steps));
}

/// Builds the next invocation's params: the action's own result plus
/// `$resume`, per §6.2 ("a JSON object containing `$resume` ... plus any
/// user fields returned from the previously invoked action"). A
/// non-object result is wrapped under `value` so `$resume` still has an
/// object to live in.
fn merge_resume(result: Value, state: Option<usize>, stack: Vec<composer_fsm::Frame>) -> Value {
    let resume = json!({ "$resume": { "state": state, "stack": stack } });
    let mut object = match result {
        Value::Object(map) => map,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("value".to_string(), other);
            map
        }
    };
    if let Value::Object(resume_map) = resume {
        object.extend(resume_map);
    }
    Value::Object(object)
}
