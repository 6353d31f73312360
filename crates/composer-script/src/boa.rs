//! [`BoaEvaluator`]: runs a `function` node's source against a fresh
//! `boa_engine::Context` per call.
//!
//! A fresh context per call (rather than one long-lived engine reused
//! across steps) mirrors §5's "no shared resources" rule: nothing a
//! function observes can be left over from an earlier, unrelated step.
//! The environment's bindings are exposed as global properties so that
//! source like `() => count-- > 0` — a bare expression closing over a
//! free variable, exactly as §4.4 requires — resolves `count` without
//! the caller needing to thread it through an explicit parameter.

use boa_engine::{Context, JsValue, Source, js_string, property::Attribute};
use composer_core::Exec;
use serde_json::Value;

use crate::environment::Environment;
use crate::error::ScriptError;
use crate::evaluator::{EvalOutcome, Evaluator};

/// The sandboxed implementation of [`Evaluator`] shipped by this crate
/// (§4.4's "safe alternative" / original `nodejs:default` exec kind).
#[derive(Debug, Default)]
pub struct BoaEvaluator;

impl Evaluator for BoaEvaluator {
    fn call(
        &self,
        exec: &Exec,
        env: &mut Environment,
        params: &Value,
    ) -> Result<EvalOutcome, ScriptError> {
        let mut context = Context::default();

        for name in env.names().map(str::to_string).collect::<Vec<_>>() {
            let value = env.get(&name).cloned().unwrap_or(Value::Null);
            let js_value = to_js(&value, &mut context)?;
            context
                .register_global_property(js_string!(name.clone()), js_value, Attribute::all())
                .map_err(|e| ScriptError::Evaluation(e.to_string()))?;
        }

        let params_js = to_js(params, &mut context)?;

        let function = match context.eval(Source::from_bytes(exec.code.as_bytes())) {
            Ok(value) => value,
            Err(err) => return Ok(EvalOutcome::Threw(err.to_string())),
        };

        let callable = function.as_object().filter(|obj| obj.is_callable()).cloned();
        let Some(callable) = callable else {
            return Err(ScriptError::Evaluation(format!(
                "state source did not evaluate to a callable: {}",
                exec.code
            )));
        };

        let result = match callable.call(&JsValue::undefined(), &[params_js], &mut context) {
            Ok(value) => value,
            Err(err) => return Ok(EvalOutcome::Threw(err.to_string())),
        };

        write_back_env(env, &mut context)?;

        if result.is_undefined() {
            return Ok(EvalOutcome::Undefined);
        }
        if result.as_object().is_some_and(|obj| obj.is_callable()) {
            return Ok(EvalOutcome::ReturnedFunction);
        }

        let value = from_js(&result, &mut context)?;
        Ok(EvalOutcome::Value(value))
    }
}

fn write_back_env(env: &mut Environment, context: &mut Context) -> Result<(), ScriptError> {
    let names: Vec<String> = env.names().map(str::to_string).collect();
    for name in names {
        let updated = context
            .global_object()
            .get(js_string!(name.clone()), context)
            .map_err(|e| ScriptError::Evaluation(e.to_string()))?;
        let value = from_js(&updated, context)?;
        env.set(&name, value);
    }
    Ok(())
}

fn to_js(value: &Value, context: &mut Context) -> Result<JsValue, ScriptError> {
    JsValue::from_json(value, context).map_err(|e| ScriptError::Conversion(e.to_string()))
}

fn from_js(value: &JsValue, context: &mut Context) -> Result<Value, ScriptError> {
    value
        .to_json(context)
        .map_err(|e| ScriptError::Conversion(e.to_string()))
}
