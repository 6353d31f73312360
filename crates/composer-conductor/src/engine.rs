//! The step/dispatch loop (§4.3): fetch the state at the current index,
//! dispatch on its `type`, loop until either a terminal state or an
//! `action` suspension is reached.

use composer_fsm::{Frame, Program, State};
use composer_script::{EvalOutcome, Evaluator, Environment};
use serde_json::{Value, json};

use crate::error::ConductorError;
use crate::output::ConductorOutput;
use crate::resume::take_resume;
use crate::tracer::{NoopTracer, Tracer};

/// The result of dispatching one state: either keep stepping towards
/// `next`, or suspend with an outcome to hand back to the caller.
enum StepOutcome {
    Continue(Option<usize>),
    Suspend(ConductorOutput),
}

/// A resumable interpreter bound to one compiled [`Program`]. Holds no
/// per-invocation state itself — `(state, stack, params)` lives entirely
/// on the call stack of [`Conductor::run_with`], round-tripped by the
/// caller through the wire contract (§6.2) between invocations.
pub struct Conductor<'p> {
    program: &'p Program,
}

impl<'p> Conductor<'p> {
    pub fn new(program: &'p Program) -> Self {
        Conductor { program }
    }

    /// Runs with a [`NoopTracer`] — the default, zero-overhead path.
    pub fn run(
        &self,
        evaluator: &dyn Evaluator,
        params: Value,
    ) -> Result<ConductorOutput, ConductorError> {
        self.run_with(evaluator, params, &mut NoopTracer)
    }

    /// Runs one conductor invocation to completion: either a terminal
    /// outcome or a suspension at an `action` state (§4.3).
    pub fn run_with<T: Tracer>(
        &self,
        evaluator: &dyn Evaluator,
        params: Value,
        tracer: &mut T,
    ) -> Result<ConductorOutput, ConductorError> {
        self.program
            .check_bounds()
            .map_err(|e| ConductorError::Internal(e.to_string()))?;

        let (resume, mut params) = take_resume(params)?;
        let mut stack;
        let mut state;
        match resume {
            Some(r) => {
                stack = r.stack;
                // §4.3: "immediately run inspect ... so an error returned
                // by the previously-invoked action is routed to the
                // nearest handler."
                state = self.inspect(&mut params, &mut stack, r.state, tracer);
            }
            None => {
                stack = Vec::new();
                state = Some(0);
            }
        }

        loop {
            let Some(current) = state else {
                return Ok(self.terminal(params));
            };

            let json = self.program.states.get(current).ok_or_else(|| {
                ConductorError::Internal(format!("state {current} is out of range"))
            })?;
            tracer.trace_step(current, json);

            match self.step(current, json, &mut params, &mut stack, evaluator, tracer)? {
                StepOutcome::Continue(next) => state = next,
                StepOutcome::Suspend(output) => return Ok(output),
            }
        }
    }

    fn terminal(&self, params: Value) -> ConductorOutput {
        match params.as_object().and_then(|m| m.get("error")) {
            Some(error) => {
                let error = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
                ConductorOutput::Error { error, code: 500 }
            }
            None => ConductorOutput::Success { params },
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn step<T: Tracer>(
        &self,
        current: usize,
        json: &State,
        params: &mut Value,
        stack: &mut Vec<Frame>,
        evaluator: &dyn Evaluator,
        tracer: &mut T,
    ) -> Result<StepOutcome, ConductorError> {
        let resolve = |next: Option<i32>| next.map(|n| (current as i64 + n as i64) as usize);

        match json {
            State::Pass { next } => {
                Ok(StepOutcome::Continue(self.inspect(params, stack, resolve(*next), tracer)))
            }

            State::Literal { value, next } => {
                *params = value.clone();
                Ok(StepOutcome::Continue(self.inspect(params, stack, resolve(*next), tracer)))
            }

            State::Function { exec, next } => {
                let mut env = Environment::from_stack(stack);
                let outcome = evaluator
                    .call(exec, &mut env, params)
                    .map_err(|e| ConductorError::Internal(e.to_string()))?;
                match outcome {
                    EvalOutcome::Threw(_) => {
                        *params =
                            json!({ "error": format!("An exception was caught at state {current}") });
                    }
                    EvalOutcome::ReturnedFunction => {
                        *params = json!({ "error": format!("State {current} evaluated to a function") });
                    }
                    EvalOutcome::Undefined => {}
                    EvalOutcome::Value(value) => *params = value,
                }
                env.write_back(stack);
                Ok(StepOutcome::Continue(self.inspect(params, stack, resolve(*next), tracer)))
            }

            State::Choice { then, else_ } => {
                // §9's pinned Open Question: strict `=== true` on
                // `params.value`, not JS-style loose truthiness and not
                // `params` itself.
                let taken = params.get("value") == Some(&Value::Bool(true));
                let offset = if taken { *then } else { *else_ };
                Ok(StepOutcome::Continue(Some((current as i64 + offset as i64) as usize)))
            }

            State::Try { catch, next } => {
                stack.insert(0, Frame::Catch { catch: current as i64 + *catch as i64 });
                Ok(StepOutcome::Continue(resolve(*next)))
            }

            State::Let { bindings, next } => {
                stack.insert(0, Frame::Let { bindings: bindings.clone() });
                Ok(StepOutcome::Continue(resolve(*next)))
            }

            State::Exit { next } => {
                if stack.is_empty() {
                    return Err(ConductorError::Internal("`exit` with an empty stack".to_string()));
                }
                stack.remove(0);
                Ok(StepOutcome::Continue(resolve(*next)))
            }

            State::Push { field, next } => {
                let captured = match field {
                    Some(name) => params.get(name).cloned().unwrap_or(Value::Null),
                    None => params.clone(),
                };
                stack.insert(0, Frame::Push { params: captured });
                Ok(StepOutcome::Continue(resolve(*next)))
            }

            State::Pop { collect, next } => {
                if stack.is_empty() {
                    return Err(ConductorError::Internal("`pop` with an empty stack".to_string()));
                }
                let popped = match stack.remove(0) {
                    Frame::Push { params } => params,
                    other => {
                        return Err(ConductorError::Internal(format!(
                            "`pop` expected a push frame, found {other:?}"
                        )));
                    }
                };
                *params = if *collect {
                    json!({ "params": popped, "result": params.clone() })
                } else {
                    popped
                };
                Ok(StepOutcome::Continue(resolve(*next)))
            }

            State::Action { name, next } => Ok(StepOutcome::Suspend(ConductorOutput::Invoke {
                action: name.clone(),
                params: params.clone(),
                state: resolve(*next),
                stack: stack.clone(),
            })),
        }
    }

    /// §4.3's `inspect`: wraps non-object `params`, and on
    /// `params.error` unwinds `stack` to the nearest `try` frame,
    /// discarding every other field. Returns the state to resume at:
    /// `next_state` unchanged when there was no error, or the unwound
    /// target (possibly `None`, i.e. no handler) when there was.
    fn inspect<T: Tracer>(
        &self,
        params: &mut Value,
        stack: &mut Vec<Frame>,
        next_state: Option<usize>,
        tracer: &mut T,
    ) -> Option<usize> {
        if !params.is_object() {
            *params = json!({ "value": params.clone() });
        }

        let error = params.as_object().and_then(|m| m.get("error")).cloned();
        let Some(error) = error else {
            tracer.trace_inspect(params);
            return next_state;
        };

        *params = json!({ "error": error });
        tracer.trace_inspect(params);

        let mut target = None;
        while !stack.is_empty() {
            let frame = stack.remove(0);
            if let Frame::Catch { catch } = &frame {
                target = Some(*catch as usize);
                tracer.trace_unwind_target(target);
                return target;
            }
            tracer.trace_unwind_frame(&frame);
        }
        tracer.trace_unwind_target(target);
        target
    }
}
