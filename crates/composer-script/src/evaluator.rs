//! The `Evaluator` seam (§4.4): one trait implemented by whatever
//! engine actually runs user source text, so `composer-conductor` never
//! depends on a particular JS engine directly.

use composer_core::Exec;
use serde_json::Value;

use crate::environment::Environment;
use crate::error::ScriptError;

/// What running a `function` node's source produced, beyond a plain
/// JSON value. `Function`'s own step semantics (§4.2) distinguish four
/// cases; an [`Evaluator`] reports which one occurred and lets the
/// conductor decide what `params` becomes next.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalOutcome {
    /// The function ran to completion and returned this value.
    Value(Value),
    /// The function's own body threw. The conductor substitutes
    /// `{ error: <message> }` for `params`.
    Threw(String),
    /// The function returned another function. Per §4.4 this is
    /// treated as a failure: the conductor substitutes an error params.
    ReturnedFunction,
    /// The function returned `undefined`. Per §4.2, `params` is left
    /// unchanged.
    Undefined,
}

/// Runs one `function` node's source against the environment assembled
/// from the current frame stack, with `params` as the function's sole
/// argument.
///
/// Implementations own the underlying script engine and are free to
/// mutate `env` in place as user code writes to its closed-over
/// variables; the caller is responsible for calling
/// [`Environment::write_back`] afterward.
pub trait Evaluator {
    fn call(&self, exec: &Exec, env: &mut Environment, params: &Value) -> Result<EvalOutcome, ScriptError>;
}
