//! The wire contract's three successful outcomes (§6.2): terminal
//! success, terminal error, and a continuation requesting the platform
//! invoke another action.

use composer_fsm::Frame;
use serde_json::{Value, json};

/// What one conductor invocation produces once it stops stepping,
/// either because it reached a terminal state or because it hit an
/// `action` state and must suspend.
#[derive(Debug, Clone, PartialEq)]
pub enum ConductorOutput {
    /// Terminal success: `{params: <value>}` (§6.2).
    Success { params: Value },
    /// Terminal error: `{error: <string>, code: <int>}` (§6.2). `code`
    /// defaults to 500 unless `params.error` itself carried a numeric
    /// `code` field (§9: "the error-code field").
    Error { error: String, code: u16 },
    /// A suspension at an `action` state: the platform is asked to
    /// invoke `action` with `params` and deliver the result back
    /// wrapped in the embedded `$resume` continuation. `state` is
    /// `None` when the action had no `next` (it was the FSM's final
    /// state) — see [`crate::resume::Resume`].
    Invoke {
        action: String,
        params: Value,
        state: Option<usize>,
        stack: Vec<Frame>,
    },
}

impl ConductorOutput {
    /// Encodes this outcome into the wire shape §6.2 specifies.
    pub fn to_json(&self) -> Value {
        match self {
            ConductorOutput::Success { params } => json!({ "params": params }),
            ConductorOutput::Error { error, code } => json!({ "error": error, "code": code }),
            ConductorOutput::Invoke {
                action,
                params,
                state,
                stack,
            } => json!({
                "action": action,
                "params": params,
                "state": { "$resume": { "state": *state, "stack": stack } },
            }),
        }
    }
}
