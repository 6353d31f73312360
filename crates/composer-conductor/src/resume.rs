//! Parsing and validation of the `$resume` continuation carried in
//! `params` on every invocation after the first (§4.3 "Initial entry",
//! §6.2's wire contract).

use composer_fsm::Frame;
use serde_json::Value;

use crate::error::ConductorError;

/// A validated `$resume: {state, stack}` continuation. `state` is `None`
/// when the action that just ran was itself the FSM's final state (no
/// `next`) — the continuation still round-trips through the platform,
/// but resuming it immediately terminates once `inspect` has run.
#[derive(Debug, Clone, PartialEq)]
pub struct Resume {
    pub state: Option<usize>,
    pub stack: Vec<Frame>,
}

/// If `params` is an object carrying `$resume`, validates its shape and
/// returns the parsed continuation plus `params` with `$resume` stripped.
/// If `$resume` is absent, returns `None` and `params` untouched. Any
/// other shape of `$resume` itself is a bad request (§4.3: "Bad shapes
/// of `$resume` produce a bad-request error").
pub fn take_resume(params: Value) -> Result<(Option<Resume>, Value), ConductorError> {
    let Value::Object(mut map) = params else {
        return Ok((None, params));
    };
    let Some(resume_value) = map.remove("$resume") else {
        return Ok((None, Value::Object(map)));
    };

    let resume = parse_resume(&resume_value)?;
    Ok((Some(resume), Value::Object(map)))
}

fn parse_resume(value: &Value) -> Result<Resume, ConductorError> {
    let obj = value.as_object().ok_or_else(|| {
        ConductorError::BadRequest("`$resume` must be an object".to_string())
    })?;

    let state_value = obj
        .get("state")
        .ok_or_else(|| ConductorError::BadRequest("`$resume.state` is required".to_string()))?;
    let state = match state_value {
        Value::Null => None,
        Value::Number(_) => Some(state_value.as_u64().ok_or_else(|| {
            ConductorError::BadRequest("`$resume.state` must be a non-negative integer".to_string())
        })? as usize),
        _ => {
            return Err(ConductorError::BadRequest(
                "`$resume.state` must be a non-negative integer or null".to_string(),
            ));
        }
    };

    let stack_value = obj
        .get("stack")
        .ok_or_else(|| ConductorError::BadRequest("`$resume.stack` is required".to_string()))?;
    let stack_items = stack_value.as_array().ok_or_else(|| {
        ConductorError::BadRequest("`$resume.stack` must be an array".to_string())
    })?;

    let stack = stack_items
        .iter()
        .map(|item| {
            serde_json::from_value::<Frame>(item.clone())
                .map_err(|e| ConductorError::BadRequest(format!("`$resume.stack` entry is not a valid frame: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Resume { state, stack })
}
