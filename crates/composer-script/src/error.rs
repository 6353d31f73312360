//! Faults raised by evaluating user script, distinct from the `Threw`/
//! `ReturnedFunction`/`Undefined` outcomes in [`crate::EvalOutcome`] —
//! those are *observed behaviors* of otherwise-successfully-run script
//! that the conductor's `inspect` routine turns into `params.error`;
//! `ScriptError` is reserved for host-side failures that mean the
//! evaluator itself could not run the code at all (e.g. a value that
//! does not round-trip to JSON).

#[derive(Debug, Clone, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to parse or run script: {0}")]
    Evaluation(String),

    #[error("value could not be converted between JSON and the script engine: {0}")]
    Conversion(String),
}
