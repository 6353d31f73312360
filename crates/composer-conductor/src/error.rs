//! The conductor's two failure kinds (§7): a bad-request from a
//! malformed `$resume`, and an internal error from a broken interpreter
//! invariant (stack underflow, unknown state type). Both are distinct
//! from a `params.error` produced by `function`/`literal`/an action,
//! which is not a Rust error at all — it is a normal
//! [`crate::ConductorOutput::Error`] terminal value, routed there by
//! `inspect`.

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConductorError {
    #[error("malformed $resume: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConductorError {
    /// The HTTP-flavored status code §6.2's wire contract assigns to
    /// this failure.
    pub fn code(&self) -> u16 {
        match self {
            ConductorError::BadRequest(_) => 400,
            ConductorError::Internal(_) => 500,
        }
    }
}
