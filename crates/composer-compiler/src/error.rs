//! Compile-time faults (§7: "construction error" is the builder's; this
//! is the compiler's analogous single error kind).

use composer_fsm::ProgramError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileError {
    #[error("compiled program failed its structural check: {0}")]
    Structure(#[from] ProgramError),

    #[error("state {0} is unreachable from state 0 under every input")]
    Unreachable(usize),

    #[error("composition has no name; attach one with `named()` before deploying")]
    NotNamed,

    #[error("failed to serialize the AST into the deployment manifest: {0}")]
    Manifest(String),
}
