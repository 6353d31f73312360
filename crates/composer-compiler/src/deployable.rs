//! Assembles the deployable unit §6.1 describes: a named composition's
//! compiled [`Program`](composer_fsm::Program), the action artifacts its
//! `action` nodes captured, and a [`Manifest`] annotation recovering the
//! original AST.

use composer_core::Composition;
use composer_fsm::{Deployable, Manifest};

use crate::error::CompileError;

/// Compiles `composition` and packages it as a [`Deployable`]. Fails if
/// the composition was never given a name via `named()` — an unnamed
/// composition can be compiled and run in-process but has no identity
/// to deploy under.
pub fn build(composition: &Composition) -> Result<Deployable, CompileError> {
    let name = composition.name.clone().ok_or(CompileError::NotNamed)?;
    let program = crate::compile(&composition.node)?;
    let annotation = Manifest::for_ast(&composition.node).map_err(|e| CompileError::Manifest(e.to_string()))?;

    Ok(Deployable {
        name,
        program,
        artifacts: composition.artifacts.clone(),
        annotation,
    })
}
