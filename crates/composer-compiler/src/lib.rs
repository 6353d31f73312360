//! Lowers a composition AST (`composer-core`) to a flat FSM
//! (`composer-fsm`), per §4.2.

pub mod deployable;
pub mod error;
mod lower;
mod verify;


use composer_core::node::Node;
use composer_fsm::Program;

pub use deployable::build as build_deployable;
pub use error::CompileError;

/// Compiles a normalized AST to a verified, flat [`Program`]. Compile is
/// referentially transparent: identical ASTs always produce equal
/// programs, since [`lower::lower`] is a pure recursive function of its
/// input.
pub fn compile(ast: &Node) -> Result<Program, CompileError> {
    let program = Program::new(lower::lower(ast));
    verify::verify(&program)?;
    Ok(program)
}
