//! The flat FSM data model the compiler emits and the conductor runs
//! (§3.2, §3.3, §6.1).

pub mod deployable;
pub mod dump;
pub mod error;
pub mod frame;
pub mod program;
pub mod state;


pub use deployable::{Deployable, Manifest};
pub use error::ProgramError;
pub use frame::Frame;
pub use program::Program;
pub use state::State;
