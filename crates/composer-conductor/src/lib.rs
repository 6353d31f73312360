//! The conductor: a resumable, single-threaded step interpreter over a
//! compiled [`composer_fsm::Program`] (§4.3). One invocation of
//! [`Conductor::run`] processes a contiguous run of synchronous states
//! and either terminates or suspends at an `action` state, returning a
//! continuation the host round-trips back on the next invocation.

mod engine;
pub mod error;
pub mod output;
pub mod resume;
pub mod tracer;

#[cfg(test)]
mod engine_tests;

pub use engine::Conductor;
pub use error::ConductorError;
pub use output::ConductorOutput;
pub use resume::Resume;
pub use tracer::{NoopTracer, PrintTracer, Tracer};
