//! The conductor's observability seam: the step loop is generic over a
//! [`Tracer`], so the default [`NoopTracer`] costs nothing and a
//! non-noop tracer (e.g. `composer-cli run --trace`) is opted into per
//! call rather than via a global logger.

use composer_fsm::{Frame, State};
use serde_json::Value;

/// Instrumentation points in one step of [`crate::Conductor::run`].
pub trait Tracer {
    /// Called before dispatching the state at `index`.
    fn trace_step(&mut self, index: usize, state: &State) {
        let _ = (index, state);
    }
    /// Called after `inspect` has normalized `params` for this step.
    fn trace_inspect(&mut self, params: &Value) {
        let _ = params;
    }
    /// Called when an error unwind removes a frame while searching for
    /// a handler.
    fn trace_unwind_frame(&mut self, frame: &Frame) {
        let _ = frame;
    }
    /// Called when an error unwind finds (or fails to find) a handler.
    fn trace_unwind_target(&mut self, target: Option<usize>) {
        let _ = target;
    }
}

/// The default tracer: every method is a no-op, so the compiler should
/// be able to erase tracing entirely from the step loop's hot path.
#[derive(Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// A tracer that prints one line per step to stdout, for `composer-cli
/// run --trace`.
#[derive(Debug, Default)]
pub struct PrintTracer;

impl Tracer for PrintTracer {
    fn trace_step(&mut self, index: usize, state: &State) {
        println!("{index:>4}: {}", state.type_name());
    }

    fn trace_inspect(&mut self, params: &Value) {
        println!("      params = {params}");
    }

    fn trace_unwind_frame(&mut self, frame: &Frame) {
        println!("      unwind: dropping {frame:?}");
    }

    fn trace_unwind_target(&mut self, target: Option<usize>) {
        match target {
            Some(t) => println!("      unwind: resuming at {t}"),
            None => println!("      unwind: no handler, terminating"),
        }
    }
}
