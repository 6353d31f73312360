//! The lexical environment a `function` node's source runs against
//! (§4.4): the union of every `let` frame currently on the stack, with
//! shallower frames (nearer the front, i.e. more recently pushed)
//! overriding deeper ones of the same name.

use composer_fsm::Frame;
use indexmap::IndexMap;
use serde_json::Value;

/// A flattened view of the stack's `let` bindings, plus enough
/// provenance to write mutations back to the frame that declared each
/// name. Resolved once per `function` step and discarded afterward —
/// it never outlives the step that built it.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: IndexMap<String, Value>,
    owner: IndexMap<String, usize>,
}

impl Environment {
    /// Walks `stack` from deepest to shallowest, merging every `let`
    /// frame's bindings. A name declared by more than one frame is
    /// owned by the shallowest (topmost) frame that declares it — that
    /// is the frame `set` will write back to.
    pub fn from_stack(stack: &[Frame]) -> Self {
        let mut env = Environment::default();
        for (index, frame) in stack.iter().enumerate().rev() {
            if let Frame::Let { bindings } = frame {
                for (name, value) in bindings {
                    env.values.insert(name.clone(), value.clone());
                    env.owner.insert(name.clone(), index);
                }
            }
        }
        env
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Records a new value for a declared name. A name the environment
    /// never declared is not tracked — per §4.4, writes to undeclared
    /// free variables do not persist past the step.
    pub fn set(&mut self, name: &str, value: Value) {
        if self.owner.contains_key(name) {
            self.values.insert(name.to_string(), value);
        }
    }

    /// Deep-clones every tracked binding back into the `let` frame that
    /// declared it. Consumes the environment: it is a one-shot snapshot.
    pub fn write_back(self, stack: &mut [Frame]) {
        for (name, value) in self.values {
            let Some(&index) = self.owner.get(&name) else { continue };
            if let Some(Frame::Let { bindings }) = stack.get_mut(index) {
                bindings.insert(name, value);
            }
        }
    }
}
