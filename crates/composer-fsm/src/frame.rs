//! A runtime stack frame (§3.3). The stack is a single ordered list;
//! `unshift`/`shift` operate at the front, so frame 0 is the newest.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Frame {
    /// Installed by `try`, removed by `exit` or consumed during an error
    /// unwind. `catch` is an absolute state index.
    Catch { catch: i64 },
    /// Installed by `let`, removed by `exit`.
    Let {
        #[serde(rename = "let")]
        bindings: IndexMap<String, Value>,
    },
    /// Installed by `push`, removed by `pop`.
    Push { params: Value },
}

impl Frame {
    pub fn is_catch(&self) -> bool {
        matches!(self, Frame::Catch { .. })
    }
}
