//! [`Program`]: the ordered sequence of [`State`]s a compiled composition
//! becomes (§3.2), plus the structural checks every compiled program must
//! pass (§8 invariant 6: "only in-range jumps", "visits every AST node
//! exactly once" — the reachability half of that is computed here too,
//! since it is purely a property of the state graph and does not need
//! the originating AST).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::ProgramError;
use crate::state::State;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub states: Vec<State>,
}

impl Program {
    pub fn new(states: Vec<State>) -> Self {
        Program { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Checks that every jump in the program lands inside `[0, len)`.
    /// Cheap enough that the conductor runs it defensively on every
    /// program it is handed, independent of whatever the compiler's own
    /// (AST-aware) verify pass already did.
    pub fn check_bounds(&self) -> Result<(), ProgramError> {
        if self.states.is_empty() {
            return Err(ProgramError::Empty { index: 0 });
        }
        for (index, state) in self.states.iter().enumerate() {
            for (label, offset) in state.jumps() {
                let target = index as i64 + offset as i64;
                if target < 0 || target >= self.states.len() as i64 {
                    return Err(ProgramError::OffsetOutOfRange {
                        index,
                        label,
                        offset,
                        target,
                        len: self.states.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the indices of every state unreachable from state 0,
    /// following every jump kind a state carries (`next`, `then`/`else`,
    /// and `catch` — an error unwind is "at least one input" under
    /// §4.2's reachability requirement).
    pub fn unreachable_states(&self) -> Vec<usize> {
        if self.states.is_empty() {
            return Vec::new();
        }
        let mut seen = vec![false; self.states.len()];
        let mut queue = VecDeque::new();
        seen[0] = true;
        queue.push_back(0usize);
        while let Some(index) = queue.pop_front() {
            for (_, offset) in self.states[index].jumps() {
                let target = index as i64 + offset as i64;
                if target >= 0 && (target as usize) < self.states.len() && !seen[target as usize] {
                    seen[target as usize] = true;
                    queue.push_back(target as usize);
                }
            }
        }
        seen.into_iter()
            .enumerate()
            .filter_map(|(i, reached)| (!reached).then_some(i))
            .collect()
    }
}
